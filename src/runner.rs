use crate::bridge::snapshot::FrameSnapshot;
use crate::bridge::types::{Command, UnitId, UnitKind};
use crate::policy::{create_policy, policy_fingerprint, AgentPolicy};
use crate::sim::MatchSim;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub policy_id: String,
    pub policy_fingerprint: String,
    pub seed: u64,
    pub max_frames: u32,
    pub frame_count: u32,
    pub winner: bool,
    pub game_over: bool,
    pub harvest_commands: u32,
    pub morph_commands: u32,
    pub build_commands: u32,
    pub attack_commands: u32,
    pub rejected_commands: u32,
    pub pool_completed_frame: Option<u32>,
    pub final_minerals: u32,
    pub final_supply_used: u32,
    pub final_supply_total: u32,
    pub final_drones: usize,
    pub final_zerglings: usize,
}

/// One rejected command, kept for post-run inspection. Rejections are
/// expected in normal play (vanished targets, races between decision steps);
/// they are recorded, not retried.
#[derive(Clone, Debug, Serialize)]
pub struct RejectionRecord {
    pub frame: u32,
    pub command: Command,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub metrics: RunMetrics,
    pub rejections: Vec<RejectionRecord>,
}

pub fn run_policy(policy_id: &str, seed: u64, max_frames: u32) -> Result<RunReport> {
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }

    let mut policy =
        create_policy(policy_id).ok_or_else(|| anyhow!("unknown policy '{policy_id}'"))?;
    run_policy_instance(policy.as_mut(), seed, max_frames)
}

pub fn run_policy_instance(
    policy: &mut dyn AgentPolicy,
    seed: u64,
    max_frames: u32,
) -> Result<RunReport> {
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }

    let mut game = MatchSim::new(seed);
    game.validate()
        .map_err(|rule| anyhow!("initial invariant failure: {rule}"))?;

    let setup = policy.match_start();
    game.configure(setup);
    log::debug!(
        "{}: match start, seed={seed}, speed={}, perfect_information={}",
        policy.id(),
        setup.game_speed,
        setup.perfect_information
    );

    let mut harvest_commands = 0u32;
    let mut morph_commands = 0u32;
    let mut build_commands = 0u32;
    let mut attack_commands = 0u32;
    let mut rejections = Vec::new();
    let mut known_units: BTreeSet<UnitId> = BTreeSet::new();

    while game.frame_count() < max_frames && !game.is_won() {
        let snapshot = game.snapshot();
        notify_unit_events(policy, &snapshot, &mut known_units);

        let commands = policy.frame(&snapshot);
        for command in &commands {
            match command {
                Command::Harvest { .. } => harvest_commands += 1,
                Command::Morph { .. } => morph_commands += 1,
                Command::Build { .. } => build_commands += 1,
                Command::Attack { .. } => attack_commands += 1,
            }
        }

        for (command, outcome) in commands.iter().zip(game.apply(&commands)) {
            if let Err(err) = outcome {
                log::debug!(
                    "frame {}: dropped command {command:?}: {err}",
                    snapshot.frame_count
                );
                rejections.push(RejectionRecord {
                    frame: snapshot.frame_count,
                    command: *command,
                    reason: err.to_string(),
                });
            }
        }

        game.step();
    }

    let winner = game.is_won();
    policy.match_end(winner);

    let last = game.snapshot();
    let final_drones = last.count_mine(UnitKind::Drone);
    let final_zerglings = last.count_mine(UnitKind::Zergling);

    Ok(RunReport {
        metrics: RunMetrics {
            policy_id: policy.id().to_string(),
            policy_fingerprint: policy_fingerprint(policy.id())
                .unwrap_or_else(|| "unknown".to_string()),
            seed,
            max_frames,
            frame_count: game.frame_count(),
            winner,
            game_over: winner,
            harvest_commands,
            morph_commands,
            build_commands,
            attack_commands,
            rejected_commands: rejections.len() as u32,
            pool_completed_frame: game.pool_completed_frame(),
            final_minerals: game.minerals(),
            final_supply_used: game.supply_used(),
            final_supply_total: game.supply_total(),
            final_drones,
            final_zerglings,
        },
        rejections,
    })
}

/// Diff visible unit ids against the previous frame and deliver the optional
/// discover/destroy notifications.
fn notify_unit_events(
    policy: &mut dyn AgentPolicy,
    snapshot: &FrameSnapshot,
    known_units: &mut BTreeSet<UnitId>,
) {
    let visible: BTreeSet<UnitId> = snapshot
        .my_units
        .iter()
        .chain(snapshot.neutral_units.iter())
        .chain(snapshot.enemy_units.iter())
        .map(|u| u.id)
        .collect();

    for discovered in visible.difference(known_units) {
        policy.unit_discover(*discovered);
    }
    for destroyed in known_units.difference(&visible) {
        policy.unit_destroy(*destroyed);
    }
    *known_units = visible;
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let encoded = serde_json::to_vec_pretty(report).context("failed encoding run report")?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
