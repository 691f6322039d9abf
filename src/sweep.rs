use crate::runner::{run_policy, RunMetrics};
use anyhow::{anyhow, Result};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct SeedOutcome {
    pub seed: u64,
    pub frame_count: u32,
    pub winner: bool,
    pub rejected_commands: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct SweepSummary {
    pub policy_id: String,
    pub seed_start: u64,
    pub seed_count: u32,
    pub max_frames: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub mean_frames_to_win: Option<f64>,
    pub fastest_win: Option<SeedOutcome>,
    pub slowest_win: Option<SeedOutcome>,
    pub outcomes: Vec<SeedOutcome>,
}

/// Run one policy over a contiguous seed range, one fresh policy instance per
/// seed, seeds evaluated in parallel.
pub fn sweep_policy(
    policy_id: &str,
    seed_start: u64,
    seed_count: u32,
    max_frames: u32,
) -> Result<SweepSummary> {
    if seed_count == 0 {
        return Err(anyhow!("seed_count must be > 0"));
    }

    let metrics: Vec<RunMetrics> = (0..seed_count as u64)
        .into_par_iter()
        .map(|offset| run_policy(policy_id, seed_start + offset, max_frames).map(|r| r.metrics))
        .collect::<Result<Vec<_>>>()?;

    let outcomes: Vec<SeedOutcome> = metrics
        .iter()
        .map(|m| SeedOutcome {
            seed: m.seed,
            frame_count: m.frame_count,
            winner: m.winner,
            rejected_commands: m.rejected_commands,
        })
        .collect();

    let wins = outcomes.iter().filter(|o| o.winner).count() as u32;
    let losses = seed_count - wins;
    let win_frames: Vec<u32> = outcomes
        .iter()
        .filter(|o| o.winner)
        .map(|o| o.frame_count)
        .collect();
    let mean_frames_to_win = if win_frames.is_empty() {
        None
    } else {
        Some(win_frames.iter().map(|f| *f as f64).sum::<f64>() / win_frames.len() as f64)
    };

    let fastest_win = outcomes
        .iter()
        .filter(|o| o.winner)
        .min_by_key(|o| o.frame_count)
        .cloned();
    let slowest_win = outcomes
        .iter()
        .filter(|o| o.winner)
        .max_by_key(|o| o.frame_count)
        .cloned();

    Ok(SweepSummary {
        policy_id: policy_id.to_string(),
        seed_start,
        seed_count,
        max_frames,
        wins,
        losses,
        win_rate: wins as f64 / seed_count as f64,
        mean_frames_to_win,
        fastest_win,
        slowest_win,
        outcomes,
    })
}
