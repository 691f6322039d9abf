//! The six-pool rush policy: drones to six, pool at the overlord, overlords
//! when supply-blocked, zerglings otherwise, everything at the enemy.
//!
//! Each category is re-evaluated from the fresh snapshot every frame; nothing
//! is claimed or reserved across frames. Two idle workers may pick the same
//! patch, morph-all steps may overshoot in one tick, and an idle zergling
//! attacks the first enumerated enemy rather than the closest. Those quirks
//! are deliberate and covered by tests; do not "fix" them.

use crate::bridge::snapshot::FrameSnapshot;
use crate::bridge::types::{Command, MatchSetup, UnitKind};
use crate::policy::AgentPolicy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SixPoolConfig {
    pub id: &'static str,
    pub description: &'static str,
    /// Stop morphing workers once this many drones exist.
    pub worker_target: usize,
    /// Idle workers only consider patches within this distance.
    pub harvest_radius: f64,
    /// Morph overlords once `supply_used + margin >= supply_total`.
    pub supply_margin: u32,
    pub game_speed: u32,
}

pub fn sixpool_configs() -> &'static [SixPoolConfig] {
    const CONFIGS: [SixPoolConfig; 2] = [
        SixPoolConfig {
            id: "sixpool",
            description: "Classic six-pool rush at development game speed.",
            worker_target: 6,
            harvest_radius: 300.0,
            supply_margin: 2,
            game_speed: 10,
        },
        SixPoolConfig {
            id: "sixpool-fast",
            description: "Six-pool rush at maximum game speed.",
            worker_target: 6,
            harvest_radius: 300.0,
            supply_margin: 2,
            game_speed: 0,
        },
    ];
    &CONFIGS
}

/// Counters that persist across frames. Reset at match start; everything else
/// is rederived from the snapshot.
#[derive(Clone, Copy, Debug, Default)]
struct PolicyState {
    last_frame: Option<u32>,
    frames_processed: u64,
}

pub struct SixPoolPolicy {
    cfg: SixPoolConfig,
    state: PolicyState,
}

impl SixPoolPolicy {
    pub fn new(cfg: SixPoolConfig) -> Self {
        Self {
            cfg,
            state: PolicyState::default(),
        }
    }

    fn have_pool(snapshot: &FrameSnapshot) -> bool {
        // Completed or in progress; either suppresses another build order.
        snapshot
            .my_units
            .iter()
            .any(|u| u.kind == UnitKind::SpawningPool)
    }

    fn have_completed_pool(snapshot: &FrameSnapshot) -> bool {
        snapshot
            .my_units
            .iter()
            .any(|u| u.kind == UnitKind::SpawningPool && u.completed)
    }
}

impl AgentPolicy for SixPoolPolicy {
    fn id(&self) -> &'static str {
        self.cfg.id
    }

    fn description(&self) -> &'static str {
        self.cfg.description
    }

    fn match_start(&mut self) -> MatchSetup {
        self.state = PolicyState::default();
        MatchSetup {
            game_speed: self.cfg.game_speed,
            user_input: true,
            perfect_information: true,
        }
    }

    fn frame(&mut self, snapshot: &FrameSnapshot) -> Vec<Command> {
        if let Some(last) = self.state.last_frame {
            if snapshot.frame_count > last + 1 {
                log::trace!(
                    "{}: skipped frames {}..{}",
                    self.cfg.id,
                    last + 1,
                    snapshot.frame_count
                );
            }
        }
        self.state.last_frame = Some(snapshot.frame_count);
        self.state.frames_processed += 1;

        let mut commands = Vec::new();

        // 1. Idle drones harvest the first in-range patch, not the nearest.
        for drone in snapshot
            .my_units
            .iter()
            .filter(|u| u.kind == UnitKind::Drone && u.idle)
        {
            for patch in snapshot
                .neutral_units
                .iter()
                .filter(|u| u.kind == UnitKind::MineralField)
            {
                if drone.pos.distance(patch.pos) < self.cfg.harvest_radius {
                    commands.push(Command::Harvest {
                        worker: drone.id,
                        patch: patch.id,
                    });
                    break;
                }
            }
        }

        // 2. One larva to drone per frame while below the worker target.
        if snapshot.count_mine(UnitKind::Drone) < self.cfg.worker_target
            && snapshot.can_make(UnitKind::Drone)
        {
            if let Some(larva) = snapshot
                .my_units
                .iter()
                .find(|u| u.kind == UnitKind::Larva && u.idle)
            {
                commands.push(Command::Morph {
                    unit: larva.id,
                    into: UnitKind::Drone,
                });
            }
        }

        // 3. Pool at the first overlord's position, built by the first drone.
        if !Self::have_pool(snapshot) && snapshot.can_make(UnitKind::SpawningPool) {
            let builder = snapshot
                .my_units
                .iter()
                .find(|u| u.kind == UnitKind::Drone);
            let anchor = snapshot
                .my_units
                .iter()
                .find(|u| u.kind == UnitKind::Overlord);
            if let (Some(builder), Some(anchor)) = (builder, anchor) {
                commands.push(Command::Build {
                    builder: builder.id,
                    building: UnitKind::SpawningPool,
                    at: anchor.pos,
                });
            }
        }

        // 4. All idle larvae to overlords when supply-blocked, otherwise all
        //    to zerglings once the pool is done.
        let player = snapshot.player;
        if player.supply_used + self.cfg.supply_margin >= player.supply_total {
            if snapshot.can_make(UnitKind::Overlord) {
                for larva in snapshot
                    .my_units
                    .iter()
                    .filter(|u| u.kind == UnitKind::Larva && u.idle)
                {
                    commands.push(Command::Morph {
                        unit: larva.id,
                        into: UnitKind::Overlord,
                    });
                }
            }
        } else if Self::have_completed_pool(snapshot) && snapshot.can_make(UnitKind::Zergling) {
            for larva in snapshot
                .my_units
                .iter()
                .filter(|u| u.kind == UnitKind::Larva && u.idle)
            {
                commands.push(Command::Morph {
                    unit: larva.id,
                    into: UnitKind::Zergling,
                });
            }
        }

        // 5. Idle zerglings at the first enumerated enemy.
        for ling in snapshot
            .my_units
            .iter()
            .filter(|u| u.kind == UnitKind::Zergling && u.idle)
        {
            if let Some(enemy) = snapshot.enemy_units.first() {
                commands.push(Command::Attack {
                    unit: ling.id,
                    target: enemy.pos,
                });
            }
        }

        commands
    }

    fn match_end(&mut self, winner: bool) {
        log::debug!(
            "{}: match over after {} frames, winner={winner}",
            self.cfg.id,
            self.state.frames_processed
        );
    }
}
