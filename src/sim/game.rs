use crate::bridge::error::{CommandError, RuleCode};
use crate::bridge::snapshot::{FrameSnapshot, PlayerView, UnitView};
use crate::bridge::types::{Command, MatchSetup, Position, ProducibleSet, UnitId, UnitKind};
use crate::sim::constants::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Activity {
    Idle,
    Harvesting { patch: UnitId, countdown: u32 },
    Morphing { into: UnitKind, remaining: u32 },
    UnderConstruction { remaining: u32 },
    Attacking { target: Position },
}

#[derive(Clone, Debug)]
struct SimUnit {
    id: UnitId,
    kind: UnitKind,
    pos: Position,
    activity: Activity,
}

#[derive(Clone, Debug)]
struct EnemyUnit {
    id: UnitId,
    kind: UnitKind,
    pos: Position,
    hp: i32,
}

#[derive(Clone, Debug)]
struct Patch {
    id: UnitId,
    pos: Position,
    amount: u32,
}

/// Frame-stepped match state. One hatchery economy against a small passive
/// enemy outpost; the match is won when the outpost is cleared.
pub struct MatchSim {
    frame: u32,
    next_id: u32,
    minerals: u32,
    supply_used: u32,
    supply_total: u32,
    my_units: Vec<SimUnit>,
    patches: Vec<Patch>,
    enemy_units: Vec<EnemyUnit>,
    larva_timer: u32,
    setup: MatchSetup,
    pool_completed_frame: Option<u32>,
}

impl MatchSim {
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut jitter = |spread: i32| rng.random_range(-spread..=spread);

        let hatch = Position::new(1000, 1000);
        let mut sim = Self {
            frame: 0,
            next_id: 1,
            minerals: START_MINERALS,
            supply_used: 0,
            supply_total: 0,
            my_units: Vec::new(),
            patches: Vec::new(),
            enemy_units: Vec::new(),
            larva_timer: LARVA_SPAWN_FRAMES,
            setup: MatchSetup::default(),
            pool_completed_frame: None,
        };

        sim.spawn_mine(UnitKind::Hatchery, hatch);
        sim.spawn_mine(UnitKind::Overlord, Position::new(hatch.x + 60, hatch.y - 90));
        for i in 0..START_DRONES {
            let offset = 40 + 20 * i as i32;
            sim.spawn_mine(UnitKind::Drone, Position::new(hatch.x - offset, hatch.y + 50));
        }
        for i in 0..START_LARVAE {
            sim.spawn_mine(
                UnitKind::Larva,
                Position::new(hatch.x + 20 * i as i32, hatch.y + 30),
            );
        }

        // Six patches in harvest range of the hatchery, two decoys beyond it.
        for i in 0..6 {
            let angle = i as f64 * std::f64::consts::FRAC_PI_3;
            let pos = Position::new(
                hatch.x + (220.0 * angle.cos()) as i32 + jitter(12),
                hatch.y + (220.0 * angle.sin()) as i32 + jitter(12),
            );
            sim.spawn_patch(pos);
        }
        sim.spawn_patch(Position::new(hatch.x + 480 + jitter(24), hatch.y + 480));
        sim.spawn_patch(Position::new(hatch.x - 480, hatch.y - 480 + jitter(24)));

        let base = Position::new(3200 + jitter(80), 3200 + jitter(80));
        sim.spawn_enemy(UnitKind::CommandCenter, base, COMMAND_CENTER_HP);
        for i in 0..3 {
            let pos = Position::new(base.x - 80 + 60 * i, base.y - 70);
            sim.spawn_enemy(UnitKind::Marine, pos, MARINE_HP);
        }

        sim
    }

    pub fn configure(&mut self, setup: MatchSetup) {
        self.setup = setup;
    }

    pub fn frame_count(&self) -> u32 {
        self.frame
    }

    pub fn minerals(&self) -> u32 {
        self.minerals
    }

    pub fn supply_used(&self) -> u32 {
        self.supply_used
    }

    pub fn supply_total(&self) -> u32 {
        self.supply_total
    }

    pub fn pool_completed_frame(&self) -> Option<u32> {
        self.pool_completed_frame
    }

    pub fn is_won(&self) -> bool {
        self.enemy_units.is_empty()
    }

    fn alloc_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn_mine(&mut self, kind: UnitKind, pos: Position) {
        let id = self.alloc_id();
        self.supply_used += supply_cost(kind);
        self.supply_total += supply_provided(kind);
        self.my_units.push(SimUnit {
            id,
            kind,
            pos,
            activity: Activity::Idle,
        });
    }

    fn spawn_patch(&mut self, pos: Position) {
        let id = self.alloc_id();
        self.patches.push(Patch {
            id,
            pos,
            amount: PATCH_START_AMOUNT,
        });
    }

    fn spawn_enemy(&mut self, kind: UnitKind, pos: Position, hp: i32) {
        let id = self.alloc_id();
        self.enemy_units.push(EnemyUnit { id, kind, pos, hp });
    }

    /// Feasibility the engine reports for "can-make" queries: resources,
    /// supply room, and tech prerequisite. Larva availability is the
    /// policy's own problem, as it is over the real bridge.
    pub fn producible(&self) -> ProducibleSet {
        let mut set = ProducibleSet::empty();
        if self.minerals >= DRONE_COST && self.supply_used + DRONE_SUPPLY <= self.supply_total {
            set.insert(UnitKind::Drone);
        }
        if self.minerals >= OVERLORD_COST {
            set.insert(UnitKind::Overlord);
        }
        if self.minerals >= ZERGLING_COST
            && self.supply_used + ZERGLING_SUPPLY <= self.supply_total
            && self.has_completed_pool()
        {
            set.insert(UnitKind::Zergling);
        }
        if self.minerals >= POOL_COST {
            set.insert(UnitKind::SpawningPool);
        }
        set
    }

    fn has_completed_pool(&self) -> bool {
        self.my_units.iter().any(|u| {
            u.kind == UnitKind::SpawningPool
                && !matches!(u.activity, Activity::UnderConstruction { .. })
        })
    }

    /// Apply a batch of commands in list order, returning one outcome per
    /// command. Rejections are transient: the unit batch is untouched and the
    /// policy is expected to re-evaluate next frame.
    pub fn apply(&mut self, commands: &[Command]) -> Vec<Result<(), CommandError>> {
        commands.iter().map(|cmd| self.apply_one(*cmd)).collect()
    }

    fn apply_one(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Harvest { worker, patch } => {
                let unit = self.own_unit_mut(worker)?;
                if unit.kind != UnitKind::Drone {
                    return Err(CommandError::WrongKind {
                        unit: worker,
                        expected: UnitKind::Drone,
                    });
                }
                if matches!(
                    unit.activity,
                    Activity::Morphing { .. } | Activity::UnderConstruction { .. }
                ) {
                    return Err(CommandError::Busy { unit: worker });
                }
                if !self.patches.iter().any(|p| p.id == patch && p.amount > 0) {
                    return Err(CommandError::InvalidTarget { unit: patch });
                }
                let unit = self.own_unit_mut(worker)?;
                unit.activity = Activity::Harvesting {
                    patch,
                    countdown: HARVEST_TRIP_FRAMES,
                };
                Ok(())
            }
            Command::Morph { unit, into } => {
                if !into.is_morph_target() {
                    return Err(CommandError::InvalidMorphTarget { into });
                }
                if !self.producible().contains(into) {
                    return Err(CommandError::NotProducible { kind: into });
                }
                let larva = self.own_unit_mut(unit)?;
                if larva.kind != UnitKind::Larva {
                    return Err(CommandError::WrongKind {
                        unit,
                        expected: UnitKind::Larva,
                    });
                }
                if larva.activity != Activity::Idle {
                    return Err(CommandError::Busy { unit });
                }
                larva.activity = Activity::Morphing {
                    into,
                    remaining: morph_frames(into),
                };
                self.minerals -= mineral_cost(into);
                self.supply_used += supply_cost(into);
                Ok(())
            }
            Command::Build {
                builder,
                building,
                at,
            } => {
                if building != UnitKind::SpawningPool {
                    return Err(CommandError::NotProducible { kind: building });
                }
                if self.minerals < POOL_COST {
                    return Err(CommandError::NotProducible { kind: building });
                }
                let unit = self.own_unit_mut(builder)?;
                if unit.kind != UnitKind::Drone {
                    return Err(CommandError::WrongKind {
                        unit: builder,
                        expected: UnitKind::Drone,
                    });
                }
                // The drone is consumed by the structure, as over the bridge.
                let index = self
                    .my_units
                    .iter()
                    .position(|u| u.id == builder)
                    .expect("builder just resolved");
                self.my_units.swap_remove(index);
                self.supply_used -= DRONE_SUPPLY;
                self.minerals -= POOL_COST;
                let id = self.alloc_id();
                self.my_units.push(SimUnit {
                    id,
                    kind: UnitKind::SpawningPool,
                    pos: at,
                    activity: Activity::UnderConstruction {
                        remaining: POOL_BUILD_FRAMES,
                    },
                });
                Ok(())
            }
            Command::Attack { unit, target } => {
                let ling = self.own_unit_mut(unit)?;
                if ling.kind != UnitKind::Zergling {
                    return Err(CommandError::WrongKind {
                        unit,
                        expected: UnitKind::Zergling,
                    });
                }
                if matches!(
                    ling.activity,
                    Activity::Morphing { .. } | Activity::UnderConstruction { .. }
                ) {
                    return Err(CommandError::Busy { unit });
                }
                ling.activity = Activity::Attacking { target };
                Ok(())
            }
        }
    }

    fn own_unit_mut(&mut self, id: UnitId) -> Result<&mut SimUnit, CommandError> {
        if let Some(index) = self.my_units.iter().position(|u| u.id == id) {
            return Ok(&mut self.my_units[index]);
        }
        let foreign = self.patches.iter().any(|p| p.id == id)
            || self.enemy_units.iter().any(|e| e.id == id);
        if foreign {
            Err(CommandError::NotOwned { unit: id })
        } else {
            Err(CommandError::UnknownUnit { unit: id })
        }
    }

    /// Advance the simulation one frame.
    pub fn step(&mut self) {
        self.frame += 1;
        self.tick_larvae();

        let Self {
            ref mut my_units,
            ref mut enemy_units,
            ref mut patches,
            ref mut minerals,
            ref mut supply_total,
            ref mut pool_completed_frame,
            frame,
            ..
        } = *self;

        for unit in my_units.iter_mut() {
            match unit.activity {
                Activity::Idle => {}
                Activity::Harvesting { patch, countdown } => {
                    let Some(entry) = patches.iter_mut().find(|p| p.id == patch && p.amount > 0)
                    else {
                        unit.activity = Activity::Idle;
                        continue;
                    };
                    let countdown = countdown - 1;
                    if countdown == 0 {
                        let delivered = HARVEST_YIELD.min(entry.amount);
                        entry.amount -= delivered;
                        *minerals += delivered;
                        unit.activity = if entry.amount == 0 {
                            Activity::Idle
                        } else {
                            Activity::Harvesting {
                                patch,
                                countdown: HARVEST_TRIP_FRAMES,
                            }
                        };
                    } else {
                        unit.activity = Activity::Harvesting { patch, countdown };
                    }
                }
                Activity::Morphing { into, remaining } => {
                    let remaining = remaining - 1;
                    if remaining == 0 {
                        unit.kind = into;
                        unit.activity = Activity::Idle;
                        *supply_total += supply_provided(into);
                    } else {
                        unit.activity = Activity::Morphing { into, remaining };
                    }
                }
                Activity::UnderConstruction { remaining } => {
                    let remaining = remaining - 1;
                    if remaining == 0 {
                        unit.activity = Activity::Idle;
                        if unit.kind == UnitKind::SpawningPool && pool_completed_frame.is_none() {
                            *pool_completed_frame = Some(frame);
                        }
                    } else {
                        unit.activity = Activity::UnderConstruction { remaining };
                    }
                }
                Activity::Attacking { target } => {
                    let in_range = enemy_units
                        .iter_mut()
                        .filter(|e| unit.pos.distance(e.pos) <= ZERGLING_RANGE)
                        .min_by(|a, b| {
                            unit.pos
                                .distance(a.pos)
                                .total_cmp(&unit.pos.distance(b.pos))
                        });
                    if let Some(enemy) = in_range {
                        enemy.hp -= ZERGLING_DAMAGE;
                    } else if unit.pos == target {
                        unit.activity = Activity::Idle;
                    } else {
                        unit.pos = unit.pos.step_toward(target, ZERGLING_SPEED);
                    }
                }
            }
        }

        patches.retain(|p| p.amount > 0);
        enemy_units.retain(|e| e.hp > 0);
    }

    fn tick_larvae(&mut self) {
        let available = self
            .my_units
            .iter()
            .filter(|u| u.kind == UnitKind::Larva && !matches!(u.activity, Activity::Morphing { .. }))
            .count();
        if available >= LARVA_CAP {
            self.larva_timer = LARVA_SPAWN_FRAMES;
            return;
        }
        self.larva_timer -= 1;
        if self.larva_timer == 0 {
            self.larva_timer = LARVA_SPAWN_FRAMES;
            let hatch = self
                .my_units
                .iter()
                .find(|u| u.kind == UnitKind::Hatchery)
                .map(|u| u.pos)
                .unwrap_or(Position::new(0, 0));
            self.spawn_mine(UnitKind::Larva, Position::new(hatch.x, hatch.y + 30));
        }
    }

    /// Fresh read-only view of the frame. Enemy units are filtered by sight
    /// unless full visibility was requested at match start.
    pub fn snapshot(&self) -> FrameSnapshot {
        let my_units: Vec<UnitView> = self.my_units.iter().map(unit_view).collect();

        let neutral_units: Vec<UnitView> = self
            .patches
            .iter()
            .map(|p| UnitView {
                id: p.id,
                kind: UnitKind::MineralField,
                pos: p.pos,
                idle: true,
                completed: true,
            })
            .collect();

        let enemy_units: Vec<UnitView> = self
            .enemy_units
            .iter()
            .filter(|e| {
                self.setup.perfect_information
                    || self
                        .my_units
                        .iter()
                        .any(|u| u.pos.distance(e.pos) <= SIGHT_RADIUS)
            })
            .map(|e| UnitView {
                id: e.id,
                kind: e.kind,
                pos: e.pos,
                idle: false,
                completed: true,
            })
            .collect();

        FrameSnapshot {
            frame_count: self.frame,
            my_units,
            neutral_units,
            enemy_units,
            player: PlayerView {
                minerals: self.minerals,
                supply_used: self.supply_used,
                supply_total: self.supply_total,
            },
            producible: self.producible(),
        }
    }

    /// Invariant check in the harness itself. A violation is a harness bug.
    pub fn validate(&self) -> Result<(), RuleCode> {
        let mut ids: Vec<u32> = self
            .my_units
            .iter()
            .map(|u| u.id.0)
            .chain(self.patches.iter().map(|p| p.id.0))
            .chain(self.enemy_units.iter().map(|e| e.id.0))
            .collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(RuleCode::UnitIdUnique);
        }

        let available_larvae = self
            .my_units
            .iter()
            .filter(|u| u.kind == UnitKind::Larva && !matches!(u.activity, Activity::Morphing { .. }))
            .count();
        if available_larvae > LARVA_CAP {
            return Err(RuleCode::LarvaCap);
        }

        let mut used = 0;
        let mut total = 0;
        for unit in &self.my_units {
            match unit.activity {
                Activity::Morphing { into, .. } => used += supply_cost(into),
                Activity::UnderConstruction { .. } => {}
                _ => {
                    used += supply_cost(unit.kind);
                    total += supply_provided(unit.kind);
                }
            }
        }
        if used != self.supply_used {
            return Err(RuleCode::SupplyUsedConsistency);
        }
        if total != self.supply_total {
            return Err(RuleCode::SupplyTotalConsistency);
        }

        if self.patches.iter().any(|p| p.amount == 0 || p.amount > PATCH_START_AMOUNT) {
            return Err(RuleCode::PatchAmountValid);
        }

        Ok(())
    }
}

fn unit_view(unit: &SimUnit) -> UnitView {
    UnitView {
        id: unit.id,
        kind: unit.kind,
        pos: unit.pos,
        idle: unit.activity == Activity::Idle,
        completed: !matches!(unit.activity, Activity::UnderConstruction { .. }),
    }
}
