use crate::bridge::types::UnitKind;

pub const START_MINERALS: u32 = 50;
pub const START_DRONES: usize = 4;
pub const START_LARVAE: usize = 3;

pub const LARVA_CAP: usize = 3;
pub const LARVA_SPAWN_FRAMES: u32 = 60;

pub const DRONE_COST: u32 = 50;
pub const OVERLORD_COST: u32 = 100;
pub const ZERGLING_COST: u32 = 25;
pub const POOL_COST: u32 = 200;

pub const DRONE_MORPH_FRAMES: u32 = 40;
pub const OVERLORD_MORPH_FRAMES: u32 = 60;
pub const ZERGLING_MORPH_FRAMES: u32 = 40;
pub const POOL_BUILD_FRAMES: u32 = 120;

pub const SUPPLY_PER_HATCHERY: u32 = 2;
pub const SUPPLY_PER_OVERLORD: u32 = 8;
pub const DRONE_SUPPLY: u32 = 1;
pub const ZERGLING_SUPPLY: u32 = 1;

pub const HARVEST_TRIP_FRAMES: u32 = 30;
pub const HARVEST_YIELD: u32 = 8;
pub const PATCH_START_AMOUNT: u32 = 1_500;

pub const ZERGLING_SPEED: i32 = 8;
pub const ZERGLING_RANGE: f64 = 16.0;
pub const ZERGLING_DAMAGE: i32 = 5;
pub const MARINE_HP: i32 = 40;
pub const COMMAND_CENTER_HP: i32 = 150;

pub const SIGHT_RADIUS: f64 = 320.0;

pub fn mineral_cost(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::Drone => DRONE_COST,
        UnitKind::Overlord => OVERLORD_COST,
        UnitKind::Zergling => ZERGLING_COST,
        UnitKind::SpawningPool => POOL_COST,
        _ => 0,
    }
}

/// Supply consumed by a unit of this kind (reserved from morph issuance).
pub fn supply_cost(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::Drone => DRONE_SUPPLY,
        UnitKind::Zergling => ZERGLING_SUPPLY,
        _ => 0,
    }
}

/// Supply granted by a completed unit of this kind.
pub fn supply_provided(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::Hatchery => SUPPLY_PER_HATCHERY,
        UnitKind::Overlord => SUPPLY_PER_OVERLORD,
        _ => 0,
    }
}

pub fn morph_frames(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::Drone => DRONE_MORPH_FRAMES,
        UnitKind::Overlord => OVERLORD_MORPH_FRAMES,
        UnitKind::Zergling => ZERGLING_MORPH_FRAMES,
        _ => 0,
    }
}
