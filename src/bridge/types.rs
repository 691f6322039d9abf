use serde::{Deserialize, Serialize};

/// Opaque unit identity. Stable for the lifetime of the unit; never reused
/// within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Larva,
    Drone,
    Overlord,
    Zergling,
    SpawningPool,
    Hatchery,
    MineralField,
    Marine,
    CommandCenter,
}

impl UnitKind {
    pub fn is_building(self) -> bool {
        matches!(
            self,
            Self::SpawningPool | Self::Hatchery | Self::CommandCenter
        )
    }

    /// Kinds a larva can be converted into.
    pub fn is_morph_target(self) -> bool {
        matches!(self, Self::Drone | Self::Overlord | Self::Zergling)
    }
}

/// Pixel position. Distances are euclidean, matching the bridge's pairwise
/// distance query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// One step of `speed` toward `target`, stopping exactly on arrival.
    pub fn step_toward(self, target: Position, speed: i32) -> Position {
        let dist = self.distance(target);
        if dist <= speed as f64 {
            return target;
        }
        let scale = speed as f64 / dist;
        Position {
            x: self.x + ((target.x - self.x) as f64 * scale).round() as i32,
            y: self.y + ((target.y - self.y) as f64 * scale).round() as i32,
        }
    }
}

/// Per-frame "can the controlled side currently make this kind" feasibility,
/// recomputed by the engine every tick from resources, supply room, and tech
/// prerequisites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducibleSet(u16);

impl ProducibleSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, kind: UnitKind) {
        self.0 |= 1 << kind as u16;
    }

    pub fn contains(self, kind: UnitKind) -> bool {
        self.0 & (1 << kind as u16) != 0
    }
}

impl FromIterator<UnitKind> for ProducibleSet {
    fn from_iter<I: IntoIterator<Item = UnitKind>>(kinds: I) -> Self {
        let mut set = Self::empty();
        for kind in kinds {
            set.insert(kind);
        }
        set
    }
}

/// A unit command issued by the policy. Commands reference units by id, never
/// by snapshot borrow; a command against a unit that vanished between snapshot
/// capture and issuance is rejected as a transient no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Command {
    /// Right-click a worker onto a resource patch.
    Harvest { worker: UnitId, patch: UnitId },
    /// Convert a larval unit into another kind, consuming the source.
    Morph { unit: UnitId, into: UnitKind },
    /// Send a worker to place a building at a position.
    Build {
        builder: UnitId,
        building: UnitKind,
        at: Position,
    },
    /// Attack-move toward a position.
    Attack { unit: UnitId, target: Position },
}

/// Engine configuration requested once at match start. Diagnostic toggles,
/// not part of the decision logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub game_speed: u32,
    pub user_input: bool,
    pub perfect_information: bool,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            game_speed: 0,
            user_input: false,
            perfect_information: false,
        }
    }
}
