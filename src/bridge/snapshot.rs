use crate::bridge::types::{Position, ProducibleSet, UnitId, UnitKind};

/// Read-only view of one unit as of the current frame. Valid for that frame
/// only; the snapshot is replaced every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub pos: Position,
    /// No queued action; eligible for new commands this frame.
    pub idle: bool,
    /// Construction or morph finished.
    pub completed: bool,
}

/// Aggregate counters for the controlled side. Supply is reported directly,
/// one point per point; any doubling is a quirk of particular engine bindings
/// and does not appear here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerView {
    pub minerals: u32,
    pub supply_used: u32,
    pub supply_total: u32,
}

/// Everything the policy may read on a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub frame_count: u32,
    pub my_units: Vec<UnitView>,
    pub neutral_units: Vec<UnitView>,
    pub enemy_units: Vec<UnitView>,
    pub player: PlayerView,
    pub producible: ProducibleSet,
}

impl FrameSnapshot {
    pub fn count_mine(&self, kind: UnitKind) -> usize {
        self.my_units.iter().filter(|u| u.kind == kind).count()
    }

    pub fn can_make(&self, kind: UnitKind) -> bool {
        self.producible.contains(kind)
    }
}

impl Default for UnitView {
    fn default() -> Self {
        Self {
            id: UnitId(0),
            kind: UnitKind::Larva,
            pos: Position::new(0, 0),
            idle: true,
            completed: true,
        }
    }
}
