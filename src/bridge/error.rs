use crate::bridge::types::{UnitId, UnitKind};
use std::fmt;

/// Transient, per-frame command rejection. Never fatal: the policy rederives
/// everything from the next snapshot, so a rejected command is simply dropped
/// and the situation re-evaluated a frame later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The referenced unit no longer exists (destroyed or consumed between
    /// snapshot capture and command issuance).
    UnknownUnit { unit: UnitId },
    NotOwned { unit: UnitId },
    WrongKind { unit: UnitId, expected: UnitKind },
    /// The unit already has a queued action this frame.
    Busy { unit: UnitId },
    InvalidMorphTarget { into: UnitKind },
    NotProducible { kind: UnitKind },
    InvalidTarget { unit: UnitId },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUnit { unit } => write!(f, "unknown unit #{}", unit.0),
            Self::NotOwned { unit } => write!(f, "unit #{} is not controlled by us", unit.0),
            Self::WrongKind { unit, expected } => {
                write!(f, "unit #{} is not a {expected:?}", unit.0)
            }
            Self::Busy { unit } => write!(f, "unit #{} already has a queued action", unit.0),
            Self::InvalidMorphTarget { into } => write!(f, "cannot morph into {into:?}"),
            Self::NotProducible { kind } => write!(f, "{kind:?} is not currently producible"),
            Self::InvalidTarget { unit } => write!(f, "invalid target unit #{}", unit.0),
        }
    }
}

impl std::error::Error for CommandError {}

/// Engine-state invariants checked by the match harness. A violation means
/// the harness itself is broken, not the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    UnitIdUnique,
    SupplyUsedConsistency,
    SupplyTotalConsistency,
    LarvaCap,
    PatchAmountValid,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitIdUnique => write!(f, "UNIT_ID_UNIQUE"),
            Self::SupplyUsedConsistency => write!(f, "SUPPLY_USED_CONSISTENCY"),
            Self::SupplyTotalConsistency => write!(f, "SUPPLY_TOTAL_CONSISTENCY"),
            Self::LarvaCap => write!(f, "LARVA_CAP"),
            Self::PatchAmountValid => write!(f, "PATCH_AMOUNT_VALID"),
        }
    }
}

impl std::error::Error for RuleCode {}
