//! Deterministic match harness. Stands in for the external engine so the
//! policies can be driven end to end without a live game: seeded start state,
//! frame stepping, command application with transient rejections, and
//! invariant validation.

pub mod constants;
pub mod game;

pub use game::MatchSim;
