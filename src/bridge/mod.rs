//! Data model of the engine bridge: the read-only per-frame snapshot the host
//! engine exposes and the commands an agent may issue against it.

pub mod error;
pub mod snapshot;
pub mod types;
