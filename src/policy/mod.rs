pub mod sixpool;

use crate::bridge::snapshot::FrameSnapshot;
use crate::bridge::types::{Command, MatchSetup, UnitId};
use serde::Serialize;
use sixpool::{sixpool_configs, SixPoolPolicy};

/// Callback interface the host engine drives. `match_start` is invoked once,
/// `frame` once per simulation tick, strictly sequentially; the policy must
/// return before the next snapshot is produced (no blocking, no I/O).
pub trait AgentPolicy {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Reset internal state and report the engine toggles this policy wants.
    fn match_start(&mut self) -> MatchSetup;

    /// One decision pass over the frame's snapshot.
    fn frame(&mut self, snapshot: &FrameSnapshot) -> Vec<Command>;

    fn match_end(&mut self, _winner: bool) {}

    fn unit_discover(&mut self, _unit: UnitId) {}
    fn unit_destroy(&mut self, _unit: UnitId) {}
}

#[derive(Clone, Debug, Serialize)]
pub struct PolicyManifestEntry {
    pub id: String,
    pub family: String,
    pub description: String,
    pub config_hash: String,
    pub config: serde_json::Value,
}

/// Baseline that issues nothing. Useful as a control in sweeps and tests.
pub struct IdlePolicy;

impl AgentPolicy for IdlePolicy {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Issues no commands; baseline for runner comparisons."
    }

    fn match_start(&mut self) -> MatchSetup {
        MatchSetup::default()
    }

    fn frame(&mut self, _snapshot: &FrameSnapshot) -> Vec<Command> {
        Vec::new()
    }
}

pub fn policy_ids() -> Vec<&'static str> {
    let mut ids = vec!["idle"];
    ids.extend(sixpool_configs().iter().map(|cfg| cfg.id));
    ids
}

pub fn describe_policies() -> Vec<(&'static str, &'static str)> {
    let mut out = vec![("idle", "Issues no commands; baseline for runner comparisons.")];
    out.extend(
        sixpool_configs()
            .iter()
            .map(|cfg| (cfg.id, cfg.description)),
    );
    out
}

pub fn create_policy(id: &str) -> Option<Box<dyn AgentPolicy>> {
    if id == "idle" {
        return Some(Box::new(IdlePolicy));
    }
    sixpool_configs()
        .iter()
        .find(|cfg| cfg.id == id)
        .map(|cfg| Box::new(SixPoolPolicy::new(*cfg)) as Box<dyn AgentPolicy>)
}

pub fn policy_fingerprint(id: &str) -> Option<String> {
    if id == "idle" {
        return Some(fingerprint_bytes(b"idle"));
    }
    let cfg = sixpool_configs().iter().find(|cfg| cfg.id == id)?;
    let encoded = serde_json::to_vec(cfg).ok()?;
    Some(fingerprint_bytes(&encoded))
}

pub fn policy_manifest_entries() -> Vec<PolicyManifestEntry> {
    let mut entries = vec![PolicyManifestEntry {
        id: "idle".to_string(),
        family: "baseline".to_string(),
        description: "Issues no commands; baseline for runner comparisons.".to_string(),
        config_hash: fingerprint_bytes(b"idle"),
        config: serde_json::Value::Null,
    }];

    for cfg in sixpool_configs() {
        let config = serde_json::to_value(cfg).expect("config should serialize");
        let encoded = serde_json::to_vec(cfg).expect("config should serialize");
        entries.push(PolicyManifestEntry {
            id: cfg.id.to_string(),
            family: "sixpool".to_string(),
            description: cfg.description.to_string(),
            config_hash: fingerprint_bytes(&encoded),
            config,
        });
    }

    entries
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    let folded = bytes
        .iter()
        .fold(0u32, |acc, b| acc.rotate_left(5) ^ (*b as u32));
    format!("{folded:08x}")
}
