pub mod bridge;
pub mod policy;
pub mod runner;
pub mod sim;
pub mod sweep;

pub use bridge::error::{CommandError, RuleCode};
pub use bridge::snapshot::{FrameSnapshot, PlayerView, UnitView};
pub use bridge::types::{Command, MatchSetup, Position, ProducibleSet, UnitId, UnitKind};
pub use policy::{create_policy, describe_policies, policy_ids, AgentPolicy};
pub use runner::{run_policy, run_policy_instance, RunMetrics, RunReport};
