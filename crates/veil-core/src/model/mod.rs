pub mod agent;
pub mod cause;
pub mod identity;
pub mod snapshot;

pub use agent::{AgentId, CapabilitySet};
pub use cause::{CauseChain, CauseLink, MAX_CAUSE_DEPTH};
pub use identity::{Camp, Guess, Identity};
pub use snapshot::AgentSnapshot;
