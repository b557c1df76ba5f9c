pub mod config;
pub mod match_state;

pub use config::{MatchConfig, PersonaToggles, PersonaWeights};
pub use match_state::{EventCtx, MatchContext};
