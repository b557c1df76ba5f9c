//! Scoring pipeline plumbing: the mutable context threaded through the rule
//! chain for one decision point. The rules themselves live in the rules
//! crate; this module only defines the contract they share.

mod context;

pub use context::{
    Candidate, RiskClass, SCORE_EVENT, ScoreCtx, ScoreKind, ScoreStage, ScoreView, VETO_PENALTY,
};
