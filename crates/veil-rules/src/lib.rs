#![deny(warnings)]
pub mod attitude;
pub mod events;
pub mod pipeline;
pub mod rules;
pub mod telemetry;

pub use attitude::perceived_attitude;
pub use events::{ingest, install_event_handlers};
pub use pipeline::{Decision, candidate_from_host, choose, score_candidate};
pub use rules::install_default_rules;
pub use telemetry::install_tracing_sinks;

use veil_core::game::MatchContext;

/// Full default wiring for one match: tracing sinks, domain-event handlers,
/// and the built-in scoring rule catalogue.
pub fn install_defaults(ctx: &mut MatchContext) {
    install_tracing_sinks(ctx);
    install_event_handlers(ctx);
    install_default_rules(ctx);
}
