use std::sync::OnceLock;
use tracing::{Level, event};
use veil_core::game::MatchContext;

/// Routes isolated handler failures from both buses into tracing. The
/// chains keep running either way; this only makes the failures visible.
pub fn install_tracing_sinks(ctx: &mut MatchContext) {
    ctx.set_event_error_sink(|channel, err| {
        event!(
            target: "veil_rules::events",
            Level::WARN,
            channel,
            error = %err,
            "event handler failed; continuing chain"
        );
    });
    ctx.set_score_error_sink(|channel, err| {
        event!(
            target: "veil_rules::score",
            Level::WARN,
            channel,
            error = %err,
            "scoring rule failed; continuing chain"
        );
    });
}

/// Verbose per-candidate rule breakdown, gated behind VEIL_SCORE_DETAILS.
pub(crate) fn score_details_enabled() -> bool {
    static CACHED: OnceLock<bool> = OnceLock::new();
    *CACHED.get_or_init(|| match std::env::var("VEIL_SCORE_DETAILS") {
        Ok(raw) => {
            let trimmed = raw.trim();
            !trimmed.is_empty() && trimmed != "0"
        }
        Err(_) => false,
    })
}
