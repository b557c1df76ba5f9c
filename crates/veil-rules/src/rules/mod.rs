//! The default scoring rule catalogue. Every rule is a pure function of the
//! score context that returns an additive delta; registration wraps it with
//! the optional telemetry breakdown and feeds the delta through
//! `ScoreCtx::add`, so a rule can never do anything but shift the score.

mod alignment;
mod anger;
mod lord_guard;
mod ordering;
mod storage;
mod tempo;
mod texture;

use crate::telemetry::score_details_enabled;
use tracing::{Level, event};
use veil_core::game::MatchContext;
use veil_core::score::ScoreCtx;

pub(crate) const PRIORITY_LORD_GUARD: i32 = 8;
pub(crate) const PRIORITY_VETO: i32 = 7;
pub(crate) const PRIORITY_ALLY_SHIELD: i32 = 6;
pub(crate) const PRIORITY_ANGER: i32 = 5;
pub(crate) const PRIORITY_GRUDGE: i32 = 4;
pub(crate) const PRIORITY_TEMPO: i32 = 3;
pub(crate) const PRIORITY_ORDERING: i32 = 2;
pub(crate) const PRIORITY_STORAGE: i32 = 2;
pub(crate) const PRIORITY_NOISE: i32 = 1;

/// Registers one named pure rule on the scoring bus.
pub(crate) fn register(
    ctx: &mut MatchContext,
    name: &'static str,
    priority: i32,
    rule: fn(&ScoreCtx) -> f64,
) {
    ctx.install_scoring_hook(
        move |score: &mut ScoreCtx| {
            let delta = rule(score);
            if delta != 0.0 && score_details_enabled() {
                event!(
                    target: "veil_rules::score",
                    Level::DEBUG,
                    rule = name,
                    candidate = %score.candidate.id,
                    delta,
                    total = score.score + delta,
                );
            }
            score.add(delta);
            Ok(None)
        },
        priority,
    );
}

/// Installs the whole catalogue on the match's scoring bus.
pub fn install_default_rules(ctx: &mut MatchContext) {
    lord_guard::install(ctx);
    alignment::install(ctx);
    anger::install(ctx);
    tempo::install(ctx);
    ordering::install(ctx);
    storage::install(ctx);
    texture::install(ctx);
}
