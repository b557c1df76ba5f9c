//! Belief-mutating handlers for normalized host notifications. All belief
//! writes happen here, strictly separated from scoring time.
//!
//! Channel priorities: bookkeeping (turn memory, stats) runs first so later
//! handlers see an up-to-date log, then the belief updates, then the
//! derived cues.

mod exposure;
mod gesture;
mod lord_axis;
mod rage;
mod relation;
mod tempo_cue;
mod turn_memory;

use veil_core::game::MatchContext;
use veil_core::host::{DomainEvent, GameMode, Host};

pub(crate) const PRIORITY_BOOKKEEPING: i32 = 9;
pub(crate) const PRIORITY_RAGE: i32 = 6;
pub(crate) const PRIORITY_LORD_AXIS: i32 = 5;
pub(crate) const PRIORITY_RELATION: i32 = 4;
pub(crate) const PRIORITY_EXPOSURE: i32 = 3;
pub(crate) const PRIORITY_TEMPO_CUE: i32 = 2;

/// Installs the full handler set on the match's event bus.
pub fn install_event_handlers(ctx: &mut MatchContext) {
    turn_memory::install(ctx);
    rage::install(ctx);
    gesture::install(ctx);
    lord_axis::install(ctx);
    relation::install(ctx);
    exposure::install(ctx);
    tempo_cue::install(ctx);
}

/// Host-facing entry point: forwards a notification onto the bus, unless
/// the match is not a hidden-role match, in which case the whole mental
/// model stays inert.
pub fn ingest(ctx: &mut MatchContext, host: &dyn Host, event: DomainEvent) {
    if host.mode() != GameMode::HiddenRole {
        return;
    }
    ctx.emit_domain_event(event);
}
