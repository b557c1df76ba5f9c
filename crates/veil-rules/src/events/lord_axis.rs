use crate::events::PRIORITY_LORD_AXIS;
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;
use veil_core::model::AgentId;

/// Lord-axis inference: who an act toward the lord says the actor is.
///
/// These handlers write only the lord-axis fields (`lord_signal`,
/// `lord_help`, `lord_harm`), never `evidence`; one resolved event feeds
/// exactly one belief axis so it can never be counted twice at read time.
pub(crate) fn install(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::Damage.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            let amount = evt.event.magnitude;
            if !(amount > 0.0) || source == target {
                return Ok(None);
            }
            if evt.agents.lord() != Some(target) {
                return Ok(None);
            }
            let weight = 0.8 + amount * 0.3;
            for observer in observers_of(evt, source) {
                if let Some(entry) = evt.agents.get_mut(observer) {
                    entry.belief_mut().add_lord_signal(source, -weight);
                    entry.belief_mut().add_lord_harm(source, amount);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_LORD_AXIS),
    );

    ctx.install_event_hook(
        DomainEventKind::Heal.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            let amount = evt.event.magnitude;
            if !(amount > 0.0) || source == target {
                return Ok(None);
            }
            if evt.agents.lord() != Some(target) {
                return Ok(None);
            }
            for observer in observers_of(evt, source) {
                if let Some(entry) = evt.agents.get_mut(observer) {
                    entry.belief_mut().add_lord_signal(source, 0.8 * amount);
                    entry.belief_mut().add_lord_help(source, 0.8 * amount);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_LORD_AXIS),
    );

    // A strike aimed at the lord leaks intent even when it misses.
    ctx.install_event_hook(
        DomainEventKind::CardUsed.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            if evt.agents.lord() != Some(target) {
                return Ok(None);
            }
            if evt.event.cause.root_name() != Some("strike") {
                return Ok(None);
            }
            for observer in observers_of(evt, source) {
                if let Some(entry) = evt.agents.get_mut(observer) {
                    entry.belief_mut().add_lord_signal(source, -0.35);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_LORD_AXIS),
    );
}

/// Everyone who gets to update their read of `actor`: every tracked living
/// seat except the actor itself, which already knows its own role.
fn observers_of(evt: &EventCtx, actor: AgentId) -> Vec<AgentId> {
    evt.agents
        .tracked_ids()
        .into_iter()
        .filter(|id| *id != actor)
        .collect()
}
