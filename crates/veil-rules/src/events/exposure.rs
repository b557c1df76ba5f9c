use crate::events::PRIORITY_EXPOSURE;
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;
use veil_core::model::Camp;

/// How much a visible act against a known seat raises the actor's own
/// exposure, and what it says about the actor's faction.
///
/// Writes `shown` and `lord_signal` only. Acts toward revealed seats carry
/// faction information (you strike the enemy of your camp's enemy), so they
/// feed the lord axis, never raw evidence.
pub(crate) fn install(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::CardUsed.channel(),
        |evt: &mut EventCtx| {
            let (Some(actor), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            if actor == target {
                return Ok(None);
            }
            let value = evt.event.magnitude * evt.event.cause.polarity();
            if value == 0.0 || !value.is_finite() {
                return Ok(None);
            }
            let Some(target_entry) = evt.agents.get(target) else {
                return Ok(None);
            };
            let revealed_camp = target_entry.public().revealed().map(|id| id.camp());
            let target_shown = target_entry.public().shown();

            // Acting on an exposed seat exposes you in turn.
            let exposure = if value < 0.0 && revealed_camp.is_some() {
                Some(0.95)
            } else if value > 0.0 && (revealed_camp.is_some() || target_shown >= 0.7) {
                Some(0.85)
            } else {
                None
            };
            let actor_shown = evt
                .agents
                .get(actor)
                .map(|entry| entry.public().shown())
                .unwrap_or(0.0);
            if let (Some(level), Some(entry)) = (exposure, evt.agents.get_mut(actor)) {
                entry.public_mut().raise_shown(level);
            }

            // Indirect faction read: harming a known rebel leans lord-side,
            // helping one leans rebel, and symmetrically for lord-siders.
            // An already-exposed actor's acts say less that is new.
            let align = match revealed_camp {
                Some(Camp::LordSide) => 1.0,
                Some(Camp::Rebel) => -1.0,
                Some(Camp::Other) | None => return Ok(None),
            };
            let weight = if actor_shown >= 0.85 {
                0.6
            } else if actor_shown >= 0.7 {
                0.8
            } else {
                1.0
            };
            let signal = value.signum() * align * value.abs().min(2.0) * 0.6 * weight;
            for observer in evt.agents.tracked_ids() {
                if observer == actor {
                    continue;
                }
                if let Some(entry) = evt.agents.get_mut(observer) {
                    entry.belief_mut().add_lord_signal(actor, signal);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_EXPOSURE),
    );
}
