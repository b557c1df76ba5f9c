use crate::events::PRIORITY_RELATION;
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;

/// Relation-based evidence: an act toward someone I have already read
/// tells me about the actor. Helping my ally makes the actor look like my
/// ally; harming my ally makes it look like my enemy, and vice versa.
///
/// Only `evidence` is written here; the lord-axis handlers own the faction
/// axis, so a single act never lands on both fields.
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
            // Counterspell nesting flips helpful/harmful per inversion; a
            // chain past the depth cap reports neutral polarity and the
            // whole update is skipped ("cause unknown").
            let value = evt.event.magnitude * evt.event.cause.polarity();
            if value == 0.0 || !value.is_finite() {
                return Ok(None);
            }
            // Acts against the lord or a revealed seat are the faction-axis
            // handlers' business; reading them here would land the same act
            // on two belief fields.
            if evt.agents.lord() == Some(target) {
                return Ok(None);
            }
            if let Some(entry) = evt.agents.get(target) {
                if entry.public().revealed().is_some() {
                    return Ok(None);
                }
            }

            for observer in evt.agents.tracked_ids() {
                if observer == actor {
                    continue;
                }
                let Some(entry) = evt.agents.get_mut(observer) else {
                    continue;
                };
                let relation = if observer == target {
                    1.0
                } else {
                    let belief = entry.belief();
                    ((belief.first_impression(target) + belief.evidence(target)) / 10.0)
                        .clamp(-1.0, 1.0)
                };
                // Below 0.3 the observer has no stake in the target; the
                // weight ramps to full at 0.6.
                let stake = ((relation.abs() - 0.3) / 0.3).clamp(0.0, 1.0);
                if stake == 0.0 {
                    continue;
                }
                let magnitude = (value.abs() * 0.6).clamp(0.0, 1.2) * stake;
                let direction = relation.signum() * value.signum();
                entry.belief_mut().add_evidence(actor, direction * magnitude);
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_RELATION),
    );
}
