use crate::events::PRIORITY_RAGE;
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;

/// Table talk. A taunt costs the thrower nothing mechanically but leaves a
/// grudge; a compliment is weak evidence of goodwill.
pub(crate) fn install(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::GestureThrown.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            if source == target {
                return Ok(None);
            }
            let tone = evt.event.magnitude;
            if let Some(entry) = evt.agents.get_mut(target) {
                if !entry.tracked() {
                    return Ok(None);
                }
                if tone < 0.0 {
                    entry.belief_mut().add_grudge(source, 0.6);
                    entry.belief_mut().add_rage_towards(source, 0.5);
                    entry.belief_mut().add_rage(0.3);
                } else if tone > 0.0 {
                    entry.belief_mut().add_evidence(source, 0.3);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_RAGE),
    );
}
