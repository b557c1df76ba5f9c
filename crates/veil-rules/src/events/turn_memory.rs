use crate::events::PRIORITY_BOOKKEEPING;
use veil_core::belief::{TurnEvent, TurnEventKind};
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;

/// Fans one turn event out into every tracked observer's scratch log.
fn record_for_all(evt: &mut EventCtx, event: TurnEvent) {
    for observer in evt.agents.tracked_ids() {
        if let Some(entry) = evt.agents.get_mut(observer) {
            entry.runtime_mut().turn_memory_mut().record(event.clone());
        }
    }
}

/// Pure bookkeeping at the highest priority: the turn log and the public
/// stats counters are current before any belief handler reads them.
pub(crate) fn install(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::Damage.channel(),
        |evt: &mut EventCtx| {
            let amount = evt.event.magnitude;
            if !(amount > 0.0) {
                return Ok(None);
            }
            // Sourceless damage (judgement, poison) is a plain life loss and
            // earns nobody contribution credit.
            let kind = match evt.event.source {
                Some(_) => TurnEventKind::Damage,
                None => TurnEventKind::LifeLoss,
            };
            record_for_all(
                evt,
                TurnEvent::new(kind)
                    .between(evt.event.source, evt.event.target)
                    .magnitude(amount),
            );
            if let Some(source) = evt.event.source {
                if evt.event.target != Some(source) {
                    if let Some(entry) = evt.agents.get_mut(source) {
                        entry.stats_mut().record_damage(amount);
                    }
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_BOOKKEEPING),
    );

    ctx.install_event_hook(
        DomainEventKind::Heal.channel(),
        |evt: &mut EventCtx| {
            let amount = evt.event.magnitude;
            if !(amount > 0.0) {
                return Ok(None);
            }
            record_for_all(
                evt,
                TurnEvent::new(TurnEventKind::Heal)
                    .between(evt.event.source, evt.event.target)
                    .magnitude(amount),
            );
            Ok(None)
        },
        HookOptions::priority(PRIORITY_BOOKKEEPING),
    );

    ctx.install_event_hook(
        DomainEventKind::CardsDrawn.channel(),
        |evt: &mut EventCtx| {
            let count = evt.event.magnitude;
            if !(count > 0.0) {
                return Ok(None);
            }
            record_for_all(
                evt,
                TurnEvent::new(TurnEventKind::Draw)
                    .between(evt.event.source, None)
                    .magnitude(count),
            );
            if let Some(source) = evt.event.source {
                if let Some(entry) = evt.agents.get_mut(source) {
                    entry.stats_mut().record_draws(count as u32);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_BOOKKEEPING),
    );

    ctx.install_event_hook(
        DomainEventKind::DiscardTransfer.channel(),
        |evt: &mut EventCtx| {
            record_for_all(
                evt,
                TurnEvent::new(TurnEventKind::Discard)
                    .between(evt.event.source, evt.event.target)
                    .magnitude(evt.event.magnitude),
            );
            Ok(None)
        },
        HookOptions::priority(PRIORITY_BOOKKEEPING),
    );

    ctx.install_event_hook(
        DomainEventKind::CardUsed.channel(),
        |evt: &mut EventCtx| {
            log_play(evt, "card");
            Ok(None)
        },
        HookOptions::priority(PRIORITY_BOOKKEEPING),
    );

    // Skills are plays too as far as the log and the recent-attack marker
    // are concerned; their belief effects arrive as separate damage/heal
    // events.
    ctx.install_event_hook(
        DomainEventKind::SkillUsed.channel(),
        |evt: &mut EventCtx| {
            log_play(evt, "skill");
            Ok(None)
        },
        HookOptions::priority(PRIORITY_BOOKKEEPING),
    );
}

fn log_play(evt: &mut EventCtx, fallback_label: &str) {
    let Some(actor) = evt.event.source else {
        return;
    };
    let label = evt.event.cause.root_name().map(str::to_owned);
    let mut play = TurnEvent::new(TurnEventKind::CardPlay)
        .between(Some(actor), evt.event.target)
        .magnitude(evt.event.magnitude);
    if let Some(name) = &label {
        play = play.labeled(name.clone());
    }
    record_for_all(evt, play);

    // The recent-attack marker tracks only the actor's latest play: any
    // newer play supersedes it, offensive or not.
    let round = evt.round;
    let target = evt.event.target;
    let offensive = evt.event.magnitude < 0.0;
    if let Some(entry) = evt.agents.get_mut(actor) {
        entry.runtime_mut().clear_attack();
        if offensive {
            if let Some(target) = target.filter(|t| *t != actor) {
                entry.runtime_mut().mark_attack(
                    target,
                    label.unwrap_or_else(|| fallback_label.to_string()),
                    round,
                );
            }
        }
    }
}
