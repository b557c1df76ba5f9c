use crate::events::PRIORITY_TEMPO_CUE;
use veil_core::belief::TurnEventKind;
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;
use veil_core::model::AgentId;

/// Reads the timing of a strike, not its outcome: an opening strike means a
/// loaded hand, a strike after a long quiet turn means scraping the barrel.
/// Runs after bookkeeping, so the observer's turn log already contains the
/// play being judged.
fn cue_from_log(evt: &EventCtx, observer: AgentId, actor: AgentId) -> f64 {
    let Some(entry) = evt.agents.get(observer) else {
        return 0.0;
    };
    let memory = entry.runtime().turn_memory();
    let plays = memory.plays_by(actor);
    let strikes = memory.plays_of(actor, "strike");
    let progress_before = plays.saturating_sub(1);
    let first_strike = strikes <= 1;

    // Label of the play right before this one, if any.
    let previous = memory
        .events()
        .iter()
        .filter(|e| e.kind == TurnEventKind::CardPlay && e.source == Some(actor))
        .rev()
        .nth(1)
        .and_then(|e| e.label.as_deref());

    let mut delta = if progress_before <= 1 {
        0.45
    } else if progress_before <= 3 {
        0.2
    } else if progress_before >= 6 && first_strike {
        -0.15
    } else {
        0.0
    };
    if previous == Some("strike") {
        delta += 0.12;
    } else if strikes >= 2 {
        delta += 0.08;
    }
    if strikes >= 3 {
        delta += 0.08;
    }
    delta
}

pub(crate) fn install(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::CardUsed.channel(),
        |evt: &mut EventCtx| {
            let Some(actor) = evt.event.source else {
                return Ok(None);
            };
            if evt.event.cause.root_name() != Some("strike") {
                return Ok(None);
            }
            let round = evt.round;
            for observer in evt.agents.tracked_ids() {
                if observer == actor {
                    continue;
                }
                let delta = cue_from_log(evt, observer, actor);
                if delta == 0.0 {
                    continue;
                }
                if let Some(entry) = evt.agents.get_mut(observer) {
                    entry.runtime_mut().update_tempo(actor, delta, round);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_TEMPO_CUE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::turn_memory;
    use veil_core::game::MatchConfig;
    use veil_core::host::DomainEvent;
    use veil_core::model::{CauseChain, CauseLink, Identity};

    fn agent(n: u8) -> AgentId {
        AgentId::new(n)
    }

    fn fresh() -> MatchContext {
        let mut ctx = MatchContext::new(29, MatchConfig::default());
        ctx.add_agent(agent(0), Identity::Lord, true);
        ctx.add_agent(agent(1), Identity::Loyalist, true);
        ctx.add_agent(agent(2), Identity::Rebel, true);
        turn_memory::install(&mut ctx);
        install(&mut ctx);
        ctx.begin_turn(1, agent(2));
        ctx
    }

    fn play(name: &str, magnitude: f64) -> DomainEvent {
        DomainEvent::card_used(agent(2), Some(agent(1)))
            .with_magnitude(magnitude)
            .with_cause(CauseChain::from_links(vec![CauseLink {
                name: name.to_string(),
                source: Some(agent(2)),
                inverts: false,
            }]))
    }

    #[test]
    fn an_opening_strike_reads_as_a_loaded_hand() {
        let mut ctx = fresh();
        ctx.emit_domain_event(play("strike", -1.0));
        let record = ctx.agents().get(agent(1)).unwrap().runtime().tempo(agent(2));
        assert!((record.strike - 0.45).abs() < 1e-9);
        assert_eq!(record.samples, 1);
    }

    #[test]
    fn a_late_first_strike_reads_as_an_empty_hand() {
        let mut ctx = fresh();
        for _ in 0..7 {
            ctx.emit_domain_event(play("brew", 0.5));
        }
        ctx.emit_domain_event(play("strike", -1.0));
        let record = ctx.agents().get(agent(1)).unwrap().runtime().tempo(agent(2));
        assert!(record.strike < 0.0);
    }

    #[test]
    fn back_to_back_strikes_stack_the_cue() {
        let mut ctx = fresh();
        ctx.emit_domain_event(play("strike", -1.0));
        ctx.emit_domain_event(play("strike", -1.0));
        let record = ctx.agents().get(agent(1)).unwrap().runtime().tempo(agent(2));
        // First cue 0.45, decayed once, plus the consecutive-strike read.
        assert!((record.strike - (0.45 * 0.85 + 0.45 + 0.12)).abs() < 1e-9);
    }

    #[test]
    fn non_strike_plays_leave_tempo_alone() {
        let mut ctx = fresh();
        ctx.emit_domain_event(play("brew", 0.5));
        let record = ctx.agents().get(agent(1)).unwrap().runtime().tempo(agent(2));
        assert_eq!(record.samples, 0);
    }
}
