use crate::events::PRIORITY_RAGE;
use veil_core::game::{EventCtx, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::DomainEventKind;
use veil_core::persona::PersonaId;

/// How sharply a persona's anger rises on harm taken.
fn gain(persona: PersonaId) -> f64 {
    match persona {
        PersonaId::Impulsive => 1.15,
        PersonaId::Petty => 1.05,
        PersonaId::Camouflage => 0.9,
        PersonaId::Balanced => 1.0,
    }
}

/// How readily healing settles a persona back down.
fn calm(persona: PersonaId) -> f64 {
    match persona {
        PersonaId::Impulsive => 0.9,
        PersonaId::Petty => 0.95,
        PersonaId::Camouflage => 1.05,
        PersonaId::Balanced => 1.0,
    }
}

/// True when the transfer ripped something out of a board zone rather than
/// the hand; losing placed resources stings more.
fn board_zone(evt: &EventCtx) -> bool {
    matches!(
        evt.event.cause.root_name(),
        Some("equipment") | Some("judgement")
    )
}

pub(crate) fn install(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::Damage.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            let amount = evt.event.magnitude;
            if source == target || !(amount > 0.0) {
                return Ok(None);
            }
            if let Some(entry) = evt.agents.get_mut(target) {
                if entry.tracked() {
                    let g = gain(entry.persona().id());
                    entry.belief_mut().add_rage(amount * 1.4 * g);
                    entry.belief_mut().add_rage_towards(source, amount * 1.9 * g);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_RAGE),
    );

    ctx.install_event_hook(
        DomainEventKind::Heal.channel(),
        |evt: &mut EventCtx| {
            let Some(target) = evt.event.target else {
                return Ok(None);
            };
            let amount = evt.event.magnitude;
            if !(amount > 0.0) {
                return Ok(None);
            }
            if let Some(entry) = evt.agents.get_mut(target) {
                if entry.tracked() {
                    let c = calm(entry.persona().id());
                    entry.belief_mut().add_rage(-amount * c);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_RAGE),
    );

    ctx.install_event_hook(
        DomainEventKind::DiscardTransfer.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            let count = evt.event.magnitude;
            if source == target || !(count > 0.0) {
                return Ok(None);
            }
            let zone_factor = if board_zone(evt) { 1.2 } else { 1.0 };
            if let Some(entry) = evt.agents.get_mut(target) {
                if entry.tracked() {
                    let g = gain(entry.persona().id());
                    entry.belief_mut().add_rage(count * 0.9 * zone_factor * g);
                    entry
                        .belief_mut()
                        .add_rage_towards(source, count * 1.2 * zone_factor * g);
                }
            }
            Ok(None)
        },
        HookOptions::priority(PRIORITY_RAGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::game::MatchConfig;
    use veil_core::host::DomainEvent;
    use veil_core::model::{AgentId, CauseChain, CauseLink, Identity};

    fn agent(n: u8) -> AgentId {
        AgentId::new(n)
    }

    fn fresh() -> MatchContext {
        let mut cfg = MatchConfig::default();
        // Pin personas so the multipliers are predictable.
        cfg.personas.impulsive = false;
        cfg.personas.petty = false;
        cfg.personas.camouflage = false;
        let mut ctx = MatchContext::new(7, cfg);
        ctx.add_agent(agent(0), Identity::Lord, true);
        ctx.add_agent(agent(1), Identity::Loyalist, true);
        ctx.add_agent(agent(2), Identity::Rebel, true);
        install(&mut ctx);
        ctx
    }

    #[test]
    fn damage_raises_both_anger_axes() {
        let mut ctx = fresh();
        ctx.emit_domain_event(DomainEvent::damage(agent(2), agent(1), 2.0));
        let belief = ctx.agents().get(agent(1)).unwrap().belief();
        assert!((belief.rage() - 2.0 * 1.4).abs() < 1e-9);
        assert!((belief.rage_towards(agent(2)) - 2.0 * 1.9).abs() < 1e-9);
    }

    #[test]
    fn healing_settles_rage_back_down() {
        let mut ctx = fresh();
        ctx.emit_domain_event(DomainEvent::damage(agent(2), agent(1), 3.0));
        ctx.emit_domain_event(DomainEvent::heal(agent(0), agent(1), 2.0));
        let belief = ctx.agents().get(agent(1)).unwrap().belief();
        assert!((belief.rage() - (3.0 * 1.4 - 2.0)).abs() < 1e-9);
    }

    #[test]
    fn board_zone_theft_stings_more_than_hand_theft() {
        let mut ctx = fresh();
        let mut hand = DomainEvent::new(DomainEventKind::DiscardTransfer);
        hand.source = Some(agent(2));
        hand.target = Some(agent(1));
        hand.magnitude = 1.0;
        ctx.emit_domain_event(hand);
        let after_hand = ctx
            .agents()
            .get(agent(1))
            .unwrap()
            .belief()
            .rage_towards(agent(2));

        let mut ctx = fresh();
        let mut board = DomainEvent::new(DomainEventKind::DiscardTransfer);
        board.source = Some(agent(2));
        board.target = Some(agent(1));
        board.magnitude = 1.0;
        let board = board.with_cause(CauseChain::from_links(vec![CauseLink {
            name: "equipment".to_string(),
            source: None,
            inverts: false,
        }]));
        ctx.emit_domain_event(board);
        let after_board = ctx
            .agents()
            .get(agent(1))
            .unwrap()
            .belief()
            .rage_towards(agent(2));
        assert!(after_board > after_hand);
    }

    #[test]
    fn self_damage_is_not_a_grievance() {
        let mut ctx = fresh();
        ctx.emit_domain_event(DomainEvent::damage(agent(1), agent(1), 2.0));
        assert_eq!(ctx.agents().get(agent(1)).unwrap().belief().rage(), 0.0);
    }
}
