use veil_core::game::{EventCtx, MatchConfig, MatchContext};
use veil_core::hooks::HookOptions;
use veil_core::host::{DomainEvent, DomainEventKind};
use veil_core::model::{AgentId, Identity};
use veil_core::wait::{WaitOutcome, WaitState};
use std::cell::RefCell;
use std::rc::Rc;

fn agent(n: u8) -> AgentId {
    AgentId::new(n)
}

fn five_seat_match(seed: u64) -> MatchContext {
    let mut ctx = MatchContext::new(seed, MatchConfig::default());
    ctx.add_agent(agent(0), Identity::Lord, true);
    ctx.add_agent(agent(1), Identity::Loyalist, true);
    ctx.add_agent(agent(2), Identity::Rebel, true);
    ctx.add_agent(agent(3), Identity::Rebel, true);
    ctx.add_agent(agent(4), Identity::Turncoat, true);
    ctx
}

/// Wires a minimal damage handler so the flow below mutates beliefs the way
/// a real rule module would.
fn install_lord_watch(ctx: &mut MatchContext) {
    ctx.install_event_hook(
        DomainEventKind::Damage.channel(),
        |evt: &mut EventCtx| {
            let (Some(source), Some(target)) = (evt.event.source, evt.event.target) else {
                return Ok(None);
            };
            if evt.agents.lord() != Some(target) {
                return Ok(None);
            }
            let weight = 0.8 + evt.event.magnitude * 0.3;
            for observer in evt.agents.tracked_ids() {
                if observer == source {
                    continue;
                }
                if let Some(entry) = evt.agents.get_mut(observer) {
                    entry.belief_mut().add_lord_signal(source, -weight);
                    entry.belief_mut().add_lord_harm(source, evt.event.magnitude);
                }
            }
            Ok(None)
        },
        HookOptions::priority(5),
    );
}

#[test]
fn repeated_lord_damage_converges_every_observer_on_rebel() {
    let mut ctx = five_seat_match(99);
    install_lord_watch(&mut ctx);

    for round in 1..=3 {
        ctx.begin_turn(round, agent(2));
        ctx.emit_domain_event(DomainEvent::damage(agent(2), agent(0), 2.0));
    }

    for observer in [agent(0), agent(1), agent(3), agent(4)] {
        let guess = ctx.guess(observer, agent(2));
        assert_eq!(
            guess.identity,
            Identity::Rebel,
            "observer {observer:?} should read the repeat attacker as a rebel"
        );
        assert!(guess.confidence > 0.3);
    }
    let consensus = ctx.consensus(agent(2));
    assert_eq!(consensus.identity, Identity::Rebel);
    assert!(consensus.confidence > 0.5);
}

#[test]
fn decay_erodes_stale_reads_between_turns() {
    let mut ctx = five_seat_match(7);
    install_lord_watch(&mut ctx);
    ctx.begin_turn(1, agent(1));
    ctx.emit_domain_event(DomainEvent::damage(agent(2), agent(0), 1.0));

    let fresh = ctx
        .agents()
        .get(agent(1))
        .unwrap()
        .belief()
        .lord_signal(agent(2));
    assert!(fresh < 0.0);

    // Many quiet turns for the same observer erode the read to nothing.
    for round in 2..=60 {
        ctx.begin_turn(round, agent(1));
    }
    let stale = ctx
        .agents()
        .get(agent(1))
        .unwrap()
        .belief()
        .lord_signal(agent(2));
    assert_eq!(stale, 0.0, "stale signals should decay and snap to zero");
}

#[test]
fn removal_silences_a_seat_everywhere() {
    let mut ctx = five_seat_match(31);
    install_lord_watch(&mut ctx);
    ctx.begin_turn(1, agent(3));
    ctx.emit_domain_event(DomainEvent::damage(agent(3), agent(0), 2.0));
    assert!(
        ctx.agents()
            .get(agent(1))
            .unwrap()
            .belief()
            .lord_signal(agent(3))
            < 0.0
    );

    ctx.agents_mut().remove_agent(agent(3));
    assert_eq!(
        ctx.agents()
            .get(agent(1))
            .unwrap()
            .belief()
            .lord_signal(agent(3)),
        0.0,
        "beliefs about a removed seat should be pruned"
    );
    assert!(!ctx.agents().tracked_ids().contains(&agent(3)));
    // The consensus over a dead seat's recorded votes still resolves from
    // whatever the survivors remember, without panicking.
    let _ = ctx.consensus(agent(3));
}

#[test]
fn wait_for_acknowledgement_rides_the_turn_clock() {
    let mut ctx = five_seat_match(5);
    let outcome: Rc<RefCell<Option<WaitOutcome>>> = Rc::new(RefCell::new(None));
    let seen = Rc::clone(&outcome);

    ctx.begin_turn(1, agent(0));
    let id = ctx
        .begin_wait("partner_signal", 2, 3, move |result| {
            *seen.borrow_mut() = Some(result);
        })
        .expect("first wait on a fresh key should be accepted");

    // Same key cannot stack a second pending wait.
    assert!(ctx.begin_wait("partner_signal", 2, 3, |_| {}).is_err());

    ctx.begin_turn(1, agent(1));
    ctx.begin_turn(1, agent(2));
    ctx.begin_turn(1, agent(3));
    assert_eq!(
        *outcome.borrow(),
        Some(WaitOutcome::TimedOut),
        "deadline passing on the turn clock should time the wait out"
    );
    assert!(matches!(
        ctx.waits().state(id),
        Some(WaitState::Cooldown { .. })
    ));
    // A late acknowledgement must not fire the continuation again.
    assert!(!ctx.acknowledge_wait(id));
}

#[test]
fn same_seed_replays_identically() {
    let mut first = five_seat_match(1234);
    let mut second = five_seat_match(1234);
    for ctx in [&mut first, &mut second] {
        install_lord_watch(ctx);
        ctx.begin_turn(1, agent(2));
        ctx.emit_domain_event(DomainEvent::damage(agent(2), agent(0), 2.0));
    }
    for observer in [agent(0), agent(1), agent(3), agent(4)] {
        assert_eq!(
            first.guess(observer, agent(2)),
            second.guess(observer, agent(2)),
            "seeded matches should produce identical reads"
        );
    }
}
