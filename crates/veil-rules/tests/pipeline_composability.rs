use veil_core::game::{MatchConfig, MatchContext};
use veil_core::host::{DomainEvent, GameMode, Host};
use veil_core::model::{AgentId, AgentSnapshot, Identity};
use veil_core::score::{Candidate, ScoreCtx, ScoreKind, ScoreStage};
use veil_rules::{choose, install_defaults, score_candidate};

struct FlatHost;

impl Host for FlatHost {
    fn mode(&self) -> GameMode {
        GameMode::HiddenRole
    }

    fn attitude(&self, _from: AgentId, _to: AgentId) -> f64 {
        0.0
    }

    fn effect_of(
        &self,
        _candidate: &str,
        _source: AgentId,
        _target: AgentId,
        _viewer: AgentId,
    ) -> f64 {
        0.0
    }

    fn result_of(&self, _action: &str, _viewer: AgentId) -> f64 {
        0.0
    }

    fn snapshot(&self, agent: AgentId) -> Option<AgentSnapshot> {
        Some(AgentSnapshot {
            agent,
            hp: 4.0,
            max_hp: 4.0,
            hand: 4,
            keepable: 4,
            equipped: 0,
            judgements: 0,
            alive: true,
        })
    }

    fn round(&self) -> u32 {
        3
    }
}

fn agent(n: u8) -> AgentId {
    AgentId::new(n)
}

fn seeded_match(seed: u64) -> MatchContext {
    let mut ctx = MatchContext::new(seed, MatchConfig::default());
    ctx.add_agent(agent(0), Identity::Lord, true);
    ctx.add_agent(agent(1), Identity::Loyalist, true);
    ctx.add_agent(agent(2), Identity::Rebel, true);
    ctx.add_agent(agent(3), Identity::Rebel, true);
    install_defaults(&mut ctx);
    ctx
}

fn strike(target: AgentId) -> Candidate {
    Candidate::new("strike").with_target(target, -1.0)
}

/// A third-party rule changes nothing but its own additive delta: the score
/// with the extra rule equals the default score plus exactly that delta.
#[test]
fn an_extra_rule_shifts_scores_by_exactly_its_delta() {
    let host = FlatHost;
    let candidate = strike(agent(3));
    let all = vec![candidate.clone()];

    let mut plain = seeded_match(77);
    let baseline = score_candidate(
        &mut plain,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidate,
        &all,
        2.0,
    );

    let mut extended = seeded_match(77);
    extended.install_scoring_hook(
        |score: &mut ScoreCtx| {
            if score.stage == ScoreStage::Final && score.candidate.id == "strike" {
                score.add(0.7);
            }
            Ok(None)
        },
        1,
    );
    let shifted = score_candidate(
        &mut extended,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidate,
        &all,
        2.0,
    );

    assert!(
        (shifted - (baseline + 0.7)).abs() < 1e-9,
        "extension should be purely additive: baseline {baseline}, shifted {shifted}"
    );
}

/// Removing an installed rule restores the previous pipeline output.
#[test]
fn removing_a_rule_restores_the_baseline() {
    let host = FlatHost;
    let candidate = strike(agent(3));
    let all = vec![candidate.clone()];

    let mut ctx = seeded_match(42);
    let token = ctx.install_scoring_hook(
        |score: &mut ScoreCtx| {
            score.add(1.0);
            Ok(None)
        },
        1,
    );
    let with_rule = score_candidate(
        &mut ctx,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidate,
        &all,
        2.0,
    );
    assert!(ctx.remove_scoring_hook(token));
    let without_rule = score_candidate(
        &mut ctx,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidate,
        &all,
        2.0,
    );
    // Both stages ran the extra rule once each.
    assert!(
        (with_rule - (without_rule + 2.0)).abs() < 1e-9,
        "with {with_rule}, without {without_rule}"
    );
}

/// A hand-off one seat away is worth exactly one third over the same card
/// without the hand-off, applied once across both scoring stages.
#[test]
fn turn_order_urgency_contributes_its_delta_once() {
    let host = FlatHost;
    let plain_card = Candidate::new("pass");
    let mut urgent_card = Candidate::new("pass");
    urgent_card.turn_distance = Some(1);

    let mut plain = seeded_match(55);
    let baseline = score_candidate(
        &mut plain,
        &host,
        ScoreKind::ChooseCard,
        agent(1),
        &plain_card,
        &[plain_card.clone()],
        1.0,
    );

    let mut urgent = seeded_match(55);
    let shifted = score_candidate(
        &mut urgent,
        &host,
        ScoreKind::ChooseCard,
        agent(1),
        &urgent_card,
        &[urgent_card.clone()],
        1.0,
    );

    assert!(
        (shifted - (baseline + 1.0 / 3.0)).abs() < 1e-9,
        "urgency should contribute once: baseline {baseline}, shifted {shifted}"
    );
}

/// Anger is the only difference between these two seeded matches, so any
/// score gap is the anger rule's contribution.
#[test]
fn anger_biases_an_otherwise_identical_decision() {
    let host = FlatHost;
    let candidate = strike(agent(3));
    let all = vec![candidate.clone()];

    let mut calm = seeded_match(9);
    let calm_score = score_candidate(
        &mut calm,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidate,
        &all,
        2.0,
    );

    let mut furious = seeded_match(9);
    furious
        .agents_mut()
        .get_mut(agent(1))
        .unwrap()
        .belief_mut()
        .add_rage(12.0);
    furious
        .agents_mut()
        .get_mut(agent(1))
        .unwrap()
        .belief_mut()
        .add_rage_towards(agent(3), 10.0);
    let furious_score = score_candidate(
        &mut furious,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidate,
        &all,
        2.0,
    );

    assert!(
        furious_score > calm_score,
        "anger should bias the otherwise identical decision"
    );
}

/// End-to-end: observed events shape beliefs, and beliefs shape the pick.
#[test]
fn observed_aggression_steers_target_choice() {
    let host = FlatHost;
    let mut ctx = seeded_match(1001);
    ctx.begin_turn(1, agent(3));

    // Seat 3 hammers the lord in front of everyone and splashes the
    // loyalist on the way.
    ctx.emit_domain_event(DomainEvent::damage(agent(3), agent(0), 2.0));
    ctx.emit_domain_event(DomainEvent::damage(agent(3), agent(0), 2.0));
    ctx.emit_domain_event(DomainEvent::damage(agent(3), agent(1), 2.0));

    let candidates = vec![strike(agent(2)), strike(agent(3))];
    let decision = choose(
        &mut ctx,
        &host,
        ScoreKind::ChooseTarget,
        agent(1),
        &candidates,
        &[1.0, 1.0],
    )
    .expect("two candidates always yield a decision");
    assert_eq!(
        decision.candidate.target,
        Some(agent(3)),
        "the loyalist should strike the seat it watched attack the lord"
    );
}
