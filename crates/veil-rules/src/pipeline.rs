//! Decision-point entry points. The host hands over the candidate list and
//! its own base utilities; this module assembles one read-only belief view
//! per candidate and runs both scoring stages over the bus.

use crate::attitude::perceived_attitude;
use veil_core::game::MatchContext;
use veil_core::host::{GameMode, Host};
use veil_core::model::{AgentId, AgentSnapshot, Guess};
use veil_core::power;
use veil_core::score::{Candidate, ScoreCtx, ScoreKind, ScoreStage, ScoreView};

/// The winning candidate of one decision point, with its final score.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub candidate: Candidate,
    pub score: f64,
}

/// Builds one candidate from the host's own estimates: `effect_of` signs
/// the per-target effect and `result_of` prices the spent resource, so
/// rules never probe host internals themselves.
pub fn candidate_from_host(
    host: &dyn Host,
    id: &str,
    player: AgentId,
    target: Option<AgentId>,
) -> Candidate {
    let mut candidate = Candidate::new(id);
    candidate.value = host.result_of(id, player);
    if let Some(target) = target {
        candidate = candidate.with_target(target, host.effect_of(id, player, target, player));
    }
    candidate
}

fn snapshots_of(ctx: &MatchContext, host: &dyn Host) -> Vec<AgentSnapshot> {
    ctx.agents()
        .living()
        .filter_map(|entry| host.snapshot(entry.id()))
        .collect()
}

/// Strongest strike-density read among seats the player leans hostile on.
fn incoming_tempo(ctx: &MatchContext, host: &dyn Host, player: AgentId) -> f64 {
    let Some(entry) = ctx.agents().get(player) else {
        return 0.0;
    };
    let expected = ctx.config().expected_rebels;
    ctx.agents()
        .living()
        .filter(|other| other.id() != player)
        .filter(|other| {
            perceived_attitude(host, ctx.agents(), player, other.id(), expected) < 0.0
        })
        .map(|other| entry.runtime().tempo(other.id()).strike)
        .fold(0.0, f64::max)
}

fn build_view(
    ctx: &mut MatchContext,
    host: &dyn Host,
    player: AgentId,
    candidate: &Candidate,
) -> ScoreView {
    // Pre-rolled here so every rule stays a pure function of the context.
    let noise_roll = ctx.roll();
    let expected = ctx.config().expected_rebels;

    let Some(entry) = ctx.agents().get(player) else {
        return ScoreView {
            noise_roll,
            ..ScoreView::default()
        };
    };
    let persona = entry.persona().id();
    let traits = *entry.persona().traits();
    let own_camp = entry.own_role().camp();
    let belief = entry.belief();

    let (attitude_to_target, grudge_to_target, rage_towards_target, target_guess) =
        match candidate.target {
            Some(target) => (
                perceived_attitude(host, ctx.agents(), player, target, expected),
                belief.grudge(target),
                belief.rage_towards(target),
                ctx.guess(player, target),
            ),
            None => (0.0, 0.0, 0.0, Guess::unknown()),
        };

    let snapshots = snapshots_of(ctx, host);
    let situation = power::situation_index(player, &snapshots, |id| {
        perceived_attitude(host, ctx.agents(), player, id, expected) / 10.0
    });

    let own = host.snapshot(player);
    ScoreView {
        persona,
        traits,
        attitude_to_target,
        grudge_to_target,
        rage: belief.rage(),
        rage_towards_target,
        situation,
        target_guess,
        own_camp,
        lord: ctx.agents().lord(),
        hp: own.as_ref().map_or(4.0, |s| s.hp),
        hand: own.as_ref().map_or(0, |s| s.hand),
        keepable: own.as_ref().map_or(0, |s| s.keepable),
        recent_attack_target: entry.runtime().recent_attack(ctx.round()).map(|a| a.target),
        risk_habit: belief.habit(veil_core::belief::RISK_POSTURE),
        incoming_strike_tempo: incoming_tempo(ctx, host, player),
        noise_roll,
        noise_enabled: ctx.config().noise_enabled,
    }
}

/// Scores one candidate through both stages. Outside hidden-role matches
/// the host's base utility passes through untouched.
pub fn score_candidate(
    ctx: &mut MatchContext,
    host: &dyn Host,
    kind: ScoreKind,
    player: AgentId,
    candidate: &Candidate,
    all: &[Candidate],
    base: f64,
) -> f64 {
    if host.mode() != GameMode::HiddenRole {
        return base;
    }
    let view = build_view(ctx, host, player, candidate);

    let base_ctx = ScoreCtx::new(kind, ScoreStage::Base, player, candidate.clone(), base)
        .with_view(view.clone())
        .with_all(all.to_vec());
    let adjusted = ctx.score(base_ctx).score;

    let mut final_ctx = ScoreCtx::new(kind, ScoreStage::Final, player, candidate.clone(), base)
        .with_view(view)
        .with_all(all.to_vec());
    final_ctx.score = adjusted;
    ctx.score(final_ctx).score
}

/// Scores every candidate and picks the best. `bases` must parallel
/// `candidates`; ties keep the earliest candidate, matching host order.
pub fn choose(
    ctx: &mut MatchContext,
    host: &dyn Host,
    kind: ScoreKind,
    player: AgentId,
    candidates: &[Candidate],
    bases: &[f64],
) -> Option<Decision> {
    let mut best: Option<Decision> = None;
    for (candidate, base) in candidates.iter().zip(bases.iter().copied()) {
        let score = score_candidate(ctx, host, kind, player, candidate, candidates, base);
        let better = best.as_ref().map_or(true, |b| score > b.score);
        if better {
            best = Some(Decision {
                candidate: candidate.clone(),
                score,
            });
        }
    }
    best
}
