use crate::rules::{PRIORITY_ALLY_SHIELD, PRIORITY_VETO, register};
use veil_core::game::MatchContext;
use veil_core::model::Camp;
use veil_core::score::{ScoreCtx, ScoreStage, VETO_PENALTY};

fn opposes(a: Camp, b: Camp) -> bool {
    matches!(
        (a, b),
        (Camp::LordSide, Camp::Rebel) | (Camp::Rebel, Camp::LordSide)
    )
}

/// Harming a seat I read as my own camp costs proportionally to how sure I
/// am of the read.
fn ally_shield(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || !ctx.candidate.harms_target() {
        return 0.0;
    }
    let guess = &ctx.view.target_guess;
    let camp = guess.identity.camp();
    if camp == Camp::Other || camp != ctx.view.own_camp {
        return 0.0;
    }
    if guess.confidence < 0.35 {
        return 0.0;
    }
    -(1.2 + 2.4 * guess.confidence)
}

/// Spending a helpful card on a confidently-read enemy is never worth it.
fn wasted_aid_veto(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || !ctx.candidate.helps_target() {
        return 0.0;
    }
    let guess = &ctx.view.target_guess;
    if opposes(ctx.view.own_camp, guess.identity.camp()) && guess.confidence >= 0.65 {
        return -VETO_PENALTY;
    }
    0.0
}

/// Rescuing the seat you just attacked reads as throwing the resource away;
/// the attack marker was set for exactly this.
fn reciprocal_rescue_veto(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || !ctx.candidate.rescue {
        return 0.0;
    }
    if ctx.candidate.target.is_some() && ctx.candidate.target == ctx.view.recent_attack_target {
        return -VETO_PENALTY;
    }
    0.0
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "wasted_aid_veto", PRIORITY_VETO, wasted_aid_veto);
    register(
        ctx,
        "reciprocal_rescue_veto",
        PRIORITY_VETO,
        reciprocal_rescue_veto,
    );
    register(ctx, "ally_shield", PRIORITY_ALLY_SHIELD, ally_shield);
}
