use crate::rules::{PRIORITY_ORDERING, register};
use veil_core::game::MatchContext;
use veil_core::score::{ScoreCtx, ScoreKind, ScoreStage};

/// Hand-off options are worth more the sooner the receiving seat acts.
fn turn_order_urgency(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || ctx.kind != ScoreKind::ChooseCard {
        return 0.0;
    }
    let Some(distance) = ctx.candidate.turn_distance else {
        return 0.0;
    };
    ((3.0 - f64::from(distance)) / 3.0).clamp(0.0, 1.0) * 0.5
}

/// A delayed card loses to an immediate one of comparable worth.
fn delayed_deferral(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || ctx.kind != ScoreKind::ChooseCard {
        return 0.0;
    }
    if !ctx.candidate.delayed {
        return 0.0;
    }
    let beaten = ctx
        .all
        .iter()
        .any(|other| !other.delayed && other.value > ctx.candidate.value);
    if beaten { -0.45 } else { 0.0 }
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "turn_order_urgency", PRIORITY_ORDERING, turn_order_urgency);
    register(ctx, "delayed_deferral", PRIORITY_ORDERING, delayed_deferral);
}
