use crate::rules::{PRIORITY_TEMPO, register};
use veil_core::belief::HabitChoice;
use veil_core::game::MatchContext;
use veil_core::score::{RiskClass, ScoreCtx, ScoreKind, ScoreStage};

/// Match-long posture coin flip leans the bias without ever flipping it.
fn posture_gain(habit: Option<HabitChoice>, risk: RiskClass) -> f64 {
    match (habit, risk) {
        (Some(HabitChoice::Bold), RiskClass::Seeking) => 1.2,
        (Some(HabitChoice::Bold), RiskClass::Averse) => 0.85,
        (Some(HabitChoice::Cautious), RiskClass::Averse) => 1.2,
        (Some(HabitChoice::Cautious), RiskClass::Seeking) => 0.85,
        _ => 1.0,
    }
}

/// Risk appetite follows the table: press risky plays when ahead, prefer
/// safe ones when behind.
fn tempo_bias(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || ctx.kind != ScoreKind::ChooseCard {
        return 0.0;
    }
    let gain = posture_gain(ctx.view.risk_habit, ctx.candidate.risk);
    match ctx.candidate.risk {
        RiskClass::Seeking => 0.55 * ctx.view.situation * gain,
        RiskClass::Averse => -0.45 * ctx.view.situation * gain,
        RiskClass::Neutral => 0.0,
    }
}

/// Hold defensive cards back when a strike-dense opponent is winding up.
fn threat_reserve(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || ctx.kind != ScoreKind::ChooseCard {
        return 0.0;
    }
    if ctx.candidate.risk != RiskClass::Averse {
        return 0.0;
    }
    let tempo = ctx.view.incoming_strike_tempo;
    if tempo > 0.8 {
        0.35 * (tempo / 2.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "tempo_bias", PRIORITY_TEMPO, tempo_bias);
    register(ctx, "threat_reserve", PRIORITY_TEMPO, threat_reserve);
}
