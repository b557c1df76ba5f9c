use crate::rules::{PRIORITY_ANGER, register};
use veil_core::game::MatchContext;
use veil_core::persona::PersonaId;
use veil_core::score::{ScoreCtx, ScoreKind, ScoreStage};

/// Per-persona weighting of targeted versus diffuse anger.
fn weights(persona: PersonaId) -> (f64, f64) {
    match persona {
        PersonaId::Impulsive => (1.25, 1.30),
        PersonaId::Petty => (1.45, 0.95),
        PersonaId::Camouflage => (0.95, 0.85),
        PersonaId::Balanced => (1.0, 1.0),
    }
}

/// Anger nudges an already-sound hostile option; it never invents one.
/// The envelope shrinks the bonus as the rational base grows, so a furious
/// agent still prefers the clearly better play.
fn anger_bias(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final {
        return 0.0;
    }
    if !matches!(ctx.kind, ScoreKind::ChooseTarget | ScoreKind::ChooseCard) {
        return 0.0;
    }
    if !ctx.candidate.harms_target() || !(ctx.base > 0.0) {
        return 0.0;
    }
    let towards = ctx.view.rage_towards_target;
    let general = ctx.view.rage;
    // Mild irritation is not actionable.
    if towards < 1.5 && general < 2.0 {
        return 0.0;
    }
    let envelope = (1.0 - ctx.base / 7.0).clamp(0.2, 1.0);
    let (w_towards, w_general) = weights(ctx.view.persona);
    envelope * (w_towards * 1.6 * (towards / 20.0) + w_general * 0.5 * (general / 20.0))
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "anger_bias", PRIORITY_ANGER, anger_bias);
}
