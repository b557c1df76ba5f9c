use crate::rules::{PRIORITY_GRUDGE, PRIORITY_NOISE, register};
use veil_core::game::MatchContext;
use veil_core::score::{ScoreCtx, ScoreKind, ScoreStage};

/// Small pre-rolled jitter on viable base scores. Keeps an impulsive agent
/// from playing like a table of identical solvers; never strong enough to
/// promote a bad play.
fn impulsive_noise(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Base || !ctx.view.noise_enabled {
        return 0.0;
    }
    if !(ctx.base > 0.0) || ctx.view.traits.randomness <= 0.0 {
        return 0.0;
    }
    (ctx.view.noise_roll - 0.5) * ctx.view.traits.randomness * 0.2
}

/// A petty agent leans into a held grudge when it already dislikes the
/// target.
fn petty_grudge_bias(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || ctx.kind != ScoreKind::ChooseTarget {
        return 0.0;
    }
    if !ctx.candidate.harms_target() || ctx.view.attitude_to_target >= 0.0 {
        return 0.0;
    }
    (ctx.view.grudge_to_target * 0.12).clamp(0.0, 2.0)
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "petty_grudge_bias", PRIORITY_GRUDGE, petty_grudge_bias);
    register(ctx, "impulsive_noise", PRIORITY_NOISE, impulsive_noise);
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::model::AgentId;
    use veil_core::persona::Traits;
    use veil_core::score::{Candidate, ScoreView};

    #[test]
    fn noise_is_bounded_and_gated() {
        let mut traits = Traits::default();
        traits.randomness = 0.12;
        let view = ScoreView {
            traits,
            noise_roll: 1.0,
            noise_enabled: true,
            ..ScoreView::default()
        };
        let ctx = ScoreCtx::new(
            ScoreKind::ChooseCard,
            ScoreStage::Base,
            AgentId::new(1),
            Candidate::new("strike"),
            1.0,
        )
        .with_view(view);
        let delta = impulsive_noise(&ctx);
        assert!((delta - 0.5 * 0.12 * 0.2).abs() < 1e-9);

        let mut disabled = ctx.clone();
        disabled.view.noise_enabled = false;
        assert_eq!(impulsive_noise(&disabled), 0.0);

        let mut nonviable = ctx;
        nonviable.base = 0.0;
        assert_eq!(impulsive_noise(&nonviable), 0.0);
    }

    #[test]
    fn grudge_needs_an_already_sour_read() {
        let view = ScoreView {
            grudge_to_target: 10.0,
            attitude_to_target: -2.0,
            ..ScoreView::default()
        };
        let mut ctx = ScoreCtx::new(
            ScoreKind::ChooseTarget,
            ScoreStage::Final,
            AgentId::new(1),
            Candidate::new("strike").with_target(AgentId::new(2), -1.0),
            1.0,
        )
        .with_view(view);
        assert!((petty_grudge_bias(&ctx) - 1.2).abs() < 1e-9);

        ctx.view.attitude_to_target = 2.0;
        assert_eq!(petty_grudge_bias(&ctx), 0.0);
    }
}
