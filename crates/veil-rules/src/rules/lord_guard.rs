use crate::rules::{PRIORITY_LORD_GUARD, register};
use veil_core::game::MatchContext;
use veil_core::model::Camp;
use veil_core::score::{ScoreCtx, ScoreStage, VETO_PENALTY};

/// A lord-side seat never harms the lord, whatever anger or noise says.
/// This runs above every bias so no accumulation can outvote it.
fn lord_guard(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || !ctx.candidate.harms_target() {
        return 0.0;
    }
    if ctx.view.own_camp != Camp::LordSide {
        return 0.0;
    }
    if ctx.candidate.target.is_some() && ctx.candidate.target == ctx.view.lord {
        return -VETO_PENALTY;
    }
    0.0
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "lord_guard", PRIORITY_LORD_GUARD, lord_guard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::model::AgentId;
    use veil_core::score::{Candidate, ScoreKind, ScoreView};

    fn ctx_for(own_camp: Camp, target: AgentId) -> ScoreCtx {
        let view = ScoreView {
            own_camp,
            lord: Some(AgentId::new(0)),
            rage: 20.0,
            rage_towards_target: 20.0,
            ..ScoreView::default()
        };
        ScoreCtx::new(
            ScoreKind::ChooseTarget,
            ScoreStage::Final,
            AgentId::new(1),
            Candidate::new("strike").with_target(target, -1.0),
            3.0,
        )
        .with_view(view)
    }

    #[test]
    fn loyalists_never_strike_the_lord() {
        let ctx = ctx_for(Camp::LordSide, AgentId::new(0));
        assert_eq!(lord_guard(&ctx), -VETO_PENALTY);
    }

    #[test]
    fn rebels_are_free_to_strike_the_lord() {
        let ctx = ctx_for(Camp::Rebel, AgentId::new(0));
        assert_eq!(lord_guard(&ctx), 0.0);
    }

    #[test]
    fn loyalists_may_strike_anyone_else() {
        let ctx = ctx_for(Camp::LordSide, AgentId::new(2));
        assert_eq!(lord_guard(&ctx), 0.0);
    }
}
