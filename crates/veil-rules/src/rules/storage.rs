use crate::rules::{PRIORITY_STORAGE, register};
use veil_core::game::MatchContext;
use veil_core::score::{ScoreCtx, ScoreKind, ScoreStage};

/// Discard-phase lean: hoard cards when the keep limit exceeds current
/// health, shed them when health is the surplus.
fn hand_storage_bias(ctx: &ScoreCtx) -> f64 {
    if ctx.stage != ScoreStage::Final || ctx.kind != ScoreKind::ChooseButton {
        return 0.0;
    }
    ((f64::from(ctx.view.keepable) - ctx.view.hp) * 0.22).clamp(-1.1, 1.1)
}

pub(crate) fn install(ctx: &mut MatchContext) {
    register(ctx, "hand_storage_bias", PRIORITY_STORAGE, hand_storage_bias);
}
