//! Perceived attitude: the belief-derived override of the host's baseline
//! disposition, used while a target's identity is still unresolved.

use veil_core::belief::AgentTable;
use veil_core::guess;
use veil_core::host::Host;
use veil_core::model::{AgentId, Camp};
use veil_core::persona::PersonaId;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Disposition of `observer` toward `target` in `[-10, 10]`.
///
/// Starts from the seeded first impression, weighs accumulated evidence by
/// insight, subtracts grudge scaled by vengefulness, then scales the whole
/// read by aggression, posture, and an early-match certainty ramp. Falls
/// back to the host's own attitude once the target is effectively public.
pub fn perceived_attitude(
    host: &dyn Host,
    table: &AgentTable,
    observer: AgentId,
    target: AgentId,
    expected_rebels: Option<u8>,
) -> f64 {
    let Some(observer_entry) = table.get(observer) else {
        return host.attitude(observer, target);
    };
    let Some(target_entry) = table.get(target) else {
        return host.attitude(observer, target);
    };
    if observer == target {
        return 10.0;
    }

    let traits = *observer_entry.persona().traits();
    let public_target =
        target_entry.public().revealed().is_some() || target_entry.public().shown() >= 0.85;

    let mut result = if public_target {
        // Effectively public: trust the host's ground-truth disposition.
        host.attitude(observer, target)
    } else {
        let belief = observer_entry.belief();
        let perceived = belief.first_impression(target)
            + belief.evidence(target) * (0.6 + traits.insight * 0.8)
            - belief.grudge(target) * (0.25 + traits.revenge_weight * 0.2)
            - traits.aggressiveness * 0.25;

        // Reads firm up over the first few rounds.
        let round = host.round();
        let certainty = lerp(0.6, 1.0, (f64::from(round.saturating_sub(1))) / 3.0);

        // A healthy, card-rich agent acts on its reads more boldly.
        let posture = match host.snapshot(observer) {
            Some(snap) => {
                let hp_margin = (snap.hp - 2.0).max(0.0);
                let hand_margin = (f64::from(snap.hand) - 2.0).max(0.0);
                (1.0 + hp_margin * 0.06 + hand_margin * 0.03).clamp(0.85, 1.25)
            }
            None => 1.0,
        };

        let scale = lerp(0.9, 1.2, traits.aggressiveness) * posture * certainty;
        (perceived * scale).clamp(-10.0, 10.0)
    };

    // A camouflaged agent hides hostility toward the lord until its
    // camouflage window has run out.
    if observer_entry.persona().id() == PersonaId::Camouflage
        && target_entry.public().is_lord()
        && result < 0.0
        && traits.camouflage_rounds > 0
    {
        let turns = observer_entry.runtime().turns_taken();
        if turns < traits.camouflage_rounds {
            let progress = f64::from(turns) / f64::from(traits.camouflage_rounds);
            result *= lerp(0.15, 1.0, progress);
        }
    }

    // Soft-assigned unknowns count as lord-side: lord-side observers treat
    // them as at least mildly friendly, rebels as at least mildly hostile.
    if !public_target && guess::soft_assignment_active(table, expected_rebels) {
        match observer_entry.own_role().camp() {
            Camp::LordSide => result = result.max(3.0),
            Camp::Rebel => result = result.min(-3.0),
            Camp::Other => {}
        }
    }

    result
}
