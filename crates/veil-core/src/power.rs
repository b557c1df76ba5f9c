//! Stateless power and situation estimates. Recomputed fresh on every call;
//! resources change continuously, so nothing here is ever cached.

use crate::model::agent::AgentId;
use crate::model::snapshot::AgentSnapshot;

/// Attitude magnitude above which an agent is pooled as ally or enemy.
const ALLEGIANCE_THRESHOLD: f64 = 0.6;

/// Scalar resource estimate for one agent.
///
/// Health dominates, with smaller credits for recoverable health headroom,
/// retainable hand size, overflow cards, and equipment, and a penalty per
/// pending negative judgement.
pub fn agent_power(snapshot: &AgentSnapshot) -> f64 {
    snapshot.hp
        + (snapshot.max_hp - snapshot.hp) * 0.15
        + f64::from(snapshot.keepable) * 0.85
        + f64::from(snapshot.overflow()) * 0.25
        + f64::from(snapshot.equipped) * 0.3
        - f64::from(snapshot.judgements) * 0.25
}

/// Ally-versus-opposition balance from the observer's seat, in `[-1, 1]`.
///
/// Each living agent is pooled by the supplied attitude estimate: clearly
/// friendly seats join the observer's pool, clearly hostile seats join the
/// opposition, and undecided seats contribute 60% of their power to the
/// opposition (an unread agent is a latent threat). When nobody clears the
/// allegiance threshold the result falls back to "self versus field
/// average".
pub fn situation_index(
    observer: AgentId,
    snapshots: &[AgentSnapshot],
    attitude: impl Fn(AgentId) -> f64,
) -> f64 {
    let mut own_power = 0.0;
    let mut ally = 0.0;
    let mut opposition = 0.0;
    let mut field = 0.0;
    let mut others = 0usize;
    let mut any_allegiance = false;

    for snapshot in snapshots.iter().filter(|s| s.alive) {
        let power = agent_power(snapshot);
        if snapshot.agent == observer {
            own_power = power;
            ally += power;
            continue;
        }
        field += power;
        others += 1;
        let disposition = attitude(snapshot.agent);
        if disposition > ALLEGIANCE_THRESHOLD {
            ally += power;
            any_allegiance = true;
        } else if disposition < -ALLEGIANCE_THRESHOLD {
            opposition += power;
            any_allegiance = true;
        } else {
            opposition += power * 0.6;
        }
    }

    if !any_allegiance {
        if others == 0 {
            return 0.0;
        }
        let average = field / others as f64;
        return ((own_power - average) / average.abs().max(1.0)).clamp(-1.0, 1.0);
    }

    let total = ally + opposition;
    if total <= 0.0 {
        return 0.0;
    }
    ((ally - opposition) / total).clamp(-1.0, 1.0)
}
