use crate::belief::AgentTable;
use crate::model::agent::AgentId;
use crate::model::identity::{Guess, Identity};
use std::collections::HashMap;

/// Axis magnitude below which an observer refuses to commit to a side.
pub const SIGNAL_THRESHOLD: f64 = 1.2;

/// Exposure level at which an unrevealed agent counts as publicly readable.
pub const SOFT_EXPOSE_THRESHOLD: f64 = 0.7;

/// Confidence required of the field before an exposed agent is booked as a
/// rebel when tallying the soft-assignment precondition.
pub const REBEL_CANDIDATE_CONFIDENCE: f64 = 0.65;

/// Confidence attached to a soft assignment. Deliberately penalized: the
/// assignment rests on an approximate pool-size estimate, not on evidence.
pub const SOFT_ASSIGN_CONFIDENCE: f64 = 0.6;

/// Estimated hidden-rebel pool size: an explicit configuration override
/// wins, otherwise a seat-count table approximates the usual deal.
pub fn expected_rebels(starting_seats: usize, config_override: Option<u8>) -> usize {
    if let Some(n) = config_override {
        return n as usize;
    }
    match starting_seats {
        0..=4 => 1,
        5..=6 => 2,
        7 => 3,
        _ => 4,
    }
}

/// Per-observer identity inference for one target.
///
/// Reads only the observer's own belief state and the target's public
/// standing; the target's hidden role is never consulted.
pub fn guess_for(
    table: &AgentTable,
    observer: AgentId,
    target: AgentId,
    expected_override: Option<u8>,
) -> Guess {
    let Some(observer_entry) = table.get(observer) else {
        return Guess::unknown();
    };
    let Some(target_entry) = table.get(target) else {
        return Guess::unknown();
    };

    // An agent needs no inference about itself.
    if observer == target {
        return Guess::certain(observer_entry.own_role());
    }
    if let Some(revealed) = target_entry.public().revealed() {
        return Guess::certain(revealed);
    }

    let belief = observer_entry.belief();

    // Double agent: strong help and strong harm toward the lord at once.
    let help = belief.lord_help(target);
    let harm = belief.lord_harm(target);
    if help >= 1.8 && harm >= 1.8 {
        let confidence = (help.min(harm) / 4.0).clamp(0.0, 1.0);
        return Guess {
            identity: Identity::Turncoat,
            confidence,
        };
    }

    // Axis selection: raw evidence is observer-relative ("ally of mine"),
    // so rebel observers flip it before comparing against the lord axis.
    // Exactly one of the two fields is used; the same underlying event must
    // never be counted twice.
    let lord_signal = belief.lord_signal(target);
    let mut evidence = belief.evidence(target);
    if observer_entry.own_role() == Identity::Rebel {
        evidence = -evidence;
    }
    let axis = if evidence.abs() > lord_signal.abs() {
        evidence
    } else {
        lord_signal
    };

    let mut effective = axis * reveal_weight(target_entry.public().shown());

    // Grudge amplifies an existing direction, never creates one, and only
    // while the axis is still below the commitment threshold.
    if axis != 0.0 && axis.abs() < SIGNAL_THRESHOLD {
        let boost = (belief.grudge(target) * 0.25).clamp(0.0, 0.8);
        effective += effective.signum() * boost;
    }

    let magnitude = effective.abs();
    if magnitude < SIGNAL_THRESHOLD {
        if soft_assignment_active(table, expected_override) {
            return Guess {
                identity: Identity::Loyalist,
                confidence: SOFT_ASSIGN_CONFIDENCE,
            };
        }
        return Guess {
            identity: Identity::Unknown,
            confidence: (magnitude / 1.2).clamp(0.0, 1.0) * 0.4,
        };
    }

    let identity = if effective > 0.0 {
        Identity::Loyalist
    } else {
        Identity::Rebel
    };
    Guess {
        identity,
        confidence: (magnitude / 6.0).clamp(0.0, 1.0),
    }
}

/// Confidence-weighted vote across every tracked, living observer except
/// the target itself. `Unknown` votes are ignored; zero usable votes yield
/// `(Unknown, 0)`.
pub fn consensus(table: &AgentTable, target: AgentId, expected_override: Option<u8>) -> Guess {
    let Some(target_entry) = table.get(target) else {
        return Guess::unknown();
    };
    if let Some(revealed) = target_entry.public().revealed() {
        return Guess::certain(revealed);
    }
    if soft_assignment_active(table, expected_override) {
        return Guess {
            identity: Identity::Loyalist,
            confidence: SOFT_ASSIGN_CONFIDENCE,
        };
    }

    let mut weights: HashMap<Identity, f64> = HashMap::new();
    let mut total = 0.0;
    for observer in table.tracked_ids() {
        if observer == target {
            continue;
        }
        let vote = guess_for(table, observer, target, expected_override);
        if vote.identity == Identity::Unknown || vote.confidence <= 0.0 {
            continue;
        }
        *weights.entry(vote.identity).or_insert(0.0) += vote.confidence;
        total += vote.confidence;
    }
    if total <= 0.0 {
        return Guess::unknown();
    }
    let (identity, weight) = weights
        .into_iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((Identity::Unknown, 0.0));
    Guess {
        identity,
        confidence: weight / total,
    }
}

/// Soft-assignment precondition: the hidden-rebel pool is fully accounted
/// for by exposed rebels, so remaining unknowns lean toward the lord side.
/// A deliberately approximate, game-balance-motivated heuristic; its output
/// always carries the reduced [`SOFT_ASSIGN_CONFIDENCE`].
pub fn soft_assignment_active(table: &AgentTable, expected_override: Option<u8>) -> bool {
    let expected = expected_rebels(table.starting_seats(), expected_override);
    if expected == 0 {
        return false;
    }
    let exposed = table
        .agents()
        .filter(|entry| exposed_rebel(table, entry.id()))
        .count();
    exposed >= expected
}

fn exposed_rebel(table: &AgentTable, agent: AgentId) -> bool {
    let Some(entry) = table.get(agent) else {
        return false;
    };
    if entry.public().revealed() == Some(Identity::Rebel) {
        return true;
    }
    if entry.public().shown() < SOFT_EXPOSE_THRESHOLD {
        return false;
    }
    // Unrevealed but heavily exposed: book it as a rebel only when the
    // tracked field agrees with high confidence.
    let observers = table.tracked_ids();
    let mut votes = 0usize;
    let mut rebel_votes = 0usize;
    for observer in observers {
        if observer == agent {
            continue;
        }
        let Some(obs_entry) = table.get(observer) else {
            continue;
        };
        let signal = obs_entry.belief().lord_signal(agent);
        if signal.abs() < SIGNAL_THRESHOLD {
            continue;
        }
        votes += 1;
        if signal < 0.0 {
            rebel_votes += 1;
        }
    }
    votes > 0 && (rebel_votes as f64 / votes as f64) >= REBEL_CANDIDATE_CONFIDENCE
}

fn reveal_weight(shown: f64) -> f64 {
    if shown >= 0.85 {
        1.25
    } else if shown >= SOFT_EXPOSE_THRESHOLD {
        1.1
    } else {
        1.0
    }
}
