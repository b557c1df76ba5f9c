use crate::model::agent::AgentId;
use crate::persona::Persona;
use rand::Rng;
use std::collections::HashMap;

/// Magnitudes below this snap to exactly zero during decay, preventing
/// float creep from keeping long-dead signals alive.
pub const SNAP_EPSILON: f64 = 0.05;

const EVIDENCE_MAX: f64 = 10.0;
const GRUDGE_MAX: f64 = 20.0;
const RAGE_MAX: f64 = 20.0;
const LORD_SIGNAL_MAX: f64 = 20.0;
const LORD_AXIS_MAX: f64 = 20.0;

/// Match-long stable stylistic choice, rolled once and never re-rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitChoice {
    Bold,
    Cautious,
}

/// Habit key for the once-per-match risk posture coin flip.
pub const RISK_POSTURE: &str = "risk_posture";

/// One agent's evolving beliefs about everyone else.
///
/// Every numeric field is clamped on every mutation; mutators ignore
/// non-finite and zero deltas outright, so redelivered or garbage host
/// callbacks degrade to no-ops instead of corrupting state.
#[derive(Debug, Clone, Default)]
pub struct BeliefState {
    first_impression: HashMap<AgentId, f64>,
    evidence: HashMap<AgentId, f64>,
    grudge: HashMap<AgentId, f64>,
    rage: f64,
    rage_towards: HashMap<AgentId, f64>,
    lord_signal: HashMap<AgentId, f64>,
    lord_help: HashMap<AgentId, f64>,
    lord_harm: HashMap<AgentId, f64>,
    habits: HashMap<&'static str, HabitChoice>,
}

impl BeliefState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the once-per-opponent first impression with small symmetric
    /// noise. A second call for the same opponent is a no-op.
    pub fn seed_impression<R: Rng>(&mut self, other: AgentId, rng: &mut R) {
        self.first_impression
            .entry(other)
            .or_insert_with(|| rng.gen_range(-0.3..0.3));
    }

    pub fn first_impression(&self, other: AgentId) -> f64 {
        self.first_impression.get(&other).copied().unwrap_or(0.0)
    }

    pub fn evidence(&self, other: AgentId) -> f64 {
        self.evidence.get(&other).copied().unwrap_or(0.0)
    }

    pub fn grudge(&self, other: AgentId) -> f64 {
        self.grudge.get(&other).copied().unwrap_or(0.0)
    }

    pub fn rage(&self) -> f64 {
        self.rage
    }

    pub fn rage_towards(&self, other: AgentId) -> f64 {
        self.rage_towards.get(&other).copied().unwrap_or(0.0)
    }

    pub fn lord_signal(&self, other: AgentId) -> f64 {
        self.lord_signal.get(&other).copied().unwrap_or(0.0)
    }

    pub fn lord_help(&self, other: AgentId) -> f64 {
        self.lord_help.get(&other).copied().unwrap_or(0.0)
    }

    pub fn lord_harm(&self, other: AgentId) -> f64 {
        self.lord_harm.get(&other).copied().unwrap_or(0.0)
    }

    pub fn add_evidence(&mut self, other: AgentId, delta: f64) {
        accumulate(&mut self.evidence, other, delta, -EVIDENCE_MAX, EVIDENCE_MAX);
    }

    pub fn add_grudge(&mut self, other: AgentId, delta: f64) {
        accumulate(&mut self.grudge, other, delta, 0.0, GRUDGE_MAX);
    }

    pub fn add_rage(&mut self, delta: f64) {
        if !usable(delta) {
            return;
        }
        self.rage = (self.rage + delta).clamp(0.0, RAGE_MAX);
    }

    pub fn add_rage_towards(&mut self, other: AgentId, delta: f64) {
        accumulate(&mut self.rage_towards, other, delta, 0.0, RAGE_MAX);
    }

    pub fn add_lord_signal(&mut self, other: AgentId, delta: f64) {
        accumulate(
            &mut self.lord_signal,
            other,
            delta,
            -LORD_SIGNAL_MAX,
            LORD_SIGNAL_MAX,
        );
    }

    pub fn add_lord_help(&mut self, other: AgentId, delta: f64) {
        accumulate(&mut self.lord_help, other, delta, 0.0, LORD_AXIS_MAX);
    }

    pub fn add_lord_harm(&mut self, other: AgentId, delta: f64) {
        accumulate(&mut self.lord_harm, other, delta, 0.0, LORD_AXIS_MAX);
    }

    /// Records a habit the first time only; later calls keep the original.
    pub fn set_habit_once(&mut self, key: &'static str, choice: HabitChoice) {
        self.habits.entry(key).or_insert(choice);
    }

    pub fn habit(&self, key: &str) -> Option<HabitChoice> {
        self.habits.get(key).copied()
    }

    /// Turn-start decay. Rates never exceed 1, so repeated decay shrinks
    /// every field monotonically toward zero and never flips a sign.
    pub fn decay(&mut self, persona: &Persona) {
        let traits = persona.traits();
        let evidence_rate = (0.90 + traits.insight * 0.06).clamp(0.90, 0.98);
        let lord_rate = (0.90 + traits.insight * 0.05).clamp(0.90, 0.98);
        let grudge_rate = (0.88 + traits.revenge_weight * 0.03).clamp(0.88, 0.97);
        let (rage_rate, towards_rate) = persona.id().rage_decay_rates();

        decay_map(&mut self.evidence, evidence_rate);
        decay_map(&mut self.lord_signal, lord_rate);
        decay_map(&mut self.lord_help, lord_rate);
        decay_map(&mut self.lord_harm, lord_rate);
        decay_map(&mut self.grudge, grudge_rate);
        decay_map(&mut self.rage_towards, towards_rate);
        self.rage *= rage_rate;
        if self.rage < SNAP_EPSILON {
            self.rage = 0.0;
        }
    }

    /// Drops every per-opponent entry for an agent removed from the match.
    /// First impressions go too; a removed seat never returns.
    pub fn prune(&mut self, other: AgentId) {
        self.first_impression.remove(&other);
        self.evidence.remove(&other);
        self.grudge.remove(&other);
        self.rage_towards.remove(&other);
        self.lord_signal.remove(&other);
        self.lord_help.remove(&other);
        self.lord_harm.remove(&other);
    }

    pub fn tracked_opponents(&self) -> usize {
        self.first_impression.len()
    }
}

fn usable(delta: f64) -> bool {
    delta.is_finite() && delta != 0.0
}

fn accumulate(map: &mut HashMap<AgentId, f64>, key: AgentId, delta: f64, lo: f64, hi: f64) {
    if !usable(delta) {
        return;
    }
    let slot = map.entry(key).or_insert(0.0);
    *slot = (*slot + delta).clamp(lo, hi);
}

fn decay_map(map: &mut HashMap<AgentId, f64>, rate: f64) {
    map.retain(|_, value| {
        *value *= rate;
        value.abs() >= SNAP_EPSILON
    });
}
