use crate::model::agent::AgentId;
use std::collections::HashMap;

/// Hard cap on remembered events per turn, bounding memory per observer.
pub const TURN_EVENT_CAP: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEventKind {
    Damage,
    LifeLoss,
    Heal,
    Draw,
    Discard,
    CardPlay,
}

/// One observed happening inside the current turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnEvent {
    pub kind: TurnEventKind,
    pub source: Option<AgentId>,
    pub target: Option<AgentId>,
    pub magnitude: f64,
    /// Card or skill name for plays, when known.
    pub label: Option<String>,
}

impl TurnEvent {
    pub fn new(kind: TurnEventKind) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            magnitude: 0.0,
            label: None,
        }
    }

    pub fn between(mut self, source: Option<AgentId>, target: Option<AgentId>) -> Self {
        self.source = source;
        self.target = target;
        self
    }

    pub fn magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Per-observer scratch log of the current turn, reset at every turn begin.
#[derive(Debug, Clone, Default)]
pub struct TurnMemory {
    turn_id: u64,
    active_agent: Option<AgentId>,
    events: Vec<TurnEvent>,
}

impl TurnMemory {
    pub fn reset(&mut self, turn_id: u64, active_agent: Option<AgentId>) {
        self.turn_id = turn_id;
        self.active_agent = active_agent;
        self.events.clear();
    }

    pub fn record(&mut self, event: TurnEvent) {
        if self.events.len() >= TURN_EVENT_CAP {
            return;
        }
        self.events.push(event);
    }

    pub fn turn_id(&self) -> u64 {
        self.turn_id
    }

    pub fn active_agent(&self) -> Option<AgentId> {
        self.active_agent
    }

    pub fn events(&self) -> &[TurnEvent] {
        &self.events
    }

    /// Total damage the given agent dealt within this turn.
    pub fn damage_dealt_by(&self, agent: AgentId) -> f64 {
        self.events
            .iter()
            .filter(|e| e.kind == TurnEventKind::Damage && e.source == Some(agent))
            .map(|e| e.magnitude)
            .sum()
    }

    /// Cards the given agent has played this turn.
    pub fn plays_by(&self, agent: AgentId) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == TurnEventKind::CardPlay && e.source == Some(agent))
            .count()
    }

    /// Plays of a specific card by the given agent this turn.
    pub fn plays_of(&self, agent: AgentId, label: &str) -> usize {
        self.events
            .iter()
            .filter(|e| {
                e.kind == TurnEventKind::CardPlay
                    && e.source == Some(agent)
                    && e.label.as_deref() == Some(label)
            })
            .count()
    }

    /// Label of the agent's most recent play this turn, if any.
    pub fn last_play_of(&self, agent: AgentId) -> Option<&str> {
        self.events
            .iter()
            .rev()
            .find(|e| e.kind == TurnEventKind::CardPlay && e.source == Some(agent))
            .and_then(|e| e.label.as_deref())
    }
}

/// Short-lived marker of an outgoing offensive act, used to veto an
/// immediately-reciprocal rescue of the attacker by its own victim.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentAttack {
    pub target: AgentId,
    pub cause: String,
    pub set_at_round: u32,
}

/// Rolling estimate of how strike-dense one opponent's openings are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TempoRecord {
    pub strike: f64,
    pub samples: u32,
    pub last_round: u32,
}

/// Per-agent turn bookkeeping outside the belief model proper.
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    turns_taken: u32,
    recent_attack: Option<RecentAttack>,
    turn_memory: TurnMemory,
    tempo: HashMap<AgentId, TempoRecord>,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_turn(&mut self, turn_id: u64, active_agent: Option<AgentId>) {
        self.turn_memory.reset(turn_id, active_agent);
    }

    /// Counts a completed own turn (camouflage damping keys off this).
    pub fn count_own_turn(&mut self) {
        self.turns_taken = self.turns_taken.saturating_add(1);
    }

    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn mark_attack(&mut self, target: AgentId, cause: impl Into<String>, round: u32) {
        self.recent_attack = Some(RecentAttack {
            target,
            cause: cause.into(),
            set_at_round: round,
        });
    }

    pub fn clear_attack(&mut self) {
        self.recent_attack = None;
    }

    /// The marker only counts as recent during the round it was set and the
    /// one after; a staler marker reads as no attack at all.
    pub fn recent_attack(&self, round: u32) -> Option<&RecentAttack> {
        self.recent_attack
            .as_ref()
            .filter(|attack| round.saturating_sub(attack.set_at_round) <= 1)
    }

    pub fn turn_memory(&self) -> &TurnMemory {
        &self.turn_memory
    }

    pub fn turn_memory_mut(&mut self) -> &mut TurnMemory {
        &mut self.turn_memory
    }

    pub fn tempo(&self, target: AgentId) -> TempoRecord {
        self.tempo.get(&target).copied().unwrap_or_default()
    }

    /// Folds one tempo cue into the rolling estimate, bounded to `[-2, 2]`.
    pub fn update_tempo(&mut self, target: AgentId, delta: f64, round: u32) {
        if !delta.is_finite() || delta == 0.0 {
            return;
        }
        let record = self.tempo.entry(target).or_default();
        record.strike = (record.strike * 0.85 + delta).clamp(-2.0, 2.0);
        record.samples = record.samples.saturating_add(1);
        record.last_round = round;
    }

    pub fn prune_tempo(&mut self, target: AgentId) {
        self.tempo.remove(&target);
    }
}

/// Public-information counters used for camp output summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentStats {
    draws: u32,
    damage_dealt: f64,
}

impl AgentStats {
    pub fn record_draws(&mut self, count: u32) {
        self.draws = self.draws.saturating_add(count);
    }

    pub fn record_damage(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.damage_dealt += amount;
        }
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn damage_dealt(&self) -> f64 {
        self.damage_dealt
    }

    /// Blended contribution estimate: card flow plus damage output.
    pub fn core_score(&self) -> f64 {
        f64::from(self.draws) * 0.6 + self.damage_dealt * 2.2
    }
}
