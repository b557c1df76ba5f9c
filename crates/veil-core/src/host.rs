//! Boundary to the host engine. The core consumes the host through this
//! narrow trait plus normalized domain events; nothing else about engine
//! internals is assumed.

use crate::model::agent::AgentId;
use crate::model::cause::CauseChain;
use crate::model::snapshot::AgentSnapshot;

/// Match resolution mode. Most inference is a no-op outside hidden-role
/// matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HiddenRole,
    Other,
}

/// Read/query callbacks the host must supply.
///
/// Implementations are trusted to be cheap and infallible; a host that
/// cannot answer should return the neutral value (0.0, or `None` for
/// snapshots) rather than panic, and the core treats those answers as
/// "no information".
pub trait Host {
    fn mode(&self) -> GameMode;

    /// Baseline disposition of `from` toward `to`. The core overrides this
    /// per agent-pair while identities are unresolved.
    fn attitude(&self, from: AgentId, to: AgentId) -> f64;

    /// Utility of `candidate` played by `source` against `target`, as seen
    /// by `viewer`. Negative means harmful to the target.
    fn effect_of(&self, candidate: &str, source: AgentId, target: AgentId, viewer: AgentId)
    -> f64;

    /// Utility of a resolved action from `viewer`'s perspective.
    fn result_of(&self, action: &str, viewer: AgentId) -> f64;

    /// Fresh resource readout, or `None` for unknown/removed agents.
    fn snapshot(&self, agent: AgentId) -> Option<AgentSnapshot>;

    /// Current round number, 1-based.
    fn round(&self) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainEventKind {
    Damage,
    Heal,
    CardUsed,
    DiscardTransfer,
    SkillUsed,
    GestureThrown,
    CardsDrawn,
    TurnBegin,
}

impl DomainEventKind {
    /// Bus channel name for this kind of event.
    pub fn channel(self) -> &'static str {
        match self {
            DomainEventKind::Damage => "damage",
            DomainEventKind::Heal => "heal",
            DomainEventKind::CardUsed => "card_used",
            DomainEventKind::DiscardTransfer => "discard_transfer",
            DomainEventKind::SkillUsed => "skill_used",
            DomainEventKind::GestureThrown => "gesture_thrown",
            DomainEventKind::CardsDrawn => "cards_drawn",
            DomainEventKind::TurnBegin => "turn_begin",
        }
    }
}

/// Normalized notification from the host. The cause chain is flattened once
/// at ingestion; handlers never walk live engine state.
///
/// Delivery contract: at most once per resolved event. Handlers stay
/// idempotent-by-construction through the additive-with-clamp belief design
/// rather than through deduplication bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    pub kind: DomainEventKind,
    pub source: Option<AgentId>,
    pub target: Option<AgentId>,
    pub magnitude: f64,
    pub cause: CauseChain,
}

impl DomainEvent {
    pub fn new(kind: DomainEventKind) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            magnitude: 0.0,
            cause: CauseChain::new(),
        }
    }

    pub fn damage(source: AgentId, target: AgentId, amount: f64) -> Self {
        Self {
            kind: DomainEventKind::Damage,
            source: Some(source),
            target: Some(target),
            magnitude: amount,
            cause: CauseChain::new(),
        }
    }

    pub fn heal(source: AgentId, target: AgentId, amount: f64) -> Self {
        Self {
            kind: DomainEventKind::Heal,
            source: Some(source),
            target: Some(target),
            magnitude: amount,
            cause: CauseChain::new(),
        }
    }

    pub fn card_used(source: AgentId, target: Option<AgentId>) -> Self {
        Self {
            kind: DomainEventKind::CardUsed,
            source: Some(source),
            target,
            magnitude: 0.0,
            cause: CauseChain::new(),
        }
    }

    pub fn with_cause(mut self, cause: CauseChain) -> Self {
        self.cause = cause;
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }
}
