use crate::model::agent::AgentId;

/// Point-in-time resource readout for one agent, supplied by the host.
///
/// Consumers never cache these across turns; resources change continuously,
/// so every power calculation asks the host for fresh snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    pub agent: AgentId,
    pub hp: f64,
    pub max_hp: f64,
    /// Cards in hand.
    pub hand: u32,
    /// Hand cards retainable past the discard step.
    pub keepable: u32,
    pub equipped: u32,
    /// Pending negative judgement effects.
    pub judgements: u32,
    pub alive: bool,
}

impl AgentSnapshot {
    /// Hand cards beyond the retainable limit.
    pub fn overflow(&self) -> u32 {
        self.hand.saturating_sub(self.keepable)
    }
}
