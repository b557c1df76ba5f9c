use crate::belief::runtime::{AgentStats, RuntimeState};
use crate::belief::state::BeliefState;
use crate::model::agent::{AgentId, CapabilitySet};
use crate::model::identity::{Camp, Identity};
use crate::persona::Persona;

/// Publicly observable standing of one agent: exposure level and any
/// revealed role. This never contains hidden ground truth.
#[derive(Debug, Clone, Default)]
pub struct PublicProfile {
    shown: f64,
    revealed: Option<Identity>,
    is_lord: bool,
    alive: bool,
}

impl PublicProfile {
    pub fn shown(&self) -> f64 {
        self.shown
    }

    /// Exposure only ever rises; a lower estimate never undoes a reveal.
    pub fn raise_shown(&mut self, level: f64) {
        if level.is_finite() {
            self.shown = self.shown.max(level.clamp(0.0, 1.0));
        }
    }

    pub fn revealed(&self) -> Option<Identity> {
        if self.is_lord {
            return Some(Identity::Lord);
        }
        self.revealed
    }

    pub fn reveal(&mut self, identity: Identity) {
        self.revealed = Some(identity);
        self.shown = 1.0;
    }

    pub fn is_lord(&self) -> bool {
        self.is_lord
    }

    pub fn alive(&self) -> bool {
        self.alive
    }
}

/// One seat: persona, belief model, runtime scratch, and public standing.
#[derive(Debug, Clone)]
pub struct AgentEntry {
    id: AgentId,
    persona: Persona,
    own_role: Identity,
    belief: BeliefState,
    runtime: RuntimeState,
    stats: AgentStats,
    public: PublicProfile,
    tags: CapabilitySet,
    tracked: bool,
}

impl AgentEntry {
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// The agent's own hidden role, known only to itself. Inference about
    /// other agents must never read this field of the target.
    pub fn own_role(&self) -> Identity {
        self.own_role
    }

    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    pub fn belief_mut(&mut self) -> &mut BeliefState {
        &mut self.belief
    }

    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut RuntimeState {
        &mut self.runtime
    }

    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut AgentStats {
        &mut self.stats
    }

    pub fn public(&self) -> &PublicProfile {
        &self.public
    }

    pub fn public_mut(&mut self) -> &mut PublicProfile {
        &mut self.public
    }

    pub fn tags(&self) -> &CapabilitySet {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut CapabilitySet {
        &mut self.tags
    }

    /// Tracked agents run the full mental model; untracked seats (remote
    /// humans) are observed but never observe.
    pub fn tracked(&self) -> bool {
        self.tracked
    }

    pub fn alive(&self) -> bool {
        self.public.alive
    }
}

/// All seats of one match. Owned by the match root; no ambient singletons.
#[derive(Debug, Clone, Default)]
pub struct AgentTable {
    entries: Vec<AgentEntry>,
    starting_seats: usize,
}

impl AgentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a seat at match setup. The lord's role is public from the
    /// first deal; everyone else starts unrevealed.
    pub fn add_agent(&mut self, id: AgentId, persona: Persona, own_role: Identity, tracked: bool) {
        let is_lord = own_role == Identity::Lord;
        self.entries.push(AgentEntry {
            id,
            persona,
            own_role,
            belief: BeliefState::new(),
            runtime: RuntimeState::new(),
            stats: AgentStats::default(),
            public: PublicProfile {
                shown: if is_lord { 1.0 } else { 0.0 },
                revealed: if is_lord { Some(Identity::Lord) } else { None },
                is_lord,
                alive: true,
            },
            tags: CapabilitySet::new(),
            tracked,
        });
        self.starting_seats = self.starting_seats.max(self.entries.len());
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &AgentEntry> {
        self.entries.iter()
    }

    pub fn agents_mut(&mut self) -> impl Iterator<Item = &mut AgentEntry> {
        self.entries.iter_mut()
    }

    pub fn living(&self) -> impl Iterator<Item = &AgentEntry> {
        self.entries.iter().filter(|entry| entry.alive())
    }

    pub fn tracked_ids(&self) -> Vec<AgentId> {
        self.entries
            .iter()
            .filter(|entry| entry.tracked && entry.alive())
            .map(|entry| entry.id)
            .collect()
    }

    pub fn lord(&self) -> Option<AgentId> {
        self.entries
            .iter()
            .find(|entry| entry.public.is_lord)
            .map(|entry| entry.id)
    }

    pub fn starting_seats(&self) -> usize {
        self.starting_seats
    }

    /// Marks an agent permanently removed and prunes every other agent's
    /// per-opponent belief and tempo entries about it, bounding memory.
    pub fn remove_agent(&mut self, id: AgentId) {
        for entry in &mut self.entries {
            if entry.id == id {
                entry.public.alive = false;
            } else {
                entry.belief.prune(id);
                entry.runtime.prune_tempo(id);
            }
        }
    }

    /// Highest core-score living agent within a camp, judged by each
    /// agent's own role (used for end-of-match output summaries).
    pub fn camp_core_leader(&self, camp: Camp) -> Option<AgentId> {
        self.entries
            .iter()
            .filter(|entry| entry.alive() && entry.own_role.camp() == camp)
            .max_by(|a, b| {
                a.stats
                    .core_score()
                    .partial_cmp(&b.stats.core_score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|entry| entry.id)
    }
}
