use crate::belief::HabitChoice;
use crate::hooks::HookContext;
use crate::model::agent::AgentId;
use crate::model::cause::CauseChain;
use crate::model::identity::{Camp, Guess};
use crate::persona::{PersonaId, Traits};

/// Event name the scoring pipeline dispatches under.
pub const SCORE_EVENT: &str = "score";

/// Subtracted by veto rules. Large enough to push any candidate out of
/// contention while keeping relative order among vetoed candidates intact.
pub const VETO_PENALTY: f64 = 9999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    ChooseCard,
    ChooseTarget,
    ChooseButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStage {
    Base,
    Final,
}

/// Risk posture of a candidate, used by the tempo bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    Seeking,
    Averse,
    Neutral,
}

/// One selectable option at a decision point, pre-classified by the
/// ingestion layer so rules never probe host internals.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Opaque card/skill identifier.
    pub id: String,
    pub target: Option<AgentId>,
    /// Host-estimated effect on the target; negative harms it.
    pub effect: f64,
    /// Intrinsic value proxy of the spent resource.
    pub value: f64,
    /// Takes effect on a later turn instead of immediately.
    pub delayed: bool,
    pub risk: RiskClass,
    /// A life-saving play on the target.
    pub rescue: bool,
    /// Seats between the current actor and the agent able to use this
    /// candidate, when the option is a hand-off.
    pub turn_distance: Option<u32>,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: None,
            effect: 0.0,
            value: 0.0,
            delayed: false,
            risk: RiskClass::Neutral,
            rescue: false,
            turn_distance: None,
        }
    }

    pub fn with_target(mut self, target: AgentId, effect: f64) -> Self {
        self.target = Some(target);
        self.effect = effect;
        self
    }

    pub fn harms_target(&self) -> bool {
        self.target.is_some() && self.effect < 0.0
    }

    pub fn helps_target(&self) -> bool {
        self.target.is_some() && self.effect > 0.0
    }
}

/// Read-only belief glimpse assembled once per decision point.
///
/// Rules consume this snapshot instead of the live stores, which keeps them
/// pure functions of the context and trivially unit-testable.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    pub persona: PersonaId,
    pub traits: Traits,
    /// Perceived attitude of the player toward the candidate target.
    pub attitude_to_target: f64,
    pub grudge_to_target: f64,
    pub rage: f64,
    pub rage_towards_target: f64,
    /// Situation index in `[-1, 1]`; positive means ahead.
    pub situation: f64,
    pub target_guess: Guess,
    pub own_camp: Camp,
    pub lord: Option<AgentId>,
    pub hp: f64,
    pub hand: u32,
    pub keepable: u32,
    pub recent_attack_target: Option<AgentId>,
    /// Risk posture rolled once at seat registration, stable all match.
    pub risk_habit: Option<HabitChoice>,
    /// Strongest strike-density read among seats leaning hostile.
    pub incoming_strike_tempo: f64,
    /// Pre-rolled uniform sample for the impulsive-noise rule; rolling it
    /// outside the pipeline keeps every rule deterministic per context.
    pub noise_roll: f64,
    pub noise_enabled: bool,
}

impl Default for ScoreView {
    fn default() -> Self {
        Self {
            persona: PersonaId::Balanced,
            traits: Traits::default(),
            attitude_to_target: 0.0,
            grudge_to_target: 0.0,
            rage: 0.0,
            rage_towards_target: 0.0,
            situation: 0.0,
            target_guess: Guess::unknown(),
            own_camp: Camp::Other,
            lord: None,
            hp: 4.0,
            hand: 4,
            keepable: 4,
            recent_attack_target: None,
            risk_habit: None,
            incoming_strike_tempo: 0.0,
            noise_roll: 0.5,
            noise_enabled: false,
        }
    }
}

/// Mutable record threaded through the rule pipeline for one decision
/// point. Discarded as soon as the decision completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCtx {
    pub kind: ScoreKind,
    pub stage: ScoreStage,
    pub player: AgentId,
    pub candidate: Candidate,
    pub all: Vec<Candidate>,
    pub base: f64,
    pub score: f64,
    pub view: ScoreView,
    pub cause: Option<CauseChain>,
    stop: bool,
}

impl ScoreCtx {
    pub fn new(
        kind: ScoreKind,
        stage: ScoreStage,
        player: AgentId,
        candidate: Candidate,
        base: f64,
    ) -> Self {
        Self {
            kind,
            stage,
            player,
            candidate,
            all: Vec::new(),
            base,
            score: base,
            view: ScoreView::default(),
            cause: None,
            stop: false,
        }
    }

    pub fn with_view(mut self, view: ScoreView) -> Self {
        self.view = view;
        self
    }

    pub fn with_all(mut self, all: Vec<Candidate>) -> Self {
        self.all = all;
        self
    }

    /// Additive contribution; the only sanctioned way for a rule to shape
    /// the score. Non-finite deltas are dropped.
    pub fn add(&mut self, delta: f64) {
        if delta.is_finite() {
            self.score += delta;
        }
    }

    /// Marks the candidate effectively unselectable.
    pub fn veto(&mut self) {
        self.score -= VETO_PENALTY;
    }

    pub fn halt(&mut self) {
        self.stop = true;
    }
}

impl HookContext for ScoreCtx {
    fn stopped(&self) -> bool {
        self.stop
    }
}
