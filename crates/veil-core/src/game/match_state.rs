use crate::belief::{AgentTable, HabitChoice, RISK_POSTURE};
use crate::game::config::MatchConfig;
use crate::guess;
use crate::hooks::{HookBus, HookContext, HookError, HookOptions, HookResult, HookToken};
use crate::host::DomainEvent;
use crate::model::agent::AgentId;
use crate::model::identity::{Guess, Identity};
use crate::score::{SCORE_EVENT, ScoreCtx};
use crate::wait::{WaitId, WaitOutcome, WaitRefused, WaitRegistry};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Context dispatched to domain-event handlers. Carries the whole agent
/// table by value for the duration of the dispatch, so handlers can mutate
/// any observer's belief state without aliasing the match root.
pub struct EventCtx {
    pub agents: AgentTable,
    pub event: DomainEvent,
    pub round: u32,
    pub turn_id: u64,
    stop: bool,
}

impl EventCtx {
    pub fn halt(&mut self) {
        self.stop = true;
    }
}

impl HookContext for EventCtx {
    fn stopped(&self) -> bool {
        self.stop
    }
}

/// Root object of one match: agent table, both hook buses, the wait
/// registry, and the match RNG. Created at match start, dropped at match
/// end; every component receives it by reference instead of reaching for
/// ambient globals.
pub struct MatchContext {
    agents: AgentTable,
    config: MatchConfig,
    events: HookBus<EventCtx>,
    scores: HookBus<ScoreCtx>,
    waits: WaitRegistry,
    rng: SmallRng,
    round: u32,
    turn_counter: u64,
    decayed_at: HashMap<AgentId, u64>,
}

impl MatchContext {
    pub fn new(seed: u64, config: MatchConfig) -> Self {
        Self {
            agents: AgentTable::new(),
            config,
            events: HookBus::new(),
            scores: HookBus::new(),
            waits: WaitRegistry::new(),
            rng: SmallRng::seed_from_u64(seed),
            round: 0,
            turn_counter: 0,
            decayed_at: HashMap::new(),
        }
    }

    /// Registers a seat, draws its persona from the configured table, and
    /// seeds mutual first impressions against every seat already present.
    pub fn add_agent(&mut self, id: AgentId, own_role: Identity, tracked: bool) {
        let toggles = self.config.personas;
        let persona = self
            .config
            .persona_table()
            .draw(&mut self.rng, |p| toggles.allows(p));
        self.agents.add_agent(id, persona, own_role, tracked);

        let posture = if self.rng.gen_bool(0.5) {
            HabitChoice::Bold
        } else {
            HabitChoice::Cautious
        };
        if let Some(entry) = self.agents.get_mut(id) {
            entry.belief_mut().set_habit_once(RISK_POSTURE, posture);
        }

        let others: Vec<AgentId> = self
            .agents
            .agents()
            .map(|entry| entry.id())
            .filter(|other| *other != id)
            .collect();
        for other in others {
            if let Some(entry) = self.agents.get_mut(id) {
                entry.belief_mut().seed_impression(other, &mut self.rng);
            }
            if let Some(entry) = self.agents.get_mut(other) {
                entry.belief_mut().seed_impression(id, &mut self.rng);
            }
        }
    }

    pub fn agents(&self) -> &AgentTable {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut AgentTable {
        &mut self.agents
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Monotonic turn clock, also the timebase of the wait registry.
    pub fn now(&self) -> u64 {
        self.turn_counter
    }

    /// Uniform sample from the match RNG (pre-rolled noise and the like).
    pub fn roll(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Turn-start housekeeping: advances the clock, resets every tracked
    /// observer's turn memory, decays the active agent's beliefs (guarded
    /// against re-entry within the same turn start), expires due waits, and
    /// finally announces the turn on the event bus.
    pub fn begin_turn(&mut self, round: u32, active: AgentId) {
        self.round = round;
        self.turn_counter += 1;
        let turn_id = self.turn_counter;

        for entry in self.agents.agents_mut() {
            if entry.tracked() {
                entry.runtime_mut().begin_turn(turn_id, Some(active));
            }
        }
        if let Some(entry) = self.agents.get_mut(active) {
            entry.runtime_mut().count_own_turn();
        }
        self.decay_for_turn(active);
        self.waits.tick(turn_id);

        let mut event = DomainEvent::new(crate::host::DomainEventKind::TurnBegin);
        event.source = Some(active);
        self.emit_domain_event(event);
    }

    /// Runs turn-start decay for `agent` at most once per turn. Returns
    /// whether decay actually ran.
    pub fn decay_for_turn(&mut self, agent: AgentId) -> bool {
        if self.decayed_at.get(&agent) == Some(&self.turn_counter) {
            return false;
        }
        let Some(entry) = self.agents.get_mut(agent) else {
            return false;
        };
        let persona = *entry.persona();
        entry.belief_mut().decay(&persona);
        self.decayed_at.insert(agent, self.turn_counter);
        true
    }

    pub fn install_event_hook(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut EventCtx) -> HookResult<EventCtx> + 'static,
        options: HookOptions,
    ) -> HookToken {
        self.events.on(name, handler, options)
    }

    pub fn remove_event_hook(&mut self, name: &str, token: HookToken) -> bool {
        self.events.off(name, token)
    }

    /// Extension point for external rule modules: subscribe to the scoring
    /// pipeline at a priority without touching this crate.
    pub fn install_scoring_hook(
        &mut self,
        handler: impl FnMut(&mut ScoreCtx) -> HookResult<ScoreCtx> + 'static,
        priority: i32,
    ) -> HookToken {
        self.scores
            .on(SCORE_EVENT, handler, HookOptions::priority(priority))
    }

    pub fn remove_scoring_hook(&mut self, token: HookToken) -> bool {
        self.scores.off(SCORE_EVENT, token)
    }

    pub fn set_event_error_sink(&mut self, sink: impl FnMut(&str, &HookError) + 'static) {
        self.events.set_error_sink(sink);
    }

    pub fn set_score_error_sink(&mut self, sink: impl FnMut(&str, &HookError) + 'static) {
        self.scores.set_error_sink(sink);
    }

    /// Dispatches a normalized host notification to the handlers subscribed
    /// on its kind's channel. The agent table travels inside the context and
    /// is reinstated afterwards, mutations included.
    pub fn emit_domain_event(&mut self, event: DomainEvent) {
        let channel = event.kind.channel();
        let ctx = EventCtx {
            agents: std::mem::take(&mut self.agents),
            event,
            round: self.round,
            turn_id: self.turn_counter,
            stop: false,
        };
        let ctx = self.events.emit(channel, ctx);
        self.agents = ctx.agents;
    }

    /// Runs one decision-point context through the scoring pipeline.
    pub fn score(&mut self, ctx: ScoreCtx) -> ScoreCtx {
        self.scores.emit(SCORE_EVENT, ctx)
    }

    pub fn scoring_channels(&self) -> Vec<String> {
        self.scores.list()
    }

    pub fn guess(&self, observer: AgentId, target: AgentId) -> Guess {
        guess::guess_for(&self.agents, observer, target, self.config.expected_rebels)
    }

    pub fn consensus(&self, target: AgentId) -> Guess {
        guess::consensus(&self.agents, target, self.config.expected_rebels)
    }

    pub fn begin_wait(
        &mut self,
        key: impl Into<String>,
        timeout: u64,
        cooldown: u64,
        continuation: impl FnOnce(WaitOutcome) + 'static,
    ) -> Result<WaitId, WaitRefused> {
        self.waits
            .begin(key, self.turn_counter, timeout, cooldown, continuation)
    }

    pub fn acknowledge_wait(&mut self, id: WaitId) -> bool {
        self.waits.acknowledge(id)
    }

    pub fn cancel_wait(&mut self, id: WaitId) -> bool {
        self.waits.cancel(id, self.turn_counter)
    }

    pub fn waits(&self) -> &WaitRegistry {
        &self.waits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DomainEventKind;
    use crate::score::{Candidate, ScoreKind, ScoreStage};

    fn fresh() -> MatchContext {
        let mut ctx = MatchContext::new(42, MatchConfig::default());
        ctx.add_agent(AgentId::new(0), Identity::Lord, true);
        ctx.add_agent(AgentId::new(1), Identity::Loyalist, true);
        ctx.add_agent(AgentId::new(2), Identity::Rebel, true);
        ctx
    }

    #[test]
    fn setup_draws_personas_and_seeds_impressions() {
        let ctx = fresh();
        let loyal = ctx.agents().get(AgentId::new(1)).unwrap();
        assert_eq!(loyal.belief().tracked_opponents(), 2);
        assert!(loyal.belief().habit(crate::belief::RISK_POSTURE).is_some());
        // Same seed, same draws.
        let again = fresh();
        for id in [0u8, 1, 2] {
            assert_eq!(
                ctx.agents().get(AgentId::new(id)).unwrap().persona().id(),
                again.agents().get(AgentId::new(id)).unwrap().persona().id()
            );
        }
    }

    #[test]
    fn decay_runs_once_per_turn_start() {
        let mut ctx = fresh();
        ctx.agents_mut()
            .get_mut(AgentId::new(1))
            .unwrap()
            .belief_mut()
            .add_rage(10.0);
        ctx.begin_turn(1, AgentId::new(1));
        let after_first = ctx
            .agents()
            .get(AgentId::new(1))
            .unwrap()
            .belief()
            .rage();
        assert!(after_first < 10.0);
        // Re-entry within the same turn start is a no-op.
        assert!(!ctx.decay_for_turn(AgentId::new(1)));
        assert_eq!(
            ctx.agents().get(AgentId::new(1)).unwrap().belief().rage(),
            after_first
        );
    }

    #[test]
    fn domain_events_reach_handlers_and_mutations_stick() {
        let mut ctx = fresh();
        ctx.install_event_hook(
            DomainEventKind::Damage.channel(),
            |evt: &mut EventCtx| {
                if let (Some(_), Some(target)) = (evt.event.source, evt.event.target) {
                    if let Some(entry) = evt.agents.get_mut(target) {
                        entry.belief_mut().add_rage(evt.event.magnitude);
                    }
                }
                Ok(None)
            },
            HookOptions::priority(5),
        );
        ctx.emit_domain_event(DomainEvent::damage(AgentId::new(2), AgentId::new(1), 3.0));
        assert_eq!(
            ctx.agents().get(AgentId::new(1)).unwrap().belief().rage(),
            3.0
        );
    }

    #[test]
    fn external_scoring_hooks_extend_the_pipeline() {
        let mut ctx = fresh();
        let token = ctx.install_scoring_hook(
            |score: &mut ScoreCtx| {
                score.add(1.5);
                Ok(None)
            },
            3,
        );
        let out = ctx.score(ScoreCtx::new(
            ScoreKind::ChooseCard,
            ScoreStage::Final,
            AgentId::new(1),
            Candidate::new("strike"),
            1.0,
        ));
        assert_eq!(out.score, 2.5);
        assert!(ctx.remove_scoring_hook(token));
    }

    #[test]
    fn begin_turn_expires_due_waits() {
        let mut ctx = fresh();
        let id = ctx.begin_wait("signal", 1, 2, |_| {}).unwrap();
        ctx.begin_turn(1, AgentId::new(0));
        ctx.begin_turn(1, AgentId::new(1));
        assert!(matches!(
            ctx.waits().state(id),
            Some(crate::wait::WaitState::Cooldown { .. })
        ));
    }
}
