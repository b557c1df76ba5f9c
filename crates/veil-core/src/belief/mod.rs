//! Per-agent mental model: decaying belief fields, turn-scoped runtime
//! bookkeeping, and the match-wide agent table.
//!
//! This module is composed of:
//! - `state`: the clamped, decaying `BeliefState` owned by each agent.
//! - `runtime`: turn memory, recent-attack marker, and per-agent counters.
//! - `table`: the `AgentTable` tying persona, belief, and public info together.

mod runtime;
mod state;
mod table;

pub use runtime::{
    AgentStats, RecentAttack, RuntimeState, TURN_EVENT_CAP, TempoRecord, TurnEvent, TurnEventKind,
    TurnMemory,
};
pub use state::{BeliefState, HabitChoice, RISK_POSTURE, SNAP_EPSILON};
pub use table::{AgentEntry, AgentTable, PublicProfile};
