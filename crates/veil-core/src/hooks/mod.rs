//! Generic named-event bus with priorities, short-circuiting, and error
//! isolation. Knows nothing about game semantics; the same type drives both
//! domain-event notification and the scoring pipeline.

mod bus;

pub use bus::{HookBus, HookContext, HookError, HookOptions, HookResult, HookToken};
