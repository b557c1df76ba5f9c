//! Bounded wait-for-acknowledgement coordination.
//!
//! An agent that signaled a partner may suspend the host's turn advance
//! until the acknowledgement arrives or a deadline passes. The suspension
//! is an explicit state machine driven by the host's clock, not a busy
//! loop, and the stored continuation is consumed exactly once no matter
//! how the acknowledgement and the timeout race.

use std::collections::HashMap;

/// Handle for one pending wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaitId(u64);

/// Why a resumed continuation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Accepted,
    TimedOut,
    Cancelled,
}

/// Lifecycle of one request. `Pending` is the only state that can resume;
/// every terminal state is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Pending { deadline: u64 },
    Accepted,
    Cooldown { until: u64 },
    Cancelled,
}

/// A new wait was refused because its key is still busy or cooling down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitRefused {
    KeyPending,
    KeyCoolingDown { until: u64 },
}

type Continuation = Box<dyn FnOnce(WaitOutcome)>;

struct WaitEntry {
    id: WaitId,
    key: String,
    state: WaitState,
    cooldown: u64,
    continuation: Option<Continuation>,
}

/// Match-scoped registry of acknowledgement waits, driven by `tick`.
#[derive(Default)]
pub struct WaitRegistry {
    next_id: u64,
    entries: Vec<WaitEntry>,
    cooldowns: HashMap<String, u64>,
}

impl WaitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a wait for `key` expiring at `now + timeout`. Refused while the
    /// same key has a live pending request or sits in cooldown, so one
    /// stalled maneuver cannot stall the match repeatedly.
    pub fn begin(
        &mut self,
        key: impl Into<String>,
        now: u64,
        timeout: u64,
        cooldown: u64,
        continuation: impl FnOnce(WaitOutcome) + 'static,
    ) -> Result<WaitId, WaitRefused> {
        let key = key.into();
        if self
            .entries
            .iter()
            .any(|e| e.key == key && matches!(e.state, WaitState::Pending { .. }))
        {
            return Err(WaitRefused::KeyPending);
        }
        if let Some(&until) = self.cooldowns.get(&key) {
            if until > now {
                return Err(WaitRefused::KeyCoolingDown { until });
            }
        }
        let id = WaitId(self.next_id);
        self.next_id += 1;
        self.entries.push(WaitEntry {
            id,
            key,
            state: WaitState::Pending {
                deadline: now.saturating_add(timeout),
            },
            cooldown,
            continuation: Some(Box::new(continuation)),
        });
        Ok(id)
    }

    /// Acknowledgement arrived. Resumes the continuation and returns true
    /// only if the request was still pending; a request already expired or
    /// cancelled stays in its terminal state and never fires again.
    pub fn acknowledge(&mut self, id: WaitId) -> bool {
        let Some(entry) = self.pending_entry(id) else {
            return false;
        };
        entry.state = WaitState::Accepted;
        let resumed = entry.continuation.take();
        if let Some(resume) = resumed {
            resume(WaitOutcome::Accepted);
        }
        true
    }

    /// Explicit cancellation (set by another rule during dispatch). The
    /// request goes straight to its terminal state, the key enters
    /// cooldown, and the turn loop resumes immediately instead of waiting
    /// for the deadline.
    pub fn cancel(&mut self, id: WaitId, now: u64) -> bool {
        let Some(entry) = self.pending_entry(id) else {
            return false;
        };
        entry.state = WaitState::Cancelled;
        let until = now.saturating_add(entry.cooldown);
        let key = entry.key.clone();
        let resumed = entry.continuation.take();
        self.cooldowns.insert(key, until);
        if let Some(resume) = resumed {
            resume(WaitOutcome::Cancelled);
        }
        true
    }

    /// Advances the clock: every pending request whose deadline has passed
    /// transitions to cooldown and resumes exactly once with `TimedOut`.
    /// Terminal entries past their cooldown are dropped, so the registry
    /// stays bounded over a long match. Returns how many requests resumed.
    pub fn tick(&mut self, now: u64) -> usize {
        let mut resumed = 0;
        let mut continuations = Vec::new();
        for entry in &mut self.entries {
            let WaitState::Pending { deadline } = entry.state else {
                continue;
            };
            if deadline > now {
                continue;
            }
            let until = now.saturating_add(entry.cooldown);
            entry.state = WaitState::Cooldown { until };
            self.cooldowns.insert(entry.key.clone(), until);
            if let Some(resume) = entry.continuation.take() {
                continuations.push(resume);
            }
        }
        self.entries.retain(|entry| match entry.state {
            WaitState::Pending { .. } => true,
            WaitState::Cooldown { until } => until > now,
            WaitState::Accepted | WaitState::Cancelled => false,
        });
        self.cooldowns.retain(|_, until| *until > now);
        for resume in continuations {
            resume(WaitOutcome::TimedOut);
            resumed += 1;
        }
        resumed
    }

    pub fn state(&self, id: WaitId) -> Option<WaitState> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.state)
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.state, WaitState::Pending { .. }))
            .count()
    }

    fn pending_entry(&mut self, id: WaitId) -> Option<&mut WaitEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id && matches!(e.state, WaitState::Pending { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<WaitOutcome>>>, impl FnOnce(WaitOutcome)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |outcome| sink.borrow_mut().push(outcome))
    }

    #[test]
    fn acknowledgement_before_timeout_resumes_once() {
        let mut waits = WaitRegistry::new();
        let (log, resume) = recorder();
        let id = waits.begin("signal", 0, 5, 3, resume).unwrap();

        assert!(waits.acknowledge(id));
        assert_eq!(waits.state(id), Some(WaitState::Accepted));
        // The late timeout must not fire a second resume.
        assert_eq!(waits.tick(10), 0);
        assert_eq!(log.borrow().as_slice(), [WaitOutcome::Accepted]);
    }

    #[test]
    fn timeout_before_acknowledgement_resumes_once() {
        let mut waits = WaitRegistry::new();
        let (log, resume) = recorder();
        let id = waits.begin("signal", 0, 5, 3, resume).unwrap();

        assert_eq!(waits.tick(5), 1);
        assert_eq!(waits.state(id), Some(WaitState::Cooldown { until: 8 }));
        // The late acknowledgement is a no-op.
        assert!(!waits.acknowledge(id));
        assert_eq!(log.borrow().as_slice(), [WaitOutcome::TimedOut]);
    }

    #[test]
    fn simultaneous_race_still_resumes_exactly_once() {
        let mut waits = WaitRegistry::new();
        let (log, resume) = recorder();
        let id = waits.begin("signal", 0, 5, 3, resume).unwrap();

        // Both arrive at the deadline instant; whichever is processed first
        // claims the continuation.
        let resumed_by_tick = waits.tick(5) == 1;
        let resumed_by_ack = waits.acknowledge(id);
        assert!(resumed_by_tick ^ resumed_by_ack);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn cancellation_goes_straight_to_cooldown() {
        let mut waits = WaitRegistry::new();
        let (log, resume) = recorder();
        let id = waits.begin("signal", 0, 5, 3, resume).unwrap();

        assert!(waits.cancel(id, 1));
        assert_eq!(waits.state(id), Some(WaitState::Cancelled));
        assert_eq!(log.borrow().as_slice(), [WaitOutcome::Cancelled]);
        // The key cools down like a timeout would.
        let refused = waits.begin("signal", 2, 5, 3, |_| {});
        assert_eq!(refused.err(), Some(WaitRefused::KeyCoolingDown { until: 4 }));
        // Cancelled requests never fire late.
        assert_eq!(waits.tick(10), 0);
    }

    #[test]
    fn key_is_busy_while_pending_and_free_after_cooldown() {
        let mut waits = WaitRegistry::new();
        let id = waits.begin("signal", 0, 5, 3, |_| {}).unwrap();
        assert_eq!(
            waits.begin("signal", 1, 5, 3, |_| {}).err(),
            Some(WaitRefused::KeyPending)
        );
        waits.tick(5);
        assert_eq!(waits.state(id), Some(WaitState::Cooldown { until: 8 }));
        assert!(waits.begin("signal", 7, 5, 3, |_| {}).is_err());
        assert!(waits.begin("signal", 8, 5, 3, |_| {}).is_ok());
    }

    #[test]
    fn terminal_entries_are_swept_after_cooldown() {
        let mut waits = WaitRegistry::new();
        let timed_out = waits.begin("alpha", 0, 2, 3, |_| {}).unwrap();
        let accepted = waits.begin("beta", 0, 9, 3, |_| {}).unwrap();
        assert!(waits.acknowledge(accepted));

        waits.tick(2);
        // Resolved entries are gone at the next tick, cooled-down ones stay
        // until their cooldown passes.
        assert_eq!(waits.state(accepted), None);
        assert!(matches!(
            waits.state(timed_out),
            Some(WaitState::Cooldown { until: 5 })
        ));
        waits.tick(5);
        assert_eq!(waits.state(timed_out), None);
        assert!(waits.begin("alpha", 5, 2, 3, |_| {}).is_ok());
        assert!(waits.begin("beta", 5, 2, 3, |_| {}).is_ok());
    }

    #[test]
    fn independent_keys_do_not_interfere() {
        let mut waits = WaitRegistry::new();
        let a = waits.begin("alpha", 0, 5, 3, |_| {}).unwrap();
        let b = waits.begin("beta", 0, 9, 3, |_| {}).unwrap();
        assert_eq!(waits.pending_count(), 2);
        assert_eq!(waits.tick(5), 1);
        assert!(matches!(waits.state(a), Some(WaitState::Cooldown { .. })));
        assert!(matches!(waits.state(b), Some(WaitState::Pending { .. })));
    }
}
