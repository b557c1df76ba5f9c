use std::collections::HashMap;
use std::fmt;

/// Contract the dispatched context must satisfy: expose its stop flag so the
/// bus can halt the chain when a handler requests it.
pub trait HookContext {
    fn stopped(&self) -> bool;
}

/// A handler failure. Caught by the bus, reported to the error sink, and
/// treated as a no-op so one bad handler never blocks the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HookError {}

/// `Ok(Some(next))` replaces the context for subsequent handlers;
/// `Ok(None)` keeps the (possibly mutated-in-place) current one.
pub type HookResult<C> = Result<Option<C>, HookError>;

/// Subscription handle returned by [`HookBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookToken(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookOptions {
    pub priority: i32,
    pub once: bool,
}

impl HookOptions {
    pub fn priority(priority: i32) -> Self {
        Self {
            priority,
            once: false,
        }
    }

    pub fn once(priority: i32) -> Self {
        Self {
            priority,
            once: true,
        }
    }
}

type Handler<C> = Box<dyn FnMut(&mut C) -> HookResult<C>>;
type ErrorSink = Box<dyn FnMut(&str, &HookError)>;

struct HookEntry<C> {
    token: HookToken,
    priority: i32,
    once: bool,
    handler: Handler<C>,
}

/// Per-match registry of `event name -> ordered handler list`.
///
/// Handlers for a name run in descending priority; ties preserve
/// registration order. Rebuilt at match start, never persisted.
pub struct HookBus<C> {
    channels: HashMap<String, Vec<HookEntry<C>>>,
    next_token: u64,
    sink: Option<ErrorSink>,
}

impl<C> Default for HookBus<C> {
    fn default() -> Self {
        Self {
            channels: HashMap::new(),
            next_token: 0,
            sink: None,
        }
    }
}

impl<C: HookContext> HookBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes handler failures somewhere visible (the rules layer installs a
    /// tracing sink). Without a sink, failures are still isolated, just
    /// unreported.
    pub fn set_error_sink(&mut self, sink: impl FnMut(&str, &HookError) + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn on(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut C) -> HookResult<C> + 'static,
        options: HookOptions,
    ) -> HookToken {
        let token = HookToken(self.next_token);
        self.next_token += 1;
        let entries = self.channels.entry(name.into()).or_default();
        entries.push(HookEntry {
            token,
            priority: options.priority,
            once: options.once,
            handler: Box::new(handler),
        });
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.priority));
        token
    }

    /// Dispatches `ctx` through the handler chain for `name` and returns the
    /// final context. A handler may replace the context, stop the chain, or
    /// fail (isolated); `once` handlers are dropped after firing.
    pub fn emit(&mut self, name: &str, mut ctx: C) -> C {
        let Some(entries) = self.channels.get_mut(name) else {
            return ctx;
        };
        let mut fired_once = Vec::new();
        for entry in entries.iter_mut() {
            if ctx.stopped() {
                break;
            }
            match (entry.handler)(&mut ctx) {
                Ok(Some(next)) => ctx = next,
                Ok(None) => {}
                Err(err) => {
                    if let Some(sink) = &mut self.sink {
                        sink(name, &err);
                    }
                }
            }
            if entry.once {
                fired_once.push(entry.token);
            }
        }
        if !fired_once.is_empty() {
            entries.retain(|entry| !fired_once.contains(&entry.token));
        }
        ctx
    }

    pub fn has(&self, name: &str) -> bool {
        self.channels
            .get(name)
            .is_some_and(|entries| !entries.is_empty())
    }

    pub fn off(&mut self, name: &str, token: HookToken) -> bool {
        let Some(entries) = self.channels.get_mut(name) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.token != token);
        entries.len() != before
    }

    /// Drops every handler for `name`, or every handler outright.
    pub fn clear(&mut self, name: Option<&str>) {
        match name {
            Some(name) => {
                self.channels.remove(name);
            }
            None => self.channels.clear(),
        }
    }

    /// Event names with at least one live handler, sorted for stable output.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .channels
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}
