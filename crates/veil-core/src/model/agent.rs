use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable identifier of one match participant (seat order at match start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u8);

impl AgentId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Capability flags populated at agent setup.
///
/// The scoring rules query these instead of probing arbitrary host fields, so
/// the pipeline depends on a stable contract rather than on engine internals.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    tags: HashSet<String>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
