use crate::model::agent::AgentId;

/// Traversal cap when resolving the originating card or skill of an effect.
/// Chains deeper than this are treated as "cause unknown", never as an error.
pub const MAX_CAUSE_DEPTH: usize = 12;

/// One step in the causal chain behind a resolved effect.
#[derive(Debug, Clone, PartialEq)]
pub struct CauseLink {
    pub name: String,
    pub source: Option<AgentId>,
    /// True for links that invert the helpful/harmful polarity of everything
    /// beneath them (a counterspell cancelling a counterspell, and so on).
    pub inverts: bool,
}

/// Immutable, pre-flattened causal chain attached to an ingested event.
///
/// The ingestion layer flattens the host's live event graph once; consumers
/// walk this value object instead of re-walking mutable engine state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CauseChain {
    links: Vec<CauseLink>,
}

impl CauseChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_links(links: Vec<CauseLink>) -> Self {
        Self { links }
    }

    pub fn push(&mut self, link: CauseLink) {
        self.links.push(link);
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.links.len()
    }

    /// Name of the originating card or skill, or `None` when the chain is
    /// empty or exceeds [`MAX_CAUSE_DEPTH`].
    pub fn root_name(&self) -> Option<&str> {
        if self.links.is_empty() || self.links.len() > MAX_CAUSE_DEPTH {
            return None;
        }
        self.links.last().map(|link| link.name.as_str())
    }

    /// Net polarity after counterspell nesting: `1.0` when the original
    /// intent stands, `-1.0` when an odd number of inverting links flips it.
    /// Chains past the depth cap report neutral polarity.
    pub fn polarity(&self) -> f64 {
        if self.links.len() > MAX_CAUSE_DEPTH {
            return 0.0;
        }
        let inversions = self.links.iter().filter(|link| link.inverts).count();
        if inversions % 2 == 0 { 1.0 } else { -1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str, inverts: bool) -> CauseLink {
        CauseLink {
            name: name.to_string(),
            source: None,
            inverts,
        }
    }

    #[test]
    fn root_name_reads_deepest_link() {
        let chain = CauseChain::from_links(vec![link("duel", false), link("strike", false)]);
        assert_eq!(chain.root_name(), Some("strike"));
    }

    #[test]
    fn over_deep_chain_means_cause_unknown() {
        let links = (0..=MAX_CAUSE_DEPTH).map(|_| link("counter", true)).collect();
        let chain = CauseChain::from_links(links);
        assert_eq!(chain.root_name(), None);
        assert_eq!(chain.polarity(), 0.0);
    }

    #[test]
    fn odd_inversion_count_flips_polarity() {
        let chain = CauseChain::from_links(vec![link("duel", false), link("counter", true)]);
        assert_eq!(chain.polarity(), -1.0);
        let chain = CauseChain::from_links(vec![
            link("duel", false),
            link("counter", true),
            link("counter", true),
        ]);
        assert_eq!(chain.polarity(), 1.0);
    }
}
