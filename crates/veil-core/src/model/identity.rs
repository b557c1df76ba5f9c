use serde::{Deserialize, Serialize};

/// Hidden-role label as inferred (or publicly known) for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    /// The one publicly seated ruler.
    Lord,
    /// Hidden lord-side supporter.
    Loyalist,
    /// Hidden anti-lord agent.
    Rebel,
    /// Double agent that must outlast both sides.
    Turncoat,
    /// No classification yet.
    Unknown,
}

impl Identity {
    /// True for roles whose victory is tied to the lord surviving.
    pub fn is_lord_side(self) -> bool {
        matches!(self, Identity::Lord | Identity::Loyalist)
    }

    pub fn is_rebel(self) -> bool {
        matches!(self, Identity::Rebel)
    }

    pub fn camp(self) -> Camp {
        match self {
            Identity::Lord | Identity::Loyalist => Camp::LordSide,
            Identity::Rebel => Camp::Rebel,
            Identity::Turncoat | Identity::Unknown => Camp::Other,
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Identity::Unknown
    }
}

/// Coarse faction grouping used by vote aggregation and output summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Camp {
    LordSide,
    Rebel,
    Other,
}

/// One inference result: a label plus how much the observer trusts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guess {
    pub identity: Identity,
    pub confidence: f64,
}

impl Guess {
    pub fn unknown() -> Self {
        Self {
            identity: Identity::Unknown,
            confidence: 0.0,
        }
    }

    pub fn certain(identity: Identity) -> Self {
        Self {
            identity,
            confidence: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camps_partition_roles() {
        assert_eq!(Identity::Lord.camp(), Camp::LordSide);
        assert_eq!(Identity::Loyalist.camp(), Camp::LordSide);
        assert_eq!(Identity::Rebel.camp(), Camp::Rebel);
        assert_eq!(Identity::Turncoat.camp(), Camp::Other);
        assert_eq!(Identity::Unknown.camp(), Camp::Other);
    }

    #[test]
    fn certain_guess_has_full_confidence() {
        let g = Guess::certain(Identity::Rebel);
        assert_eq!(g.identity, Identity::Rebel);
        assert_eq!(g.confidence, 1.0);
    }
}
