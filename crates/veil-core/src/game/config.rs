use crate::persona::{PersonaId, PersonaTable};
use serde::{Deserialize, Serialize};

/// Which archetypes the match may draw. The generator falls back to
/// `Balanced` when everything is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaToggles {
    pub balanced: bool,
    pub impulsive: bool,
    pub petty: bool,
    pub camouflage: bool,
}

impl Default for PersonaToggles {
    fn default() -> Self {
        Self {
            balanced: true,
            impulsive: true,
            petty: true,
            camouflage: true,
        }
    }
}

impl PersonaToggles {
    pub fn allows(self, id: PersonaId) -> bool {
        match id {
            PersonaId::Balanced => self.balanced,
            PersonaId::Impulsive => self.impulsive,
            PersonaId::Petty => self.petty,
            PersonaId::Camouflage => self.camouflage,
        }
    }
}

/// Draw-weight overrides, defaulting to the documented 45/20/20/15 split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaWeights {
    pub balanced: u32,
    pub impulsive: u32,
    pub petty: u32,
    pub camouflage: u32,
}

impl Default for PersonaWeights {
    fn default() -> Self {
        Self {
            balanced: PersonaId::Balanced.default_weight(),
            impulsive: PersonaId::Impulsive.default_weight(),
            petty: PersonaId::Petty.default_weight(),
            camouflage: PersonaId::Camouflage.default_weight(),
        }
    }
}

/// Match-level tuning knobs, deserialized from the host's settings blob.
/// Unknown fields are ignored and missing fields take defaults, so older
/// settings files keep working.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatchConfig {
    pub personas: PersonaToggles,
    pub weights: PersonaWeights,
    pub noise_enabled: bool,
    /// Overrides the seat-count estimate of the hidden-rebel pool.
    pub expected_rebels: Option<u8>,
}

impl MatchConfig {
    pub fn persona_table(&self) -> PersonaTable {
        PersonaTable::new()
            .with_weight(PersonaId::Balanced, self.weights.balanced)
            .with_weight(PersonaId::Impulsive, self.weights.impulsive)
            .with_weight(PersonaId::Petty, self.weights.petty)
            .with_weight(PersonaId::Camouflage, self.weights.camouflage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_blob_yields_defaults() {
        let cfg: MatchConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.personas.balanced);
        assert_eq!(cfg.weights.balanced, 45);
        assert_eq!(cfg.expected_rebels, None);
        assert!(!cfg.noise_enabled);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut cfg = MatchConfig::default();
        cfg.personas.camouflage = false;
        cfg.weights.petty = 60;
        cfg.expected_rebels = Some(2);
        cfg.noise_enabled = true;
        let blob = serde_json::to_string(&cfg).unwrap();
        let back: MatchConfig = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn persona_table_reflects_weight_overrides() {
        let mut cfg = MatchConfig::default();
        cfg.weights.impulsive = 99;
        let table = cfg.persona_table();
        assert_eq!(table.weight_of(PersonaId::Impulsive), 99);
        assert_eq!(table.weight_of(PersonaId::Balanced), 45);
    }
}
