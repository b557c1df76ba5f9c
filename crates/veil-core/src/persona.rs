//! Behavioral archetypes drawn once per agent at match start.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Match-long archetype label. Immutable once drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonaId {
    Balanced,
    Impulsive,
    Petty,
    Camouflage,
}

impl PersonaId {
    pub const ALL: [PersonaId; 4] = [
        PersonaId::Balanced,
        PersonaId::Impulsive,
        PersonaId::Petty,
        PersonaId::Camouflage,
    ];

    pub const fn default_weight(self) -> u32 {
        match self {
            PersonaId::Balanced => 45,
            PersonaId::Impulsive => 20,
            PersonaId::Petty => 20,
            PersonaId::Camouflage => 15,
        }
    }

    /// Per-persona anger decay as `(rage, rage_towards)` multipliers.
    /// Impulsive and petty archetypes hold on to anger longer.
    pub const fn rage_decay_rates(self) -> (f64, f64) {
        match self {
            PersonaId::Balanced => (0.88, 0.92),
            PersonaId::Impulsive => (0.90, 0.93),
            PersonaId::Petty => (0.89, 0.95),
            PersonaId::Camouflage => (0.86, 0.90),
        }
    }
}

/// Trait scalars layered over the documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub aggressiveness: f64,
    pub insight: f64,
    pub revenge_weight: f64,
    pub randomness: f64,
    /// Turns a camouflage persona keeps hostility toward the lord damped.
    pub camouflage_rounds: u32,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            aggressiveness: 0.5,
            insight: 0.5,
            revenge_weight: 1.0,
            randomness: 0.0,
            camouflage_rounds: 0,
        }
    }
}

impl Traits {
    pub fn for_persona(id: PersonaId) -> Self {
        let base = Traits::default();
        match id {
            PersonaId::Balanced => base,
            PersonaId::Impulsive => Self {
                aggressiveness: 0.8,
                randomness: 0.12,
                insight: 0.35,
                ..base
            },
            PersonaId::Petty => Self {
                aggressiveness: 0.6,
                revenge_weight: 2.2,
                ..base
            },
            PersonaId::Camouflage => Self {
                aggressiveness: 0.55,
                insight: 0.6,
                camouflage_rounds: 3,
                ..base
            },
        }
    }
}

/// One agent's drawn archetype plus its resolved trait vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    id: PersonaId,
    traits: Traits,
}

impl Persona {
    pub fn new(id: PersonaId) -> Self {
        Self {
            id,
            traits: Traits::for_persona(id),
        }
    }

    /// Builds a persona with explicit trait overrides (setup hooks only).
    pub fn with_traits(id: PersonaId, traits: Traits) -> Self {
        Self { id, traits }
    }

    pub fn id(&self) -> PersonaId {
        self.id
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }
}

impl Default for Persona {
    fn default() -> Self {
        Persona::new(PersonaId::Balanced)
    }
}

/// Weighted draw table over the enabled archetypes.
#[derive(Debug, Clone)]
pub struct PersonaTable {
    weights: [(PersonaId, u32); 4],
}

impl Default for PersonaTable {
    fn default() -> Self {
        Self {
            weights: [
                (PersonaId::Balanced, PersonaId::Balanced.default_weight()),
                (PersonaId::Impulsive, PersonaId::Impulsive.default_weight()),
                (PersonaId::Petty, PersonaId::Petty.default_weight()),
                (PersonaId::Camouflage, PersonaId::Camouflage.default_weight()),
            ],
        }
    }
}

impl PersonaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, id: PersonaId, weight: u32) -> Self {
        for entry in &mut self.weights {
            if entry.0 == id {
                entry.1 = weight;
            }
        }
        self
    }

    pub fn weight_of(&self, id: PersonaId) -> u32 {
        self.weights
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, weight)| *weight)
            .unwrap_or(0)
    }

    /// Weighted random selection among enabled ids. When every candidate is
    /// disabled or zero-weighted the draw falls back to `Balanced`, so a
    /// caller can never end up without a persona.
    pub fn draw<R: Rng>(&self, rng: &mut R, enabled: impl Fn(PersonaId) -> bool) -> Persona {
        let mut pool: Vec<(PersonaId, u32)> = self
            .weights
            .iter()
            .copied()
            .filter(|(id, weight)| *weight > 0 && enabled(*id))
            .collect();
        if pool.is_empty() {
            pool.push((PersonaId::Balanced, 1));
        }
        let total: u32 = pool.iter().map(|(_, weight)| weight).sum();
        let mut roll = rng.gen_range(0..total);
        for (id, weight) in &pool {
            if roll < *weight {
                return Persona::new(*id);
            }
            roll -= weight;
        }
        Persona::new(pool[pool.len() - 1].0)
    }
}
