//! Identity inference: per-observer guesses over the belief axes and the
//! confidence-weighted consensus vote across all tracked observers.
//!
//! Both entry points are pure with respect to already-observed inputs: no
//! randomness, no mutation, identical results for identical state. Callers
//! may invoke them any number of times per decision point.

mod resolver;

pub use resolver::{
    REBEL_CANDIDATE_CONFIDENCE, SIGNAL_THRESHOLD, SOFT_ASSIGN_CONFIDENCE, SOFT_EXPOSE_THRESHOLD,
    consensus, expected_rebels, guess_for, soft_assignment_active,
};
