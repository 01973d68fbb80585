//! The carried hidden state.
//!
//! A single vector `a ∈ R^{hidden}` threads the whole sequence: each step
//! reads it, produces a replacement, and the replacement feeds the next
//! step. The state starts at zero and is the only mutable piece of the
//! recurrence.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// The hidden state carried across timesteps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HiddenState {
    /// Current hidden vector: a ∈ R^{hidden}
    pub a: Array1<f64>,

    /// Number of steps this state has been advanced through.
    pub steps_seen: u64,
}

impl HiddenState {
    /// Create a zero-initialised state of the given size.
    pub fn new(hidden: usize) -> Self {
        Self {
            a: Array1::zeros(hidden),
            steps_seen: 0,
        }
    }

    /// Replace the carried vector with the one produced by a step.
    pub fn advance(&mut self, a_new: Array1<f64>) {
        self.a = a_new;
        self.steps_seen += 1;
    }

    /// Reset to the zero vector.
    pub fn reset(&mut self) {
        self.a.fill(0.0);
        self.steps_seen = 0;
    }

    /// Check the state has not diverged (NaN or Inf).
    pub fn is_healthy(&self) -> bool {
        self.a.iter().all(|v| v.is_finite())
    }

    /// L2 norm of the carried vector.
    pub fn norm(&self) -> f64 {
        self.a.mapv(|v| v * v).sum().sqrt()
    }

    /// Serialise the state to bytes (snapshot of the carried vector only).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("HiddenState serialisation should not fail")
    }

    /// Deserialise a state from bytes.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
