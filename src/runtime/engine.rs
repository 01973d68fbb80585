//! The recurrence engine: input sequence in → trace out.
//!
//! The engine owns nothing but a shared reference to the parameter set.
//! Each run starts from the zero hidden state, walks the inputs in order,
//! and appends one record per step. Steps within a sequence have a strict
//! data dependency through the hidden state and are never reordered or
//! parallelised; only whole, disjoint sequences run concurrently
//! (`run_batch`).

use std::sync::Arc;

use ndarray::Array1;
use rayon::prelude::*;

use crate::core::cell::RnnCell;
use crate::core::state::HiddenState;
use crate::trace::history::Trace;
use crate::trace::record::StepRecord;

/// Drives an `RnnCell` over input sequences.
pub struct TraceEngine {
    cell: Arc<RnnCell>,
}

impl TraceEngine {
    /// Create an engine owning a fresh shared handle to `cell`.
    pub fn new(cell: RnnCell) -> Self {
        Self {
            cell: Arc::new(cell),
        }
    }

    /// Create an engine from an already-shared cell.
    pub fn from_shared(cell: Arc<RnnCell>) -> Self {
        Self { cell }
    }

    /// The parameter set this engine runs.
    pub fn cell(&self) -> &RnnCell {
        &self.cell
    }

    /// Unroll the cell over `inputs`, producing one record per input.
    ///
    /// The hidden state starts at zero and chains: record `t`'s `a_prev`
    /// is record `t-1`'s `a`. An empty input sequence yields an empty
    /// trace. The whole sequence is processed in a single pass; there is
    /// no partial completion.
    pub fn run(&self, inputs: &[Array1<f64>]) -> Trace {
        let mut state = HiddenState::new(self.cell.hidden_dim());
        let mut trace = Trace::with_capacity(inputs.len());

        for (t, x) in inputs.iter().enumerate() {
            assert_eq!(
                x.len(),
                self.cell.input_dim(),
                "input at t={} has length {}, cell expects {}",
                t + 1,
                x.len(),
                self.cell.input_dim(),
            );

            let (a_new, y_new) = self.cell.step(x, &state.a);
            trace.push(StepRecord {
                t: t + 1,
                x: x.clone(),
                a_prev: state.a.clone(),
                a: a_new.clone(),
                y: y_new,
                cell: Arc::clone(&self.cell),
            });
            state.advance(a_new);
        }

        trace
    }

    /// Unroll several independent sequences concurrently.
    ///
    /// The sequences share only the read-only cell, so this is safe; each
    /// trace comes out exactly as a sequential `run` over the same
    /// sequence would produce it.
    pub fn run_batch(&self, sequences: &[Vec<Array1<f64>>]) -> Vec<Trace> {
        sequences.par_iter().map(|seq| self.run(seq)).collect()
    }
}
