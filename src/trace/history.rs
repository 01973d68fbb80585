//! The ordered history of an unrolled sequence.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::trace::record::StepRecord;

/// An append-only, ordered sequence of timestep records.
///
/// Index-aligned with the input sequence that produced it: the record at
/// position `i` carries `t == i + 1`. Created fresh per engine run and
/// owned exclusively by its producer until handed to a consumer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trace {
    records: Vec<StepRecord>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Create an empty trace with room for `n` records.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            records: Vec::with_capacity(n),
        }
    }

    /// Append a record. Records only ever go in at the end.
    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// Number of recorded timesteps.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no timesteps were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at position `i` (carrying `t == i + 1`).
    pub fn get(&self, i: usize) -> Option<&StepRecord> {
        self.records.get(i)
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    /// Iterate the records in timestep order.
    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.records.iter()
    }

    /// The hidden state after the final step, if any step ran.
    pub fn final_hidden(&self) -> Option<&Array1<f64>> {
        self.records.last().map(|r| &r.a)
    }

    /// Verify the defining invariants of a well-formed trace: 1-based,
    /// gap-free timestep numbering, a zero `a_prev` at t = 1, and each
    /// record's `a_prev` equal to the previous record's `a`.
    pub fn is_consistent(&self) -> bool {
        for (i, rec) in self.records.iter().enumerate() {
            if rec.t != i + 1 {
                return false;
            }
            match i {
                0 => {
                    if rec.a_prev.iter().any(|&v| v != 0.0) {
                        return false;
                    }
                }
                _ => {
                    if rec.a_prev != self.records[i - 1].a {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
