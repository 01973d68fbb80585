//! A single timestep's snapshot.

use std::sync::Arc;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::core::cell::RnnCell;

/// Everything one step of the recurrence consumed and produced.
///
/// Immutable once created. The parameter set is attached for display and
/// traceability; it is the same cell for every record of a trace, so each
/// record holds a shared reference rather than its own copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based timestep index.
    pub t: usize,

    /// Input vector consumed at this step.
    pub x: Array1<f64>,

    /// Hidden state entering this step — the previous record's `a`, or the
    /// zero vector at t = 1.
    pub a_prev: Array1<f64>,

    /// Hidden state produced at this step.
    pub a: Array1<f64>,

    /// Output distribution produced at this step.
    pub y: Array1<f64>,

    /// The parameter set that produced this record.
    pub cell: Arc<RnnCell>,
}

impl StepRecord {
    /// Whether `y` is a valid probability distribution within `tol`.
    pub fn output_is_distribution(&self, tol: f64) -> bool {
        self.y.iter().all(|&v| v >= 0.0) && (self.y.sum() - 1.0).abs() <= tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn sample_record() -> StepRecord {
        let cell = Arc::new(RnnCell::reference());
        let x = arr1(&[1.0, 0.0]);
        let a_prev = arr1(&[0.0, 0.0]);
        let (a, y) = cell.step(&x, &a_prev);
        StepRecord { t: 1, x, a_prev, a, y, cell }
    }

    #[test]
    fn test_record_fields() {
        let rec = sample_record();
        assert_eq!(rec.t, 1);
        assert_eq!(rec.a_prev, arr1(&[0.0, 0.0]));
        assert!(rec.output_is_distribution(1e-9));
    }

    #[test]
    fn test_records_share_one_cell() {
        let cell = Arc::new(RnnCell::reference());
        let a = StepRecord {
            t: 1,
            x: arr1(&[1.0, 0.0]),
            a_prev: arr1(&[0.0, 0.0]),
            a: arr1(&[0.1, 0.2]),
            y: arr1(&[0.5, 0.5]),
            cell: Arc::clone(&cell),
        };
        let b = StepRecord { t: 2, cell: Arc::clone(&cell), ..a.clone() };
        assert!(Arc::ptr_eq(&a.cell, &b.cell));
    }

    #[test]
    fn test_record_serialises() {
        let rec = sample_record();
        let json = serde_json::to_string(&rec).unwrap();
        let back: StepRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.t, rec.t);
        assert_eq!(back.a, rec.a);
        assert_eq!(back.cell.wax, rec.cell.wax);
    }
}
