//! The RNN parameter set and the single-step recurrence.
//!
//! A cell is pure data after construction: five weight blocks defining the
//! update rule
//!
//! ```text
//! a' = tanh(Waa · a + Wax · x + ba)
//! y' = softmax(Wya · a' + by)
//! ```
//!
//! Shapes are validated once, in [`RnnCell::new`]; from then on the cell is
//! immutable and safely shared by any number of concurrent readers.

use anyhow::{bail, Result};
use ndarray::{arr1, arr2, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::{HIDDEN_DIM, INPUT_DIM, OUTPUT_DIM};

/// The parameter set of a vanilla RNN cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RnnCell {
    /// Input-to-hidden weights: W_ax ∈ R^{hidden × input}
    pub wax: Array2<f64>,

    /// Hidden-to-hidden weights: W_aa ∈ R^{hidden × hidden}
    pub waa: Array2<f64>,

    /// Hidden-to-output weights: W_ya ∈ R^{output × hidden}
    pub wya: Array2<f64>,

    /// Hidden bias: b_a ∈ R^{hidden}
    pub ba: Array1<f64>,

    /// Output bias: b_y ∈ R^{output}
    pub by: Array1<f64>,
}

impl RnnCell {
    /// Build a cell from explicit weight blocks, rejecting mutually
    /// inconsistent shapes. Shapes are never re-checked after this.
    pub fn new(
        wax: Array2<f64>,
        waa: Array2<f64>,
        wya: Array2<f64>,
        ba: Array1<f64>,
        by: Array1<f64>,
    ) -> Result<Self> {
        let hidden = waa.nrows();
        if waa.ncols() != hidden {
            bail!(
                "Waa must be square, got {}x{}",
                waa.nrows(),
                waa.ncols()
            );
        }
        if wax.nrows() != hidden {
            bail!(
                "Wax has {} rows but the hidden size is {}",
                wax.nrows(),
                hidden
            );
        }
        if wya.ncols() != hidden {
            bail!(
                "Wya has {} columns but the hidden size is {}",
                wya.ncols(),
                hidden
            );
        }
        if ba.len() != hidden {
            bail!("ba has length {} but the hidden size is {}", ba.len(), hidden);
        }
        if by.len() != wya.nrows() {
            bail!(
                "by has length {} but the output size is {}",
                by.len(),
                wya.nrows()
            );
        }
        Ok(Self { wax, waa, wya, ba, by })
    }

    /// Create a cell with zero weights for the given sizes.
    pub fn zeros(hidden: usize, input: usize, output: usize) -> Self {
        Self {
            wax: Array2::zeros((hidden, input)),
            waa: Array2::zeros((hidden, hidden)),
            wya: Array2::zeros((output, hidden)),
            ba: Array1::zeros(hidden),
            by: Array1::zeros(output),
        }
    }

    /// The 2×2 reference parameter set.
    pub fn reference() -> Self {
        Self {
            wax: arr2(&[[0.5, -0.2], [0.3, 0.8]]),
            waa: arr2(&[[0.4, 0.1], [-0.3, 0.2]]),
            wya: arr2(&[[1.0, -1.0], [0.5, 1.0]]),
            ba: arr1(&[0.1, -0.2]),
            by: arr1(&[0.0, 0.0]),
        }
    }

    /// Create a cell with seeded Gaussian weights (std 0.5).
    ///
    /// Deterministic under a fixed seed.
    pub fn random(hidden: usize, input: usize, output: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 0.5).expect("constant std-dev is valid");
        let mut draw = |n: usize| -> Vec<f64> {
            (0..n).map(|_| normal.sample(&mut rng)).collect()
        };
        Self {
            wax: Array2::from_shape_vec((hidden, input), draw(hidden * input))
                .expect("length matches shape"),
            waa: Array2::from_shape_vec((hidden, hidden), draw(hidden * hidden))
                .expect("length matches shape"),
            wya: Array2::from_shape_vec((output, hidden), draw(output * hidden))
                .expect("length matches shape"),
            ba: Array1::from_vec(draw(hidden)),
            by: Array1::from_vec(draw(output)),
        }
    }

    /// Input vector size.
    pub fn input_dim(&self) -> usize {
        self.wax.ncols()
    }

    /// Hidden state size.
    pub fn hidden_dim(&self) -> usize {
        self.waa.nrows()
    }

    /// Output distribution size.
    pub fn output_dim(&self) -> usize {
        self.wya.nrows()
    }

    /// One step of the recurrence.
    ///
    /// Returns the new hidden state (entries strictly inside (-1, 1)) and
    /// the output distribution (entries ≥ 0, summing to 1). No side
    /// effects; `a_prev` is read, never written.
    pub fn step(&self, x: &Array1<f64>, a_prev: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
        let raw_a = self.waa.dot(a_prev) + self.wax.dot(x) + &self.ba;
        let a_new = raw_a.mapv(f64::tanh);
        let raw_y = self.wya.dot(&a_new) + &self.by;
        let y_new = softmax(&raw_y);
        (a_new, y_new)
    }

    /// Total parameter count.
    pub fn param_count(&self) -> usize {
        self.wax.len() + self.waa.len() + self.wya.len() + self.ba.len() + self.by.len()
    }
}

impl Default for RnnCell {
    fn default() -> Self {
        Self::zeros(HIDDEN_DIM, INPUT_DIM, OUTPUT_DIM)
    }
}

/// Numerically-stable softmax: shift by the maximum before exponentiating.
///
/// The shift does not change the mathematical result, and the exponential
/// of the shifted maximum is always 1, so the sum never vanishes.
pub fn softmax(logits: &Array1<f64>) -> Array1<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp = logits.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_dims() {
        let cell = RnnCell::reference();
        assert_eq!(cell.input_dim(), INPUT_DIM);
        assert_eq!(cell.hidden_dim(), HIDDEN_DIM);
        assert_eq!(cell.output_dim(), OUTPUT_DIM);
        assert_eq!(cell.param_count(), 4 + 4 + 4 + 2 + 2);
    }

    #[test]
    fn test_new_rejects_inconsistent_shapes() {
        // Waa is 3x3 but Wax only has 2 rows
        let r = RnnCell::new(
            Array2::zeros((2, 2)),
            Array2::zeros((3, 3)),
            Array2::zeros((2, 2)),
            Array1::zeros(3),
            Array1::zeros(2),
        );
        assert!(r.is_err());

        let r = RnnCell::new(
            Array2::zeros((2, 2)),
            Array2::zeros((2, 3)),
            Array2::zeros((2, 2)),
            Array1::zeros(2),
            Array1::zeros(2),
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_new_accepts_reference_blocks() {
        let c = RnnCell::reference();
        let rebuilt = RnnCell::new(c.wax, c.waa, c.wya, c.ba, c.by);
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_golden_first_step() {
        // Reference cell, x = [1, 0], a_prev = 0:
        //   raw_a = Wax·x + ba = [0.6, 0.1]
        //   a     = tanh(raw_a) ≈ [0.5370, 0.0997]
        //   y     = softmax(Wya·a) ≈ [0.5173, 0.4827]
        let cell = RnnCell::reference();
        let x = arr1(&[1.0, 0.0]);
        let a0 = arr1(&[0.0, 0.0]);
        let (a, y) = cell.step(&x, &a0);

        assert!((a[0] - 0.6_f64.tanh()).abs() < 1e-12);
        assert!((a[1] - 0.1_f64.tanh()).abs() < 1e-12);
        assert!((a[0] - 0.5370).abs() < 1e-4);
        assert!((a[1] - 0.0997).abs() < 1e-4);
        assert!((y[0] - 0.5173).abs() < 1e-4);
        assert!((y[1] - 0.4827).abs() < 1e-4);
    }

    #[test]
    fn test_step_output_is_distribution() {
        let cell = RnnCell::reference();
        let x = arr1(&[0.3, -1.7]);
        let a_prev = arr1(&[0.9, -0.4]);
        let (_, y) = cell.step(&x, &a_prev);
        assert!(y.iter().all(|&v| v >= 0.0));
        assert!((y.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_hidden_within_open_interval() {
        let cell = RnnCell::reference();
        let x = arr1(&[100.0, -100.0]);
        let a_prev = arr1(&[0.999, -0.999]);
        let (a, _) = cell.step(&x, &a_prev);
        assert!(a.iter().all(|&v| v > -1.0 && v < 1.0));
    }

    #[test]
    fn test_softmax_uniform_on_equal_logits() {
        let y = softmax(&arr1(&[3.0, 3.0, 3.0, 3.0]));
        for &v in y.iter() {
            assert!((v - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_softmax_shift_invariance() {
        let a = softmax(&arr1(&[1.0, 2.0, 3.0]));
        let b = softmax(&arr1(&[1001.0, 1002.0, 1003.0]));
        for (va, vb) in a.iter().zip(b.iter()) {
            assert!((va - vb).abs() < 1e-12);
        }
    }

    #[test]
    fn test_softmax_large_logits_no_overflow() {
        let y = softmax(&arr1(&[1000.0, 0.0]));
        assert!(y.iter().all(|v| v.is_finite()));
        assert!((y.sum() - 1.0).abs() < 1e-9);
        assert!(y[0] > 0.999);
    }

    #[test]
    fn test_random_is_seeded() {
        let a = RnnCell::random(4, 3, 2, 7);
        let b = RnnCell::random(4, 3, 2, 7);
        let c = RnnCell::random(4, 3, 2, 8);
        assert_eq!(a.wax, b.wax);
        assert_eq!(a.ba, b.ba);
        assert_ne!(a.wax, c.wax);
        assert_eq!(a.hidden_dim(), 4);
        assert_eq!(a.input_dim(), 3);
        assert_eq!(a.output_dim(), 2);
    }
}
