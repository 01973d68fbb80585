//! # UNROLL
//!
//! Step-by-step evolution traces for a single-layer vanilla recurrent
//! network.
//!
//! The crate drives the classic recurrence
//!
//! ```text
//! a<t> = tanh(Waa · a<t-1> + Wax · x<t> + ba)
//! y<t> = softmax(Wya · a<t> + by)
//! ```
//!
//! over an ordered input sequence and records every timestep — the input
//! consumed, the hidden state entering and leaving the step, and the output
//! distribution — as an append-only history. The history is what a
//! visualizer or inspector consumes; this crate owns the math and the
//! record, nothing on screen.
//!
//! ## Components
//!
//! - `core` — the parameter set (`RnnCell`) and the carried hidden state
//! - `trace` — per-timestep records and the ordered history
//! - `runtime` — the engine that unrolls a cell over input sequences
//! - `render` — fixed-precision text formatting for display consumers

pub mod core;
pub mod render;
pub mod runtime;
pub mod trace;

/// Reference network dimensions.
pub mod config {
    /// Input vector size of the reference cell.
    pub const INPUT_DIM: usize = 2;

    /// Hidden state size of the reference cell.
    pub const HIDDEN_DIM: usize = 2;

    /// Output distribution size of the reference cell.
    pub const OUTPUT_DIM: usize = 2;
}
