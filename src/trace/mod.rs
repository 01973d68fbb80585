//! Trace module — per-timestep records and the ordered history.
//!
//! A trace is the engine's only product: one immutable record per input,
//! index-aligned with the input sequence and chained through the hidden
//! state. Consumers read it; nothing here draws anything.

pub mod history;
pub mod record;
