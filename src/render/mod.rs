//! Render module — fixed-precision text for display consumers.

pub mod text;
