//! Two-decimal text formatting of vectors, matrices, and whole records.
//!
//! This is the display convention the trace was built to feed: every
//! number rendered with two decimals, matrices one row per line. None of
//! it is part of the engine contract — a consumer is free to format the
//! raw records any other way.

use ndarray::{Array1, Array2};

use crate::trace::record::StepRecord;

/// Format a vector one component per line, two decimals each.
pub fn format_vector(v: &Array1<f64>) -> String {
    v.iter()
        .map(|val| format!("{:.2}", val))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a vector on one line, components space-separated.
pub fn format_vector_inline(v: &Array1<f64>) -> String {
    v.iter()
        .map(|val| format!("{:.2}", val))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a matrix one row per line, row entries space-separated.
pub fn format_matrix(m: &Array2<f64>) -> String {
    m.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|val| format!("{:.2}", val))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one record as a labelled block.
///
/// Labels follow the `a<t>` convention: the incoming hidden state is
/// `a<t-1>`, the produced one `a<t>`.
pub fn render_record(rec: &StepRecord) -> String {
    let t = rec.t;
    let mut lines = Vec::with_capacity(5);
    lines.push(format!("t={}", t));
    lines.push(format!("{:<8}{}", format!("x<{}>", t), format_vector_inline(&rec.x)));
    lines.push(format!(
        "{:<8}{}",
        format!("a<{}>", t - 1),
        format_vector_inline(&rec.a_prev)
    ));
    lines.push(format!("{:<8}{}", format!("a<{}>", t), format_vector_inline(&rec.a)));
    lines.push(format!("{:<8}{}", format!("y<{}>", t), format_vector_inline(&rec.y)));
    lines.join("\n")
}
