//! unroll — trace a vanilla RNN over an input sequence.
//!
//! Parses an input sequence (or falls back to the reference demo
//! sequence), unrolls the cell over it, and prints one labelled block per
//! timestep — or the whole trace as JSON for downstream tooling.

use anyhow::{bail, Context, Result};
use clap::Parser;
use ndarray::{arr1, Array1};

use unroll::config;
use unroll::core::cell::RnnCell;
use unroll::render::text::{format_vector_inline, render_record};
use unroll::runtime::engine::TraceEngine;

/// unroll trace CLI.
#[derive(Parser, Debug)]
#[command(
    name = "unroll",
    about = "Step-by-step evolution traces for a vanilla recurrent network",
    version
)]
struct Cli {
    /// Use a seeded random cell instead of the reference parameters.
    #[arg(long, default_value_t = false)]
    random: bool,

    /// Seed for --random.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Hidden size for --random.
    #[arg(long, default_value_t = config::HIDDEN_DIM)]
    hidden: usize,

    /// Input size for --random.
    #[arg(long, default_value_t = config::INPUT_DIM)]
    input: usize,

    /// Output size for --random.
    #[arg(long, default_value_t = config::OUTPUT_DIM)]
    output: usize,

    /// Emit the trace as JSON instead of text blocks.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log the run without printing per-timestep blocks.
    #[arg(long, default_value_t = false)]
    quiet: bool,

    /// Input vectors, one per timestep, comma-separated components
    /// (e.g. "1,0 0,1 1,0").
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    inputs: Vec<String>,
}

/// Parse one "v1,v2,..." argument into a length-checked vector.
fn parse_vector(arg: &str, dim: usize, t: usize) -> Result<Array1<f64>> {
    let components = arg
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .with_context(|| format!("bad component {:?} in input {}", s, t))
        })
        .collect::<Result<Vec<f64>>>()?;
    if components.len() != dim {
        bail!(
            "input {} has {} components, cell expects {}",
            t,
            components.len(),
            dim
        );
    }
    Ok(Array1::from_vec(components))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    tracing::info!("unroll v{}", env!("CARGO_PKG_VERSION"));

    let cell = if cli.random {
        tracing::info!(
            "random cell: {} inputs, {} hidden, {} outputs, seed {}",
            cli.input,
            cli.hidden,
            cli.output,
            cli.seed,
        );
        RnnCell::random(cli.hidden, cli.input, cli.output, cli.seed)
    } else {
        RnnCell::reference()
    };

    let inputs: Vec<Array1<f64>> = if cli.inputs.is_empty() {
        if cell.input_dim() != config::INPUT_DIM {
            bail!(
                "the demo sequence feeds {}-component inputs; pass inputs explicitly",
                config::INPUT_DIM
            );
        }
        tracing::info!("no inputs given, using the demo sequence 1,0 0,1 1,0");
        vec![arr1(&[1.0, 0.0]), arr1(&[0.0, 1.0]), arr1(&[1.0, 0.0])]
    } else {
        cli.inputs
            .iter()
            .enumerate()
            .map(|(i, arg)| parse_vector(arg, cell.input_dim(), i + 1))
            .collect::<Result<Vec<_>>>()?
    };

    tracing::info!(
        "cell: {} inputs, {} hidden, {} outputs ({} parameters)",
        cell.input_dim(),
        cell.hidden_dim(),
        cell.output_dim(),
        cell.param_count(),
    );

    let engine = TraceEngine::new(cell);
    let start = std::time::Instant::now();
    let trace = engine.run(&inputs);
    let elapsed_us = start.elapsed().as_micros();

    tracing::info!("traced {} timesteps in {} µs", trace.len(), elapsed_us);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else if !cli.quiet {
        for rec in &trace {
            println!("{}", render_record(rec));
            println!();
        }
    }

    if let Some(a) = trace.final_hidden() {
        tracing::info!("final hidden state: {}", format_vector_inline(a));
    }

    Ok(())
}
