//! Command-line parsing for the household waste predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! data/model code. Flag values are turned into an `app::pipeline::Session`
//! by `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_CONSUMPTION, DEFAULT_OCCUPANTS, DEFAULT_SAMPLE_ROWS, DEFAULT_SEED, MIN_CONSUMPTION,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "waste", version, about = "Household daily waste predictor (linear regression)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the model, predict one scenario and print the page (preview, prediction, chart).
    Predict(PredictArgs),
    /// Launch the interactive terminal page.
    ///
    /// Uses the same computation as `waste predict`, re-run on every key press.
    Tui(PageArgs),
    /// Write the synthetic dataset as CSV (re-loadable with `--file`).
    Generate(GenerateArgs),
}

/// Dataset selection shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// CSV file with columns 'Jumlah Penghuni', 'Konsumsi Makanan (kg)', 'Sampah (kg)'.
    ///
    /// When omitted, a synthetic dataset is generated.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Random seed for the synthetic dataset.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of synthetic rows.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub rows: usize,
}

/// Scenario inputs plus data selection.
#[derive(Debug, Args, Clone)]
pub struct PageArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number of people in the household (>= 1).
    #[arg(short = 'o', long, default_value_t = DEFAULT_OCCUPANTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub occupants: u32,

    /// Food consumed per person per day, kg (>= 0.1).
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONSUMPTION, value_parser = parse_consumption)]
    pub consumption: f64,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Also write the chart as SVG.
    #[arg(long = "chart-svg", value_name = "SVG")]
    pub chart_svg: Option<PathBuf>,

    /// Export coefficients, fit quality and the chart line to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Destination CSV path.
    #[arg(long, short = 'O', value_name = "CSV")]
    pub output: PathBuf,

    /// Random seed.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of rows.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub rows: usize,
}

fn parse_consumption(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("not a number: {e}"))?;
    if !v.is_finite() || v < MIN_CONSUMPTION {
        return Err(format!("must be >= {MIN_CONSUMPTION}"));
    }
    Ok(v)
}
