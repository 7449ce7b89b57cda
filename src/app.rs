//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the session (data source + scenario)
//! - runs the page computation
//! - prints the page / starts the interactive page
//! - writes optional exports

use clap::Parser;

use crate::app::pipeline::{DataInput, Session};
use crate::cli::{Command, DataArgs, GenerateArgs, PageArgs, PredictArgs};
use crate::domain::ScenarioInput;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `waste` binary.
pub fn run() -> Result<(), AppError> {
    // `waste` and `waste --file x.csv` behave like `waste tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => {
            crate::logging::init()?;
            handle_predict(args)
        }
        Command::Generate(args) => {
            crate::logging::init()?;
            handle_generate(args)
        }
        Command::Tui(args) => crate::tui::run(session_from_args(&args)?),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let mut session = session_from_args(&args.page)?;
    session.predict_requested = true;

    // On failure the page halts; `main` reports the error banner once.
    let view = pipeline::compute(&session)?;

    print!("{}", crate::report::format_page(&view));

    let Some(prediction) = &view.prediction else {
        return Ok(());
    };

    if !args.no_plot {
        println!();
        print!(
            "{}",
            crate::plot::render_ascii_chart(&prediction.chart, args.width, args.height)
        );
    }

    println!();
    print!("{}", crate::report::MODEL_EXPLANATION);

    if let Some(path) = &args.chart_svg {
        crate::plot::write_chart_svg(path, &prediction.chart, crate::plot::DEFAULT_SVG_SIZE)?;
    }
    if let Some(path) = &args.export_model {
        let file = crate::io::ModelFile::new(
            &view.dataset.source,
            &view.fit,
            prediction.input,
            prediction.waste,
            &prediction.chart,
        );
        crate::io::write_model_json(path, &file)?;
    }

    Ok(())
}

/// The text `main` prints for a failed run: the error banner of the page.
pub fn error_report(err: &AppError) -> String {
    crate::report::format_banner(&crate::report::error_banner(err))
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let dataset = crate::data::generate_synthetic(args.seed, args.rows)?;
    crate::io::write_dataset_csv(&args.output, &dataset)?;
    println!("Wrote {} rows to {}", dataset.len(), args.output.display());
    Ok(())
}

pub fn data_input_from_args(args: &DataArgs) -> Result<DataInput, AppError> {
    match &args.file {
        Some(path) => Ok(DataInput::File(path.clone())),
        None if args.rows == 0 => Err(AppError::usage("`--rows` must be > 0.")),
        None => Ok(DataInput::Synthetic {
            seed: args.seed,
            rows: args.rows,
        }),
    }
}

pub fn session_from_args(args: &PageArgs) -> Result<Session, AppError> {
    Ok(Session {
        data: data_input_from_args(&args.data)?,
        input: ScenarioInput::new(args.occupants, args.consumption)?,
        predict_requested: false,
    })
}

/// Rewrite argv so `waste` defaults to `waste tui`.
///
/// Rules:
/// - `waste`                         -> `waste tui`
/// - `waste --file x.csv ...`        -> `waste tui --file x.csv ...`
/// - `waste --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "tui" | "generate");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
