//! monthly-timeline CLI
//!
//! Reads the task list of a monthly schedule workbook, asks for the target
//! month and writes `Monthly Timeline <Month> <Year>.xlsx` with one column
//! per day, task spans shaded green and weekend days shaded red.

mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use monthly_timeline_core::{GridWidth, Period, Renderer, Timeline, DEFAULT_SHEET};
use monthly_timeline_reader::load_task_table;
use monthly_timeline_render::{ExcelRenderer, OverlayRenderer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "monthly-timeline")]
#[command(author, version, about = "Monthly Gantt timeline generator", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input workbook with the task table in columns B:D
    #[arg(short, long, value_name = "FILE", default_value = "monthly-schedule.xlsx")]
    input: PathBuf,

    /// Target month; prompts when not given
    #[arg(short, long, value_name = "MM-YYYY")]
    period: Option<String>,

    /// Directory receiving the generated workbook
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Sheet holding the task table (Sheet1, else the first sheet, if not specified)
    #[arg(long)]
    sheet: Option<String>,

    /// Only emit as many day columns as the month has days
    #[arg(long)]
    trim_days: bool,

    /// Write a fresh workbook instead of overlaying a copy of the input
    #[arg(long)]
    standalone: bool,

    /// Print a JSON summary of the timeline to stdout
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the prompt and summary own stdout
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let table = load_task_table(&cli.input, cli.sheet.as_deref())
        .with_context(|| format!("failed to load tasks from {}", cli.input.display()))?;

    let period: Period = match &cli.period {
        Some(period) => period.parse()?,
        None => prompt::read_period(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };

    let width = if cli.trim_days {
        GridWidth::MonthLength
    } else {
        GridWidth::Full
    };
    let timeline = Timeline::build(&table, period, width)?;

    let mut plan = timeline.sheet_plan();
    plan.sheet = cli.sheet.clone();

    let output = cli.output_dir.join(period.output_file_name());
    if cli.standalone {
        let sheet_name = cli.sheet.as_deref().unwrap_or(DEFAULT_SHEET);
        let renderer = ExcelRenderer::new().sheet_name(sheet_name);
        let bytes = renderer.render(&plan)?;
        std::fs::write(&output, bytes)
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else {
        OverlayRenderer::new(&cli.input, &output)
            .render(&plan)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    info!(output = %output.display(), tasks = table.len(), "wrote timeline");

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&timeline.summary())?);
    }

    Ok(())
}
