mod checks;
mod reports;
mod targets;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use barter_engine::{BarterEngine, GeneratorConfig};
use checks::{PuzzleReport, check_target};
use targets::resolve_targets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Coloured human-readable summary
    Console,
    /// Pretty-printed JSON array of puzzle reports
    Json,
    /// Markdown summary table
    Markdown,
    /// One CSV row per puzzle
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "barter-tester", version = "0.1.0")]
#[command(about = "QA sweeps for the daily Barter puzzle generator")]
struct Args {
    /// Dates to check (comma-separated YYYY-MM-DD, or 'today')
    #[arg(long, default_value = "")]
    dates: String,

    /// First date of a consecutive sweep
    #[arg(long)]
    start: Option<String>,

    /// Number of days in the sweep (requires --start)
    #[arg(long)]
    days: Option<u32>,

    /// Raw seeds to check (comma-separated)
    #[arg(long, default_value = "")]
    seeds: String,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file with generator config overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    announce_banner();

    let start_time = Instant::now();
    let engine = build_engine(args.config.as_deref())?;
    let targets = resolve_targets(&args.dates, args.start.as_deref(), args.days, &args.seeds)
        .context("failed to resolve puzzle targets")?;

    println!(
        "{} {} puzzle(s)",
        "🧩 Checking".bright_yellow().bold(),
        targets.len()
    );
    let reports: Vec<PuzzleReport> = targets
        .iter()
        .map(|target| check_target(&engine, target, args.verbose))
        .collect();

    write_reports(&args, &reports, start_time)?;

    if reports.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🧪 Barter Puzzle Tester".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn build_engine(config: Option<&Path>) -> Result<BarterEngine> {
    let Some(path) = config else {
        return Ok(BarterEngine::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cfg = GeneratorConfig::from_json(&text)
        .with_context(|| format!("invalid generator config in {}", path.display()))?;
    BarterEngine::new(cfg).context("generator config rejected")
}

fn write_reports(args: &Args, reports: &[PuzzleReport], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, reports)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, reports)?,
        ReportFormat::Csv => reports::generate_csv_report(&mut output_target, reports)?,
        ReportFormat::Console => {
            reports::generate_console_report(&mut output_target, reports, start_time.elapsed())?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
