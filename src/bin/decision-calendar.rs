use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context as _, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use decision_calendar::{
    CalendarConfig, DecisionCalendar, SaveOpts, aggregate_daily, load_observations_from_path,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "decision-calendar", version)]
struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a calendar figure from a JSON or YAML configuration.
    Render(RenderArgs),
    /// Print the per-day statistics table of a CSV series.
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Calendar configuration (`.json`, or `.yaml`/`.yml`).
    #[arg(long)]
    config: PathBuf,

    /// Output image; the extension picks the format (png, jpg, svg, ...).
    #[arg(long)]
    out: PathBuf,

    /// Output resolution in pixels per inch.
    #[arg(long, default_value_t = 300.0)]
    dpi: f64,

    /// Padding around the cropped figure, in inches.
    #[arg(long, default_value_t = 0.1)]
    pad_inches: f64,

    /// Image drawn at the centre of the calendar.
    #[arg(long)]
    center_image: Option<PathBuf>,

    /// Replace a configured data source's CSV path (`NAME=PATH`). Repeatable.
    #[arg(long = "data", value_parser = parse_data_override)]
    data: Vec<(String, PathBuf)>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Input CSV with a header row.
    #[arg(long)]
    csv: PathBuf,

    /// Numeric column to aggregate.
    #[arg(long)]
    value_column: String,

    /// Timestamp column.
    #[arg(long, default_value = "datetime")]
    date_column: String,

    /// Write the table here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct StatsRow {
    day: u16,
    mean: f64,
    p10: f64,
    p90: f64,
    mean_scaled: f64,
    p10_scaled: f64,
    p90_scaled: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn parse_data_override(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_owned(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected NAME=PATH, got '{s}'")),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = CalendarConfig::from_path(&args.config)?;
    for (name, path) in args.data {
        let (_, source) = config
            .data_sources
            .iter_mut()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| anyhow!("--data {name}: no data source '{name}' in configuration"))?;
        source.path = path;
    }

    let sources = config.data_sources.clone();
    let mut calendar = DecisionCalendar::new(config);
    for (name, source) in &sources {
        calendar.load_data_source(name, source)?;
    }

    let figure = calendar.create_plot(args.center_image.as_deref())?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let opts = SaveOpts {
        dpi: args.dpi,
        pad_inches: args.pad_inches,
    };
    calendar.save_plot(&figure, &args.out, &opts)?;
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let observations =
        load_observations_from_path(&args.csv, &args.date_column, &args.value_column)?;
    let table = aggregate_daily(&observations);

    let sink: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    for (day, s) in table.iter() {
        writer
            .serialize(StatsRow {
                day: day.get(),
                mean: s.mean,
                p10: s.p10,
                p90: s.p90,
                mean_scaled: s.mean_scaled,
                p10_scaled: s.p10_scaled,
                p90_scaled: s.p90_scaled,
            })
            .context("write statistics row")?;
    }
    writer.flush().context("flush statistics table")?;
    Ok(())
}
