use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use worklog::engine::{config::EngineConfig, tally, DateRange, Engine};
use worklog::feeds::{JsonWorkbook, WorkbookSource};

#[derive(Parser)]
#[command(name = "worklog", about = "Work-log digest: dated narratives from status sheets")]
struct Cli {
    /// JSON workbook document to read.
    workbook: PathBuf,

    /// First day of the range (inclusive, YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the range (inclusive, YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Trailing window in days, used when --from is not given.
    #[arg(long, conflicts_with = "from")]
    days: Option<u32>,

    /// Config file. Defaults to $XDG_CONFIG_HOME/worklog/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Flat merge policy without the ideographic-comma delimiter.
    #[arg(long)]
    legacy: bool,

    /// Per-sheet tally weight, e.g. `--weight Ops=1.5`. Repeatable.
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(String, f64)>,

    /// Only list this sheet in the digest (the tally still counts every
    /// sheet). Repeatable; defaults to all accepted sheets.
    #[arg(long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// Print the batch as JSON instead of the text digest.
    #[arg(long)]
    json: bool,

    /// Write debug logs to /tmp/worklog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (sheet, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SHEET=WEIGHT, got {s:?}"))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad weight {weight:?}: {e}"))?;
    Ok((sheet.trim().to_string(), weight))
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/worklog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("worklog debug log started — tail -f /tmp/worklog-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(worklog::engine::config::default_config_path);
    let mut config = EngineConfig::load(Some(&config_path))
        .with_context(|| format!("loading {}", config_path.display()))?;
    if cli.legacy {
        config = config.with_legacy_policy();
    }

    let end = cli.to.unwrap_or_else(|| chrono::Local::now().date_naive());
    let range = match cli.from {
        Some(start) => DateRange::new(start, end)?,
        None => DateRange::trailing(end, cli.days.unwrap_or(config.dates.window_days)),
    };

    let workbook = JsonWorkbook::new(&cli.workbook)
        .load()
        .with_context(|| format!("reading {}", cli.workbook.display()))?;
    let engine = Engine::new(&config)?;
    let batch = engine.process_workbook(&workbook, range);
    tracing::info!(
        sheets = batch.sheets.len(),
        rejected = batch.rejected.len(),
        records = batch.record_count(),
        "workbook processed"
    );

    for name in &cli.sheets {
        if batch.sheet(name).is_none() {
            tracing::warn!(sheet = %name, "--sheet names no accepted sheet");
        }
    }
    let selected = batch.select_sheets(&cli.sheets);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        let weights: HashMap<String, f64> = cli.weights.into_iter().collect();
        let tally = tally::daily_tally(&batch, &weights);
        print!("{}", worklog::report::render(&selected, &tally));
    }
    Ok(())
}
