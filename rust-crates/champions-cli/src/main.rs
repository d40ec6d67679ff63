use anyhow::{
    Context,
    anyhow,
    bail,
};
use chrono::DateTime;
use clap::{
    Parser,
    ValueEnum,
};
use endurance::{
    EnduranceChampionCalculator,
    SystemClock,
    bids::parse_bid_list,
    leaderboard::{
        SortKey,
        sorted_by,
    },
};
use std::{
    fs,
    io::Read,
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SortArg {
    ChronoWarrior,
    ChampionTime,
    /// Crowning order
    None,
}

impl SortArg {
    fn key(self) -> Option<SortKey> {
        match self {
            SortArg::ChronoWarrior => Some(SortKey::ChronoWarrior),
            SortArg::ChampionTime => Some(SortKey::ChampionTime),
            SortArg::None => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "champions",
    version,
    about = "Endurance champion and chrono warrior standings for a round of bids",
    long_about = None
)]
struct Args {
    /// Bid list as served by the API (array or {"Bids": [...]}); stdin when omitted or `-`
    bids: Option<PathBuf>,

    /// Round end as unix seconds or RFC 3339; a live round uses the current time
    #[arg(short, long, value_parser = parse_round_end)]
    round_end: Option<u64>,

    /// Rank rows by `chrono-warrior` or `champion-time`; `none` keeps crowning order
    #[arg(short, long, value_enum, default_value_t = SortArg::None)]
    sort: SortArg,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Include interval bounds for every champion
    #[arg(long)]
    intervals: bool,

    /// Recompute every N seconds until interrupted
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    watch: Option<u64>,

    #[arg(short, long, default_value = "false")]
    tracing: bool,
}

/// Warnings always reach stderr so a failing `--watch` refresh is never silent;
/// `--tracing` opens up the info-level progress logs.
fn default_log_level(tracing: bool) -> &'static str {
    if tracing { "info" } else { "warn" }
}

fn init_tracing(tracing: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(tracing)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_round_end(raw: &str) -> anyhow::Result<u64> {
    let trimmed = raw.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(secs);
    }
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|e| anyhow!("Failed to parse round end '{raw}': {e}"))?;
    u64::try_from(parsed.timestamp())
        .map_err(|_| anyhow!("Round end '{raw}' is before the unix epoch"))
}

fn read_source(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => fs::read(path)
            .with_context(|| format!("reading bid list {}", path.display())),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading bid list from stdin")?;
            Ok(buf)
        }
    }
}

fn run_once(
    args: &Args,
    calculator: &EnduranceChampionCalculator<SystemClock>,
) -> anyhow::Result<String> {
    let bytes = read_source(args.bids.as_deref())?;
    let bids = parse_bid_list(&bytes)?;
    tracing::info!("loaded {} bids", bids.len());
    let sort = args.sort.key();
    if let Some(key) = sort {
        tracing::debug!("ranking by {}", key);
    }

    if args.intervals {
        let mut intervals = calculator.intervals(&bids, args.round_end);
        if let Some(key) = sort {
            intervals = sorted_by(&intervals, key);
        }
        return match args.format {
            OutputFormat::Table => Ok(render::intervals_table(&intervals)),
            OutputFormat::Json => render::json(&intervals),
        };
    }

    let results = calculator.compute(&bids, args.round_end);
    let rows = match sort {
        Some(key) => sorted_by(&results, key),
        None => results.clone(),
    };
    match args.format {
        OutputFormat::Table => {
            let mut out = render::results_table(&rows);
            out.push_str(&render::summary(&results));
            Ok(out)
        }
        OutputFormat::Json => render::json(&rows),
    }
}

async fn handle_interrupt() {
    let res = tokio::signal::ctrl_c().await;
    match res {
        Ok(_) => {
            tracing::info!("Received interrupt, exiting");
        }
        Err(_) => {
            tracing::warn!("Received interrupt error, exiting anyway");
        }
    }
}

async fn watch(
    args: &Args,
    calculator: &EnduranceChampionCalculator<SystemClock>,
    every: u64,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(every));
    let interrupt = handle_interrupt();
    tokio::pin!(interrupt);
    tracing::info!("refreshing standings every {}s", every);
    loop {
        tokio::select! {
            _ = &mut interrupt => return Ok(()),
            _ = ticker.tick() => {
                match run_once(args, calculator) {
                    Ok(out) => println!("{out}"),
                    Err(e) => tracing::warn!("refresh failed: {e:#}"),
                }
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.tracing);
    let calculator = EnduranceChampionCalculator::new(SystemClock);

    match args.watch {
        Some(every) => {
            let reads_stdin = args
                .bids
                .as_deref()
                .is_none_or(|path| path == Path::new("-"));
            if reads_stdin {
                bail!("--watch needs a bid list file to re-read");
            }
            watch(&args, &calculator, every).await
        }
        None => {
            let out = run_once(&args, &calculator)?;
            println!("{out}");
            Ok(())
        }
    }
}
