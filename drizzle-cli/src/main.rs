use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use schemars::schema_for;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drizzle_core::pacing::{Pacer, PacerConfig};
use drizzle_core::seed::{components, derive_seed};
use drizzle_core::System;

mod config;

/// Drizzle: replay an input stream at a statistically modeled cadence
///
/// Drizzle reads lines from stdin and re-emits them on stdout in real
/// time, paced by configurable arrival processes rather than the input's
/// native rate.
///
/// Example usage:
///   drizzle test-source | drizzle run -c profiles/steady.json --limit 30
///   drizzle run -c traffic.yaml --interval 500ms --seed 42 --timestamps
///   drizzle schema > config-schema.json
#[derive(Parser)]
#[command(name = "drizzle")]
#[command(version, about = "Synthetic traffic replayer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay stdin to stdout at the configured cadence
    Run {
        /// Path to a JSON or YAML configuration file
        #[arg(short = 'c', long, default_value = "drizzle.json")]
        config: PathBuf,

        /// Tick duration
        #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
        interval: Duration,

        /// RNG seed (defaults to the current time in nanoseconds)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of ticks to run (0 means run until stdin is exhausted)
        #[arg(long, default_value_t = 0)]
        limit: u64,

        /// Prefix each emitted line with the current timestamp
        #[arg(long)]
        timestamps: bool,

        /// Log per-source counts and per-tick totals
        #[arg(long)]
        log: bool,

        /// Log a warning when a tick overruns its interval by more than
        /// this
        #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
        warn: Duration,
    },

    /// Emit self-numbered, self-timestamped lines at random intervals
    ///
    /// Ignores configuration entirely; useful for exercising the pacing
    /// driver without real input data:
    ///   drizzle test-source | drizzle run -c profiles/steady.json
    TestSource {
        /// RNG seed (defaults to the current time in nanoseconds)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate the JSON Schema for configuration files
    Schema,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is the data channel.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Run { config, interval, seed, limit, timestamps, log, warn } => {
            run(&config, interval, seed, limit, timestamps, log, warn)
        }
        Commands::TestSource { seed } => test_source(seed),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "drizzle", &mut io::stdout());
            Ok(())
        }
        Commands::Schema => {
            let schema = schema_for!(System);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn run(
    config_path: &PathBuf,
    interval: Duration,
    seed: Option<u64>,
    limit: u64,
    timestamps: bool,
    log: bool,
    warn: Duration,
) -> anyhow::Result<()> {
    let mut system = config::load(config_path)?;
    system.logging |= log;

    let master = seed.unwrap_or_else(now_nanos);
    tracing::info!("config {} seed {}", config_path.display(), master);

    system.init(SmallRng::seed_from_u64(derive_seed(master, components::SYSTEM)))?;

    let mut pacer = Pacer::new(
        PacerConfig { interval, limit, timestamps, warn },
        SmallRng::seed_from_u64(derive_seed(master, components::PACING)),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let summary = pacer.run(&mut system, &mut input, &mut output)?;
    tracing::info!(
        "done after {} ticks, {} lines ({:?})",
        summary.ticks,
        summary.emitted,
        summary.stopped
    );
    Ok(())
}

fn test_source(seed: Option<u64>) -> anyhow::Result<()> {
    let master = seed.unwrap_or_else(now_nanos);
    let mut rng = SmallRng::seed_from_u64(derive_seed(master, components::TEST_SOURCE));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for i in 0u64.. {
        writeln!(out, "{:09} {}", i, humantime::format_rfc3339_nanos(SystemTime::now()))?;
        out.flush()?;
        let ms: u64 = rng.random_range(0..100);
        std::thread::sleep(Duration::from_millis(ms));
    }
    Ok(())
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
