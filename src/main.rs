use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plog_core::config::Config;
use plog_core::source::file_sources;
use plog_core::window::{parse_target, year_hint};
use plog_core::{collect_window_lines, scan_with_stats, Aggregator, TimeWindow};

#[derive(Parser)]
#[command(name = "plog", about = "Proposer Log — aggregate proposer-duty events from beacon node logs")]
struct Cli {
    /// Log at debug level to stderr (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/plog/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fold the proposer events around TIMESTAMP into one JSON record.
    Aggregate {
        /// Target timestamp in node local time, e.g. "Apr-23-2025 07:25:25 PM".
        timestamp: String,
        /// Slot number, passed through to the record.
        slot: u64,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Print every raw line from TIMESTAMP to TIMESTAMP + window.
    Lines {
        /// Target timestamp in node local time, e.g. "Apr-26-2025 06:06:24 PM".
        timestamp: String,
        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Window size in seconds (defaults come from the config file).
    #[arg(long)]
    window: Option<u32>,

    /// Log files to scan, in order (defaults come from the config file).
    #[arg(long, num_args = 1.., value_name = "FILE")]
    logs: Vec<PathBuf>,
}

impl ScanArgs {
    fn paths(&self, config: &Config) -> Vec<PathBuf> {
        if self.logs.is_empty() {
            config.scan.log_paths()
        } else {
            self.logs.clone()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "warn" })
            }),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using built-in default config");
            Config::defaults()
        }),
    };

    match cli.command {
        Command::Aggregate {
            timestamp,
            slot,
            scan,
        } => {
            let target = parse_target(&timestamp)?;
            let window = TimeWindow::around(target, scan.window.unwrap_or(config.scan.window_secs));
            let sources = file_sources(scan.paths(&config));
            let mut aggregator = Aggregator::without_relay(slot);

            let (record, stats) =
                scan_with_stats(&sources, &window, year_hint(target), &mut aggregator);
            if stats.lines_in_window == 0 {
                eprintln!("No matching lines found in the requested window.");
            }
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Lines { timestamp, scan } => {
            let target = parse_target(&timestamp)?;
            let window =
                TimeWindow::forward(target, scan.window.unwrap_or(config.lines.window_secs));
            let sources = file_sources(scan.paths(&config));

            for line in collect_window_lines(&sources, &window, year_hint(target)) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
