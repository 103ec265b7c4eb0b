//! Check the demo dataset against the record rules and report what it creates.
//!
//! Each run seeds a fresh in-memory store that is discarded on exit, so
//! nothing is persisted between runs.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use linkboard::outbound::persistence::InMemoryStore;
use linkboard::seeding::{DemoDataSettings, seed_demo_data};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `linkboard-seed` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "linkboard-seed",
    about = "Validate the demo dataset in a throwaway in-memory store and report record counts",
    version
)]
struct CliArgs {
    /// JSON dataset to seed from. Defaults to the built-in dataset.
    #[arg(long = "dataset", value_name = "path")]
    dataset: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long = "json-logs")]
    json_logs: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("linkboard-seed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> io::Result<()> {
    let settings = load_settings(args)?;
    init_tracing(settings.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| io::Error::other(format!("create Tokio runtime: {err}")))?;
    let summary = runtime
        .block_on(seed_demo_data(
            &settings,
            Arc::new(InMemoryStore::new()),
            Arc::new(DefaultClock),
        ))
        .map_err(|err| {
            error!(error = %err, "demo data seeding failed");
            io::Error::other(err)
        })?;

    writeln!(io::stdout(), "{summary}")
}

fn load_settings(args: CliArgs) -> io::Result<DemoDataSettings> {
    let configured = DemoDataSettings::load_from_iter([OsString::from("linkboard-seed")])
        .map_err(|err| io::Error::other(format!("load demo data settings: {err}")))?;
    Ok(configured.with_overrides(args.dataset, args.json_logs))
}

fn init_tracing(json_logs: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        warn!(error = %err, "tracing init failed");
    }
}
