//! Poster-Harvest main entry point
//!
//! This is the command-line interface for the labor-law poster downloader.

use anyhow::Context;
use clap::Parser;
use poster_harvest::config::{load_config_with_hash, validate, Config, Policy};
use poster_harvest::output::{print_report, write_markdown_report};
use poster_harvest::Harvester;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Poster-Harvest: a labor-law poster downloader
///
/// Walks the poster directory state by state, resolves every poster page to
/// its PDF and saves each file once under `{files-dir}/{state}/`.
/// Files already on disk are skipped, so reruns are cheap.
#[derive(Parser, Debug)]
#[command(name = "poster-harvest")]
#[command(version)]
#[command(about = "Download every state's labor-law posters", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (all settings have defaults)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Fetch one page at a time with a delay between posters
    #[arg(long, conflicts_with = "parallel")]
    sequential: bool,

    /// Fetch all states and posters concurrently
    #[arg(long, conflicts_with = "sequential")]
    parallel: bool,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    files_dir: Option<PathBuf>,

    /// List the states on the directory page and exit without downloading
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("poster_harvest=info,warn"),
            1 => EnvFilter::new("poster_harvest=debug,info"),
            2 => EnvFilter::new("poster_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.sequential {
        config.crawler.policy = Policy::Sequential;
    } else if cli.parallel {
        config.crawler.policy = Policy::Parallel;
    }

    if let Some(dir) = &cli.files_dir {
        config.output.files_dir = dir.to_string_lossy().into_owned();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_settings(&cli)?;

    if cli.dry_run {
        return handle_dry_run(config).await;
    }

    handle_harvest(config).await
}

/// Handles the --dry-run mode: lists discovered states
async fn handle_dry_run(config: Config) -> anyhow::Result<ExitCode> {
    let harvester = Harvester::new(config)?;
    let states = harvester
        .discover()
        .await
        .context("directory stage failed")?;

    println!("=== Poster-Harvest Dry Run ===\n");
    println!("Directory: {}", harvester.config().site.directory_url);
    println!("Output:    {}\n", harvester.config().output.files_dir);
    println!("States ({}):", states.len());
    for state in &states {
        println!("  - {} ({})", state.name, state.index_url);
    }

    Ok(ExitCode::SUCCESS)
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<ExitCode> {
    let summary_path = config.output.summary_path.clone();
    let harvester = Harvester::new(config)?;

    let shutdown = harvester.shutdown();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    println!("Starting download at {}", chrono::Local::now());

    let report = match harvester.run().await {
        Ok(report) => report,
        Err(e) => {
            let stage = e.stage();
            return Err(anyhow::Error::new(e).context(format!("{} stage failed", stage)));
        }
    };

    println!("Finished download at {}\n", chrono::Local::now());
    print_report(&report);

    if let Some(path) = summary_path {
        write_markdown_report(&report, Path::new(&path))
            .with_context(|| format!("failed to write summary to {}", path))?;
        tracing::info!("Summary written to {}", path);
    }

    if report.interrupted {
        return Ok(ExitCode::from(130));
    }

    Ok(ExitCode::SUCCESS)
}
