//! actboard - Sales activation dashboard

mod cli;

use actboard_core::{
    DashboardConfig, DashboardStore, DataProvider, InMemoryProvider, LoadOutcome, Month,
    ViewConfig,
};
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "actboard",
    version,
    about = "Sales activation dashboard",
    long_about = "Per-agent activation targets and achievements by month, with a daily drill-down.\n\
                  \n\
                  Reads one JSON file per month (january.json ... december.json) from the data\n\
                  directory.\n\
                  \n\
                  Examples:\n\
                    actboard                              # Run TUI (default)\n\
                    actboard --demo                       # TUI with generated sample data\n\
                    actboard show --month May             # Print May summary table\n\
                    actboard show --month May --search al # Filter agents by name\n\
                    actboard show --day 2024-05-02        # Print one day\n\
                    actboard days --month May             # List days with data\n\
                    actboard months                       # Which months have data files\n\
                    actboard --month June config --save   # Make June the startup month\n\
                  \n\
                  Environment Variables:\n\
                    ACTBOARD_DATA_DIR                     # Override data directory\n\
                    ACTBOARD_MONTH                        # Month shown at startup\n\
                    ACTBOARD_NO_COLOR                     # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                              # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Directory holding <month>.json files
    #[arg(long, global = true, env = "ACTBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Month to show (full name or 3-letter abbreviation)
    #[arg(long, global = true, env = "ACTBOARD_MONTH")]
    month: Option<Month>,

    /// Use generated sample data instead of the data directory
    #[arg(long, global = true)]
    demo: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "ACTBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Print the metrics and table for a month or day and exit
    Show {
        /// Day identifier (e.g. 2024-05-02); omit for the monthly view
        #[arg(long, short = 'd')]
        day: Option<String>,
        /// Filter agents by name (monthly view only)
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the days available for a month
    Days {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the twelve months, marking those with data
    Months,
    /// Print the effective configuration (file + flags + env)
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode.unwrap_or(Mode::Tui);

    init_tracing(matches!(mode, Mode::Tui))?;

    let config_dir = DashboardConfig::default_dir();
    let mut config = config_dir
        .as_deref()
        .map(DashboardConfig::load)
        .unwrap_or_default();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(month) = cli.month {
        config.default_month = Some(month);
    }
    config.validate().context("Invalid configuration")?;

    if let Mode::Config { save } = mode {
        return run_config(&config, config_dir.as_deref(), save);
    }

    let today = Local::now().date_naive();
    let view_config = ViewConfig::new(today).with_default_month(config.default_month);
    let no_color = cli.no_color;

    if cli.demo {
        info!("Using generated demo data");
        run(mode, InMemoryProvider::demo(today.year()), view_config, no_color).await
    } else {
        let provider = config.json_provider();
        info!(data_dir = %provider.dir().display(), "Using data directory");
        run(mode, provider, view_config, no_color).await
    }
}

/// Log to stderr, or to a file while the TUI owns the terminal
fn init_tracing(tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if tui {
        let Some(dir) = dirs::cache_dir().map(|d| d.join("actboard")) else {
            // Nowhere to write; stay silent rather than draw over the UI
            return Ok(());
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let path = dir.join("actboard.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

async fn run<P: DataProvider + 'static>(
    mode: Mode,
    provider: P,
    view_config: ViewConfig,
    no_color: bool,
) -> Result<()> {
    match mode {
        Mode::Tui => run_tui(provider, view_config).await,
        Mode::Show { day, search, json } => {
            run_show(provider, view_config, day, search, json, no_color).await
        }
        Mode::Days { json } => run_days(provider, view_config, json).await,
        Mode::Months => run_months(provider, no_color).await,
        // handled before a provider is built
        Mode::Config { .. } => Ok(()),
    }
}

async fn run_tui<P: DataProvider + 'static>(provider: P, view_config: ViewConfig) -> Result<()> {
    let store = Arc::new(DashboardStore::new(provider, view_config));

    // Run TUI (will show loading spinner and load data in background)
    actboard_tui::run(store).await
}

/// Load the selected month, failing with the store's error message
async fn load_selected<P: DataProvider>(
    view_config: ViewConfig,
    provider: P,
) -> Result<DashboardStore<P>> {
    let store = DashboardStore::new(provider, view_config);
    match store.initial_load().await {
        LoadOutcome::Applied => Ok(store),
        LoadOutcome::Failed(message) => bail!("{}", message),
        LoadOutcome::Superseded => bail!("Load was superseded"),
    }
}

async fn run_show<P: DataProvider>(
    provider: P,
    view_config: ViewConfig,
    day: Option<String>,
    search: Option<String>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let store = load_selected(view_config, provider).await?;

    if let Some(query) = search {
        store.set_search_query(query);
    }
    if let Some(day) = day {
        if !store.available_days().contains(&day) {
            debug!(day = %day, "Day has no rows");
        }
        store.select_day(day);
    }

    println!("{}", cli::format_snapshot(&store.snapshot(), json, no_color));
    Ok(())
}

async fn run_days<P: DataProvider>(provider: P, view_config: ViewConfig, json: bool) -> Result<()> {
    let store = load_selected(view_config, provider).await?;
    println!(
        "{}",
        cli::format_days(store.selected_month(), &store.available_days(), json)
    );
    Ok(())
}

async fn run_months<P: DataProvider>(provider: P, no_color: bool) -> Result<()> {
    let available = provider.available_months().await;
    println!("{}", cli::format_months(&available, no_color));
    Ok(())
}

fn run_config(config: &DashboardConfig, dir: Option<&Path>, save: bool) -> Result<()> {
    if save {
        let Some(dir) = dir else {
            bail!("No config directory on this platform");
        };
        config.save(dir)?;
        info!(dir = %dir.display(), "Configuration saved");
    }
    println!("{}", cli::format_config(config, dir, save));
    Ok(())
}
