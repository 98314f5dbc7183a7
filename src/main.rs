//! gesture-kiosk - a touchless terminal kiosk driven by a hand-tracking backend.
//!
//! # Usage
//!
//! ```bash
//! gesture-kiosk
//! gesture-kiosk --url ws://10.0.0.5:8080 --start-page Admissions
//! gesture-kiosk --dwell-ms 600 --log-file kiosk.log --save
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use gesture_kiosk::app::{
    App, DEFAULT_BACKEND_URL, DEFAULT_DWELL_MS, DEFAULT_SCROLL_INTERVAL_MS, DEFAULT_SCROLL_STEP,
    Tuning,
};
use gesture_kiosk::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags, ConfigFlags,
};
use gesture_kiosk::pages::{PAGES, Page};

/// A touchless terminal kiosk driven by hand-gesture events
#[derive(Parser, Debug)]
#[command(name = "gesture-kiosk", version, about, long_about = None)]
struct Cli {
    /// WebSocket address of the gesture backend
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Hold time in milliseconds before the cursor clicks
    #[arg(long, value_name = "MS")]
    dwell_ms: Option<u64>,

    /// Scroll units (16 per row) moved per scroll tick
    #[arg(long, value_name = "UNITS")]
    scroll_step: Option<u32>,

    /// Milliseconds between scroll ticks
    #[arg(long, value_name = "MS")]
    scroll_interval_ms: Option<u64>,

    /// Page shown at startup (Home, Admissions, Departments, Placements)
    #[arg(long, value_name = "PAGE")]
    start_page: Option<String>,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Do not draw the simulated cursor
    #[arg(long)]
    hide_cursor: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter.add_directive(tracing::Level::INFO.into()))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            // The terminal belongs to the UI; keep stderr quiet.
            tracing_subscriber::fmt()
                .with_env_filter(filter.add_directive(tracing::Level::WARN.into()))
                .init();
        }
    }
    Ok(())
}

fn resolve_start_page(name: Option<&str>) -> Result<usize> {
    let Some(name) = name else {
        return Ok(0);
    };
    Page::from_name(name).map(Page::index).with_context(|| {
        let known: Vec<_> = PAGES.iter().map(|p| p.title()).collect();
        format!("Unknown page {name:?}; expected one of {}", known.join(", "))
    })
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    let tuning = Tuning {
        dwell_ms: effective.dwell_ms.unwrap_or(DEFAULT_DWELL_MS),
        scroll_step: effective.scroll_step.unwrap_or(DEFAULT_SCROLL_STEP),
        scroll_interval_ms: effective
            .scroll_interval_ms
            .unwrap_or(DEFAULT_SCROLL_INTERVAL_MS),
    };
    let start_page = resolve_start_page(effective.start_page.as_deref())?;
    let url = effective
        .url
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    tracing::debug!(?cli, ?tuning, %url, start_page, "effective configuration");

    let mut app = App::new(url)
        .with_tuning(tuning)
        .with_start_page(start_page)
        .with_cursor_visible(!effective.hide_cursor);

    app.run().context("Application error")
}
