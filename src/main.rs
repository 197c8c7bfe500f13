mod clock;
mod diagnostics;
mod format;
mod offset;
mod settings;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use crate::clock::SystemClock;
use crate::settings::{MAX_SLOT_COUNT, Settings, load_settings};
use crate::ui::app::ViewKind;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliView {
    Single,
    Multi,
}

impl From<CliView> for ViewKind {
    fn from(value: CliView) -> Self {
        match value {
            CliView::Single => ViewKind::Single,
            CliView::Multi => ViewKind::Multi,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "offsetclock",
    version,
    about = "Live time-offset calculator: now and now + duration, to the second"
)]
struct Cli {
    /// View to open with.
    #[arg(long, value_enum, default_value_t = CliView::Single)]
    view: CliView,

    /// Optional JSON settings file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the refresh interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Override the number of slots in the multi view.
    #[arg(long)]
    slots: Option<usize>,

    /// Count the days field in slot calculations too.
    #[arg(long)]
    include_days: bool,

    /// Probe the host clock and exit without opening a window.
    #[arg(long)]
    diagnostics: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        if tick_ms == 0 {
            bail!("--tick-ms must be greater than zero");
        }
        settings.tick_interval_ms = tick_ms;
    }
    if let Some(slots) = cli.slots {
        if slots == 0 || slots > MAX_SLOT_COUNT {
            bail!("--slots must be between 1 and {MAX_SLOT_COUNT}");
        }
        settings.slot_count = slots;
    }
    if cli.include_days {
        settings.include_days_in_slots = true;
    }

    let clock = SystemClock;

    if cli.diagnostics {
        diagnostics::run_diagnostics(&clock, &settings)?;
        return Ok(());
    }

    ui::app::run_gui(Box::new(clock), settings, cli.view.into())
}
