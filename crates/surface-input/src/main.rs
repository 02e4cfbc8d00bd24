//! surface-input-probe: drives the surface input component from a JSON line
//! stream.
//!
//! Reads commands from stdin (see `infrastructure::probe` for the format),
//! dispatches raw events into an in-process window source and surface source,
//! and writes every event the component publishes to stdout as one JSON line.
//! Diagnostics go to stderr so stdout stays machine-readable.
//!
//! ```bash
//! echo '{"op":"raw","kind":"keydown","event":{"type":"key","key_code":65}}' \
//!     | surface-input-probe --log-level debug
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load AppConfig            -- --config path or platform config file
//!  └─ LocalEventSource ×2       -- "window" (keyboard), "surface" (pointer/wheel)
//!  └─ LocalEventBus             -- printer subscribed to every event name
//!  └─ SurfaceInput::attach()
//!  └─ stdin loop                -- decode, dispatch, flush published events
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use surface_input::infrastructure::probe::{decode_line, encode_event, ProbeCommand};
use surface_input::infrastructure::storage::config::{
    load_config, load_config_from, AppConfig, ConfigError,
};
use surface_input::{
    EventBus, LocalEventBus, LocalEventSource, SurfaceInput, SurfaceInputOptions,
};
use surface_input_core::{EventName, ListenerScope, SurfaceEvent};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line arguments for the probe.
#[derive(Debug, Parser)]
#[command(
    name = "surface-input-probe",
    about = "Feed raw device events through the surface input layer and print what it publishes",
    version
)]
struct Cli {
    /// Path to a TOML config file.  Defaults to the platform config file.
    #[arg(long, env = "SURFACE_INPUT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level filter, overriding the config file.  `RUST_LOG` wins over both.
    #[arg(long, env = "SURFACE_INPUT_LOG")]
    log_level: Option<String>,

    /// Start with the input gate closed, regardless of the config file.
    #[arg(long)]
    disabled: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => match load_config() {
                Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
                other => other.context("failed to load platform config"),
            },
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = cli.load_config()?;
    if cli.disabled {
        config.input.start_enabled = false;
    }

    // ── Logging setup ─────────────────────────────────────────────────────────
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Wiring ────────────────────────────────────────────────────────────────
    let window = Rc::new(LocalEventSource::window());
    let surface = Rc::new(LocalEventSource::surface());
    let bus = Rc::new(LocalEventBus::new());

    let outbox: Rc<RefCell<VecDeque<SurfaceEvent>>> = Rc::new(RefCell::new(VecDeque::new()));
    for name in EventName::ALL {
        let outbox = Rc::clone(&outbox);
        bus.subscribe(
            name,
            Rc::new(move |event: &SurfaceEvent| outbox.borrow_mut().push_back(event.clone())),
        );
    }

    let options = SurfaceInputOptions {
        translator: config.input.translator_options(),
        click_synthesis: config.input.click_synthesis,
    };
    let input = SurfaceInput::attach(window.clone(), surface.clone(), bus.clone(), options)
        .context("failed to attach surface input")?;

    info!(enabled = input.is_enabled(), "surface-input-probe ready; reading stdin");

    // ── Main loop ─────────────────────────────────────────────────────────────
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut dispatched = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let command = match decode_line(index + 1, &line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("skipping malformed input: {e}");
                continue;
            }
        };

        match command {
            ProbeCommand::Raw { kind, event } => {
                let source = match kind.scope() {
                    ListenerScope::Window => &window,
                    ListenerScope::Surface => &surface,
                };
                source.dispatch(kind, &event);
                dispatched += 1;
            }
            ProbeCommand::SetEnabled { value } => {
                input.set_enabled(value);
            }
            ProbeCommand::Reset => input.reset(),
        }

        let published: Vec<SurfaceEvent> = outbox.borrow_mut().drain(..).collect();
        for event in &published {
            writeln!(out, "{}", encode_event(event)?).context("failed to write stdout")?;
        }
        out.flush().context("failed to flush stdout")?;
    }

    input.detach();
    info!(dispatched, "surface-input-probe finished");
    Ok(())
}
