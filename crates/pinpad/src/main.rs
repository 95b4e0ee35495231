//! Pinpad - pin entry screen for pairing a remote debugging session
//!
//! `pair` asks for the session URL, then shows the 4-digit keypad. A pin
//! that matches the stored one unlocks the screen and starts the session;
//! the connect key starts it with whatever 4 digits are entered.

mod initiator;
mod input;
mod screen;
mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pinpad_core::{
    secret, ControllerConfig, PinController, PinStore, DEFAULT_EVALUATION_DELAY_MS,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::initiator::LogInitiator;
use crate::input::Input;
use crate::terminal::{InputMode, TerminalGuard};

/// Pinpad - pin entry for remote debugging sessions
#[derive(Parser, Debug)]
#[command(name = "pinpad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pin pad for pairing remote debugging sessions", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Pin store file (defaults to the platform data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enter the pin and start a remote session
    Pair {
        /// Session URL (prompted for when omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Delay between the 4th digit and the pin check
        #[arg(long, default_value_t = DEFAULT_EVALUATION_DELAY_MS)]
        delay_ms: u64,
    },
    /// Configure the stored pin
    SetPin {
        /// 4-digit pin
        #[arg(required_unless_present = "random")]
        pin: Option<String>,

        /// Generate a random pin instead
        #[arg(long, conflicts_with = "pin")]
        random: bool,
    },
    /// Print the stored pin
    ShowPin,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level)?;

    let mut store = match &args.store {
        Some(path) => PinStore::load(path.clone()),
        None => PinStore::load_default(),
    }
    .context("Failed to load pin store")?;

    match args.command {
        Command::Pair { url, delay_ms } => {
            let url = match url {
                Some(url) => url,
                None => prompt_url()?,
            };
            if store.pin().is_none() {
                warn!(
                    "No pin configured in {}, every pin will be rejected",
                    store.path().display()
                );
            }
            pair(url, store, Duration::from_millis(delay_ms)).await
        }
        Command::SetPin { pin, random } => {
            let pin = match pin {
                Some(pin) if !random => pin,
                _ => secret::generate_pin(),
            };
            store.set_pin(&pin).context("Rejected pin")?;
            store.save().context("Failed to save pin store")?;
            info!("Pin saved to {}", store.path().display());
            println!("Pin set: {}", pin);
            Ok(())
        }
        Command::ShowPin => {
            println!("{}", store.pin().unwrap_or("unset"));
            Ok(())
        }
    }
}

/// Setup logging with tracing
fn setup_logging(level: &str) -> Result<()> {
    let log_level = level.parse::<Level>().unwrap_or(Level::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Session URL entry screen
fn prompt_url() -> Result<String> {
    print!("Copy Assurance Session URL to here: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read session URL")?;
    Ok(line.trim().to_string())
}

/// Pin screen: runs until quit or input ends
async fn pair(url: String, store: PinStore, delay: Duration) -> Result<()> {
    let controller = PinController::with_config(
        url,
        Arc::new(store),
        Arc::new(LogInitiator),
        ControllerConfig::with_delay(delay),
    );

    // Fallback: line-buffered input when stdin is not a TTY
    let (mode, guard) = match InputMode::detect() {
        InputMode::Raw => match TerminalGuard::enable() {
            Ok(guard) => (InputMode::Raw, Some(guard)),
            Err(e) => {
                warn!("Raw mode not available: {}. Reading keys line by line.", e);
                (InputMode::Lines, None)
            }
        },
        InputMode::Lines => (InputMode::Lines, None),
    };

    let mut inputs = input::spawn_reader(mode);
    let mut render = controller.subscribe();
    let target = controller.target().to_string();

    terminal::draw(&screen::frame(&controller.render_state(), &target), mode)?;

    loop {
        tokio::select! {
            input = inputs.recv() => match input {
                Some(Input::Key(key)) => controller.press(key),
                Some(Input::Quit) | None => break,
            },
            changed = render.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *render.borrow_and_update();
                terminal::draw(&screen::frame(&state, &target), mode)?;
            }
        }
    }

    // Piped input can end inside the evaluation window
    let mut settle = Duration::from_millis(50);
    if controller.render_state().evaluation_pending {
        settle += controller.config().evaluation_delay;
    }
    tokio::time::sleep(settle).await;

    drop(guard);
    let state = controller.render_state();
    if state.unlocked {
        println!("Connected.");
    } else {
        println!("Closed without connecting.");
    }
    Ok(())
}
