use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gridlight_cli::{commands, readline, HarnessState};
use tokio::sync::RwLock;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();

    let state = Arc::new(RwLock::new(HarnessState::new()));
    spawn_event_loggers(&state).await;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

/// Initialize logging on stderr; stdout stays clean for command output.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Mirror the broadcast channels into the log, the way a UI layer would
/// consume them. Lagged receivers resubscribe by just continuing the loop.
async fn spawn_event_loggers(state: &Arc<RwLock<HarnessState>>) {
    let guard = state.read().await;
    let mut activation_rx = guard.controller.subscribe_activation();
    let mut settings_rx = guard.controller.settings().subscribe();
    drop(guard);

    tokio::spawn(async move {
        loop {
            match activation_rx.recv().await {
                Ok(active) => tracing::info!(active, "activation changed"),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "activation events lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    tokio::spawn(async move {
        loop {
            match settings_rx.recv().await {
                Ok(()) => tracing::debug!("settings changed"),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "settings events lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[derive(Parser)]
#[command(version, about = "network highlight harness")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn highlighting on and rebuild the cache.
    Activate,
    /// Turn highlighting off and drop the cache.
    Deactivate,
    /// Insert a sample segment; see `kinds` for the catalog.
    Add { kind: String },
    /// Release a segment by id.
    Release { id: u32 },
    /// Flip a category toggle.
    Toggle { category: String },
    /// Set a category hue in [0,1).
    Hue { category: String, value: f32 },
    /// Set the global highlight strength.
    Strength { value: f32 },
    /// Set the global width multiplier.
    Width { value: f32 },
    /// Include or exclude bridge structures.
    Bridges { on: bool },
    /// Include or exclude tunnel structures.
    Tunnels { on: bool },
    /// Print the current configuration.
    Config,
    /// Restore the shipped defaults.
    Reset,
    /// Print activation, graph, and cache counters.
    Stats,
    /// List the sample segment kinds.
    Kinds,
    /// Render one frame to a PNG file.
    Frame { out: PathBuf },
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<HarnessState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "gridlight".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let mut state = state.write().await;
    match &cli.command {
        Some(Commands::Activate) => commands::activate(&mut state).await?,
        Some(Commands::Deactivate) => commands::deactivate(&mut state).await?,
        Some(Commands::Add { kind }) => commands::add(&mut state, kind).await?,
        Some(Commands::Release { id }) => commands::release(&mut state, *id).await?,
        Some(Commands::Toggle { category }) => commands::toggle(&mut state, category).await?,
        Some(Commands::Hue { category, value }) => {
            commands::hue(&mut state, category, *value).await?
        }
        Some(Commands::Strength { value }) => commands::strength(&mut state, *value).await?,
        Some(Commands::Width { value }) => commands::width(&mut state, *value).await?,
        Some(Commands::Bridges { on }) => commands::bridges(&mut state, *on).await?,
        Some(Commands::Tunnels { on }) => commands::tunnels(&mut state, *on).await?,
        Some(Commands::Config) => commands::config(&mut state).await?,
        Some(Commands::Reset) => commands::reset(&mut state).await?,
        Some(Commands::Stats) => commands::stats(&mut state).await?,
        Some(Commands::Kinds) => commands::kinds().await?,
        Some(Commands::Frame { out }) => commands::frame(&mut state, out.clone()).await?,
        Some(Commands::Exit) => return Ok(true),
        None => {}
    }
    Ok(false)
}
