// DraftFC entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load catalogs and the player pool
// 4. Create mpsc channels and the app state
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use draftfc_app::{app, config};
use draftfc_core::catalog::{ClubCatalog, PositionCatalog, StaticPlayerPool};
use draftfc_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("DraftFC starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {}-{} players (default {}), settle delay {}ms",
        config.game.min_players,
        config.game.max_players,
        config.game.default_players,
        config.wheel.settle_delay_ms
    );

    // 3. Catalogs and player pool
    let clubs = Arc::new(ClubCatalog::builtin());
    let positions = Arc::new(PositionCatalog::builtin());
    let pool = StaticPlayerPool::load_dir(Path::new(&config.data_paths.players_dir));
    if pool.total_cards() == 0 {
        warn!(
            "No player cards found in {}; every pick will report an empty pool",
            config.data_paths.players_dir
        );
    }
    info!(
        "Loaded {} clubs, {} positions, {} player cards",
        clubs.len(),
        positions.len(),
        pool.total_cards()
    );

    // 4. Channels and app state
    let (settle_tx, settle_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(
        config,
        clubs,
        positions,
        Arc::new(pool),
        StdRng::from_entropy(),
        settle_tx,
    );

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, settle_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop until the user presses 'q' or Ctrl+C
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await;

    info!("DraftFC shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftfc.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draftfc=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
