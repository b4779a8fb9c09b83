//! World runner binary for Coinfield.
//!
//! Wires the full pipeline together: the authoritative world store
//! behind the sequencer, the delta observer feeding a logging scene,
//! and an input dispatcher driving a short scripted session. With a
//! `snapshot_path` configured, the world resumes from the saved
//! snapshot at startup and persists the final snapshot at shutdown.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `coinfield-config.yaml`
//! 3. Build the world store (resume from snapshot, or genesis)
//! 4. Start the sequencer
//! 5. Spawn the delta observer over a logging scene
//! 6. Run the scripted input session
//! 7. Shut down, collect the store and the scene
//! 8. Persist the final snapshot
//! 9. Log the result

mod config;
mod error;
mod scene;

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coinfield_client::{grid, InputDispatcher, InputEvent};
use coinfield_engine::{persist, TransitionEngine, WorldStore};
use coinfield_gateway::{GatewayError, LocalSequencer};
use coinfield_sync::{DeltaObserver, EntityPool};
use coinfield_types::{Direction, GridPos, PlayerId};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::scene::LoggingScene;

/// Configuration file expected in the working directory.
const CONFIG_PATH: &str = "coinfield-config.yaml";

/// Application entry point for the world runner.
///
/// Initializes all subsystems, runs the scripted session, and persists
/// the final snapshot if a path is configured.
///
/// # Errors
///
/// Returns [`RunnerError`] if any startup step, submission, or the
/// shutdown persistence fails. The deliberately rejected edge move and
/// the suppressed origin click are expected outcomes, not errors.
#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<(), RunnerError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("coinfield-runner starting");

    // 2. Load configuration.
    let config = RunnerConfig::load(Path::new(CONFIG_PATH))?;
    info!(
        placement = ?config.world.placement,
        channel_capacity = config.world.channel_capacity,
        tile_size = config.client.tile_size,
        suppress_origin_spawn = config.client.suppress_origin_spawn,
        "configuration loaded"
    );

    // 3. Build the world store.
    let engine = TransitionEngine::new(config.world.coin_placement());
    let store = match &config.world.snapshot_path {
        Some(path) if path.exists() => {
            let snapshot = persist::load_snapshot(path)?;
            info!(
                sequence = snapshot.sequence,
                path = %path.display(),
                "resuming from saved snapshot"
            );
            WorldStore::resume(engine, snapshot)
        }
        Some(path) => {
            info!(path = %path.display(), "no snapshot found, starting from genesis");
            WorldStore::new(engine)
        }
        None => {
            info!("in-memory world, starting from genesis");
            WorldStore::new(engine)
        }
    };

    // 4. Start the sequencer.
    let (handle, store_task) = LocalSequencer::start(store, config.world.channel_capacity);
    info!("sequencer started");

    // 5. Spawn the delta observer over a logging scene.
    let receiver = handle.subscribe();
    let observer_task =
        tokio::spawn(DeltaObserver::new().run(receiver, EntityPool::new(LoggingScene::default())));
    info!("delta observer running");

    // 6. Run the scripted session.
    let tile_size = config.client.tile_size;
    let player = PlayerId::new("player-1");
    let session = InputDispatcher::new(handle.clone(), player.clone(), config.client);

    // A click on the origin tile is dropped by the guard.
    let suppressed = session.dispatch(InputEvent::PointerDown { x: 0, y: 0 }).await?;
    info!(submitted = suppressed.is_some(), "origin click dispatched");

    // Spawn on tile (2, 2) via its pixel coordinates.
    let (x, y) = grid::pixel_point_from_tile(GridPos::new(2, 2), tile_size);
    if let Some(confirmation) = session.dispatch(InputEvent::PointerDown { x, y }).await? {
        info!(sequence = confirmation.sequence, "player spawned");
    }

    let confirmation = session.generate_coins().await?;
    info!(sequence = confirmation.sequence, "coins generated");

    for direction in [Direction::Right, Direction::Down] {
        if let Some(confirmation) = session
            .dispatch(InputEvent::KeyPressed(direction))
            .await?
        {
            info!(sequence = confirmation.sequence, ?direction, "move confirmed");
        }
    }

    // Walk to the east edge, then show a rejection leaving the world
    // untouched.
    let (x, y) = grid::pixel_point_from_tile(GridPos::new(31, 0), tile_size);
    session.dispatch(InputEvent::PointerDown { x, y }).await?;
    match session.dispatch(InputEvent::KeyPressed(Direction::Right)).await {
        Err(GatewayError::Rejected { source }) => {
            warn!(%source, "edge move rejected, world unchanged");
        }
        Ok(confirmation) => {
            warn!(?confirmation, "edge move unexpectedly confirmed");
        }
        Err(other) => return Err(other.into()),
    }

    // 7. Shut down: dropping every handle closes the submission channel,
    // which ends the apply loop and, through the broadcast, the observer.
    drop(session);
    drop(handle);
    let store = store_task.await?;
    let pool = observer_task.await?;

    // 8. Persist the final snapshot.
    if let Some(path) = &config.world.snapshot_path {
        persist::save_snapshot(path, store.snapshot())?;
        info!(
            sequence = store.snapshot().sequence,
            path = %path.display(),
            "snapshot saved"
        );
    }

    // 9. Log the result.
    let scene = pool.into_factory();
    info!(
        sequence = store.snapshot().sequence,
        transitions = store.log().len(),
        player_position = %store
            .player(&player)
            .map_or_else(|| "unspawned".to_owned(), |p| p.position.to_string()),
        player_coins = store.player(&player).map_or(0, |p| p.coins),
        scene_created = scene.created(),
        scene_destroyed = scene.destroyed(),
        "coinfield-runner finished"
    );

    Ok(())
}
