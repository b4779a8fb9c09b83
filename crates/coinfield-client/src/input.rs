//! The input dispatcher: raw input events to submitted actions.
//!
//! Key presses are discrete edges, not held state: one press maps to
//! exactly one `move` submission. A pointer-down maps to one `spawn` at
//! the tile containing the pointer, subject to the configurable origin
//! guard. Submissions are requests to the gateway; confirmation (or
//! rejection) comes back whenever the sequencer gets to them, and any
//! failure is surfaced unchanged to the caller.

use tracing::debug;

use coinfield_gateway::{ActionGateway, GatewayError};
use coinfield_types::{Action, ActionRequest, Confirmation, Direction, GridPos, PlayerId};

use crate::config::ClientConfig;
use crate::grid;

/// A raw input event from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A movement key's press edge.
    KeyPressed(Direction),
    /// A pointer-down at a pixel coordinate.
    PointerDown {
        /// Horizontal pixel coordinate.
        x: i32,
        /// Vertical pixel coordinate.
        y: i32,
    },
}

/// Maps input events to gateway submissions for one player.
#[derive(Debug)]
pub struct InputDispatcher<G> {
    gateway: G,
    player: PlayerId,
    config: ClientConfig,
}

impl<G: ActionGateway> InputDispatcher<G> {
    /// Create a dispatcher for the given player.
    pub const fn new(gateway: G, player: PlayerId, config: ClientConfig) -> Self {
        Self {
            gateway,
            player,
            config,
        }
    }

    /// The player this dispatcher acts for.
    pub const fn player(&self) -> &PlayerId {
        &self.player
    }

    /// Dispatch one input event.
    ///
    /// Returns `Ok(None)` when the event was deliberately dropped (the
    /// origin guard); otherwise the gateway's confirmation or error is
    /// passed through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`GatewayError`] from the submission: a
    /// `Rejected(OutOfBounds)` move leaves the displayed position
    /// unchanged, and a `SubmissionFailed` leaves it to the caller to
    /// resubmit or give up.
    pub async fn dispatch(&self, event: InputEvent) -> Result<Option<Confirmation>, GatewayError> {
        match event {
            InputEvent::KeyPressed(direction) => {
                let request = ActionRequest::new(
                    self.player.clone(),
                    Action::Move { direction },
                );
                self.gateway.submit(request).await.map(Some)
            }
            InputEvent::PointerDown { x, y } => {
                let tile = grid::tile_point_from_pixel(x, y, self.config.tile_size);
                if self.config.suppress_origin_spawn && tile == GridPos::new(0, 0) {
                    debug!(x, y, "pointer spawn at origin tile suppressed");
                    return Ok(None);
                }

                let request = ActionRequest::new(
                    self.player.clone(),
                    Action::Spawn { position: tile },
                );
                self.gateway.submit(request).await.map(Some)
            }
        }
    }

    /// Submit a `generateCoins` action.
    ///
    /// # Errors
    ///
    /// Propagates [`GatewayError`] from the submission.
    pub async fn generate_coins(&self) -> Result<Confirmation, GatewayError> {
        let request = ActionRequest::new(self.player.clone(), Action::GenerateCoins);
        self.gateway.submit(request).await
    }
}
