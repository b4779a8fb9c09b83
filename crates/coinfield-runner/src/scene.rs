//! Logging scene: an entity factory whose "handles" are log lines.
//!
//! The runner has no renderer; this factory stands where one would
//! plug in, tracing every enter/update/exit the pool applies so the
//! sync pipeline's output is visible in the process log.

use tracing::{debug, info};

use coinfield_sync::EntityFactory;
use coinfield_types::{EntityAttributes, EntityKey};

/// Factory that logs lifecycle calls and counts them.
#[derive(Debug, Default)]
pub struct LoggingScene {
    created: u64,
    destroyed: u64,
}

impl LoggingScene {
    /// Number of handles created so far.
    pub const fn created(&self) -> u64 {
        self.created
    }

    /// Number of handles destroyed so far.
    pub const fn destroyed(&self) -> u64 {
        self.destroyed
    }
}

impl EntityFactory for LoggingScene {
    type Handle = EntityAttributes;

    fn create(&mut self, key: &EntityKey, attributes: &EntityAttributes) -> EntityAttributes {
        self.created = self.created.saturating_add(1);
        info!(key = ?key, attributes = ?attributes, "scene object created");
        attributes.clone()
    }

    fn update(&mut self, key: &EntityKey, handle: &mut EntityAttributes, attributes: &EntityAttributes) {
        debug!(key = ?key, attributes = ?attributes, "scene object updated");
        *handle = attributes.clone();
    }

    fn destroy(&mut self, key: &EntityKey, _handle: EntityAttributes) {
        self.destroyed = self.destroyed.saturating_add(1);
        info!(key = ?key, "scene object destroyed");
    }
}
