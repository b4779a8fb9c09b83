//! The entity-object pool: entity keys to renderable handles.
//!
//! The pool owns one live handle per entity key. Handles are created
//! lazily on first access (the `Enter` path), refreshed on `Update`,
//! and destroyed and forgotten on `Exit`. What a handle *is* -- and how
//! a player animates differently from a coin -- lives in the
//! [`EntityFactory`] implementation, so render side effects stay
//! confined to the adapter.
//!
//! The pool is mutated only by the delta observer's event dispatch,
//! which runs on a single logical task. A multi-threaded embedding must
//! keep that single-owner discipline (for example behind a mutation
//! queue) to preserve the one-handle-per-key invariant.

use std::collections::BTreeMap;

use tracing::debug;

use coinfield_types::{EntityAttributes, EntityKey, SyncEvent};

use crate::observer::EventSink;

/// Per-kind lifecycle hooks for renderable objects.
pub trait EntityFactory {
    /// The renderable object handle this factory produces.
    type Handle;

    /// Create a handle for an entity that just entered the scene.
    fn create(&mut self, key: &EntityKey, attributes: &EntityAttributes) -> Self::Handle;

    /// Refresh an existing handle with new attributes.
    fn update(&mut self, key: &EntityKey, handle: &mut Self::Handle, attributes: &EntityAttributes);

    /// Tear down a handle whose entity left the scene.
    fn destroy(&mut self, key: &EntityKey, handle: Self::Handle);
}

/// Key-to-handle map with factory-backed create/destroy lifecycle.
///
/// Invariant: at most one live handle per key, and a `get` after a
/// `release` creates a fresh handle with no residual state.
#[derive(Debug)]
pub struct EntityPool<F: EntityFactory> {
    factory: F,
    handles: BTreeMap<EntityKey, F::Handle>,
}

impl<F: EntityFactory> EntityPool<F> {
    /// Create an empty pool around the given factory.
    pub const fn new(factory: F) -> Self {
        Self {
            factory,
            handles: BTreeMap::new(),
        }
    }

    /// Return the handle for `key`, creating one lazily on first
    /// access.
    pub fn get(&mut self, key: &EntityKey, attributes: &EntityAttributes) -> &mut F::Handle {
        self.handles
            .entry(key.clone())
            .or_insert_with(|| self.factory.create(key, attributes))
    }

    /// Destroy and forget the handle for `key`.
    ///
    /// Returns whether a handle existed. Releasing an unknown key is a
    /// no-op, not an error.
    pub fn release(&mut self, key: &EntityKey) -> bool {
        match self.handles.remove(key) {
            Some(handle) => {
                self.factory.destroy(key, handle);
                true
            }
            None => {
                debug!(?key, "release for a key with no live handle");
                false
            }
        }
    }

    /// Apply one lifecycle event from the delta observer.
    ///
    /// `Update` for a key with no live handle falls back to creation:
    /// the observer reconciles from absolute state, so the pool does
    /// too.
    pub fn apply_event(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::Enter { key, attributes } => {
                let _ = self.get(key, attributes);
            }
            SyncEvent::Update { key, attributes } => {
                if let Some(handle) = self.handles.get_mut(key) {
                    self.factory.update(key, handle, attributes);
                } else {
                    let _ = self.get(key, attributes);
                }
            }
            SyncEvent::Exit { key } => {
                let _ = self.release(key);
            }
        }
    }

    /// Whether a live handle exists for `key`.
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.handles.contains_key(key)
    }

    /// Read access to the handle for `key`, if live.
    pub fn handle(&self, key: &EntityKey) -> Option<&F::Handle> {
        self.handles.get(key)
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the pool holds no live handles.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterate over live (key, handle) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &F::Handle)> {
        self.handles.iter()
    }

    /// Consume the pool and return the factory (for inspecting adapter
    /// state after the observer loop ends).
    pub fn into_factory(self) -> F {
        self.factory
    }
}

impl<F: EntityFactory> EventSink for EntityPool<F> {
    fn handle_event(&mut self, event: &SyncEvent) {
        self.apply_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinfield_types::GridPos;

    /// Test factory: handles are generation numbers, and every
    /// lifecycle call is tallied.
    #[derive(Debug, Default)]
    struct RecordingFactory {
        next_generation: u32,
        created: u32,
        updated: u32,
        destroyed: u32,
    }

    impl EntityFactory for RecordingFactory {
        type Handle = u32;

        fn create(&mut self, _key: &EntityKey, _attributes: &EntityAttributes) -> u32 {
            self.created = self.created.saturating_add(1);
            self.next_generation = self.next_generation.saturating_add(1);
            self.next_generation
        }

        fn update(&mut self, _key: &EntityKey, _handle: &mut u32, _attributes: &EntityAttributes) {
            self.updated = self.updated.saturating_add(1);
        }

        fn destroy(&mut self, _key: &EntityKey, _handle: u32) {
            self.destroyed = self.destroyed.saturating_add(1);
        }
    }

    fn coin_key() -> EntityKey {
        EntityKey::Coin(GridPos::new(1, 0))
    }

    fn coin_attributes() -> EntityAttributes {
        EntityAttributes::Coin {
            position: GridPos::new(1, 0),
        }
    }

    #[test]
    fn get_is_lazy_and_returns_the_same_handle() {
        let mut pool = EntityPool::new(RecordingFactory::default());
        let key = coin_key();

        let first = *pool.get(&key, &coin_attributes());
        let second = *pool.get(&key, &coin_attributes());
        assert_eq!(first, second);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.into_factory().created, 1);
    }

    #[test]
    fn get_after_release_creates_a_fresh_handle() {
        let mut pool = EntityPool::new(RecordingFactory::default());
        let key = coin_key();

        let first = *pool.get(&key, &coin_attributes());
        assert!(pool.release(&key));
        let second = *pool.get(&key, &coin_attributes());

        assert_ne!(first, second);
        let factory = pool.into_factory();
        assert_eq!(factory.created, 2);
        assert_eq!(factory.destroyed, 1);
    }

    #[test]
    fn release_of_an_unknown_key_is_a_noop() {
        let mut pool = EntityPool::new(RecordingFactory::default());
        assert!(!pool.release(&coin_key()));
        assert_eq!(pool.into_factory().destroyed, 0);
    }

    #[test]
    fn events_drive_the_expected_lifecycle() {
        let mut pool = EntityPool::new(RecordingFactory::default());
        let key = coin_key();

        pool.apply_event(&SyncEvent::Enter {
            key: key.clone(),
            attributes: coin_attributes(),
        });
        assert!(pool.contains(&key));

        pool.apply_event(&SyncEvent::Update {
            key: key.clone(),
            attributes: coin_attributes(),
        });
        pool.apply_event(&SyncEvent::Exit { key: key.clone() });
        assert!(!pool.contains(&key));
        assert!(pool.is_empty());

        let factory = pool.into_factory();
        assert_eq!((factory.created, factory.updated, factory.destroyed), (1, 1, 1));
    }

    #[test]
    fn update_without_enter_reconciles_by_creating() {
        let mut pool = EntityPool::new(RecordingFactory::default());
        pool.apply_event(&SyncEvent::Update {
            key: coin_key(),
            attributes: coin_attributes(),
        });
        assert!(pool.contains(&coin_key()));
        assert_eq!(pool.into_factory().created, 1);
    }
}
