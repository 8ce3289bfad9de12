//! # Router
//!
//! Registry mapping a protocol or action identifier to the controller that
//! handles it. Built once at start-up, then sealed.
//!
//! Once sealed, `add_route` always fails, so the set of supported protocols
//! and actions cannot change without a restart. Pause and validation logic
//! rely on that.

use shared_types::{ActionId, OrbiterError, ProtocolId};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// A key a router can be indexed by.
pub trait RouteKey: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// Fails for reserved or unsupported values.
    fn validate_key(&self) -> Result<(), OrbiterError>;
}

impl RouteKey for ProtocolId {
    fn validate_key(&self) -> Result<(), OrbiterError> {
        self.validate()
    }
}

impl RouteKey for ActionId {
    fn validate_key(&self) -> Result<(), OrbiterError> {
        self.validate()
    }
}

/// A controller reports the key it owns.
pub trait Controller<K: RouteKey>: Send + Sync {
    /// Key this controller is registered under.
    fn id(&self) -> K;

    /// Name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Routing table from `K` to controller `C`.
pub struct Router<K: RouteKey, C: ?Sized + Controller<K>> {
    routes: HashMap<K, Arc<C>>,
    sealed: bool,
}

impl<K: RouteKey, C: ?Sized + Controller<K>> Router<K, C> {
    /// Empty, unsealed router.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            sealed: false,
        }
    }

    /// Register `controller` under the key it reports.
    ///
    /// # Errors
    /// - router is sealed
    /// - key is reserved
    /// - key already registered
    pub fn add_route(&mut self, controller: Arc<C>) -> Result<(), OrbiterError> {
        let key = controller.id();
        if self.sealed {
            return Err(OrbiterError::validation(format!(
                "cannot register route {}: router is sealed",
                key
            )));
        }
        key.validate_key()?;
        if self.routes.contains_key(&key) {
            return Err(OrbiterError::AlreadyExists(format!("route {}", key)));
        }
        debug!(
            "[orbiter:router] Registered {} for route {}",
            controller.name(),
            key
        );
        self.routes.insert(key, controller);
        Ok(())
    }

    /// Controller for `key`, if routed.
    pub fn route(&self, key: K) -> Option<Arc<C>> {
        self.routes.get(&key).cloned()
    }

    /// Controller for `key`, or `NotFound`.
    pub fn require_route(&self, key: K) -> Result<Arc<C>, OrbiterError> {
        self.route(key)
            .ok_or_else(|| OrbiterError::not_found(format!("no route for {}", key)))
    }

    /// True if `key` is routed.
    pub fn has_route(&self, key: K) -> bool {
        self.routes.contains_key(&key)
    }

    /// All routed keys.
    pub fn keys(&self) -> Vec<K> {
        self.routes.keys().copied().collect()
    }

    /// Make the router immutable.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// True after `seal()`.
    pub fn sealed(&self) -> bool {
        self.sealed
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<K: RouteKey, C: ?Sized + Controller<K>> Default for Router<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Dummy: Controller<ProtocolId> + std::fmt::Debug {}

    #[derive(Debug)]
    struct DummyController(ProtocolId);

    impl Controller<ProtocolId> for DummyController {
        fn id(&self) -> ProtocolId {
            self.0
        }
    }

    impl Dummy for DummyController {}

    fn router() -> Router<ProtocolId, dyn Dummy> {
        Router::new()
    }

    #[test]
    fn test_add_and_route() {
        let mut r = router();
        r.add_route(Arc::new(DummyController(ProtocolId::Cctp))).unwrap();
        assert!(r.route(ProtocolId::Cctp).is_some());
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_route_unregistered_is_none() {
        let mut r = router();
        r.add_route(Arc::new(DummyController(ProtocolId::Cctp))).unwrap();
        for key in [ProtocolId::Ibc, ProtocolId::Hyperlane, ProtocolId::Unsupported] {
            assert!(r.route(key).is_none());
            assert_eq!(
                r.require_route(key).unwrap_err().kind(),
                shared_types::ErrorKind::NotFound
            );
        }
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut r = router();
        r.add_route(Arc::new(DummyController(ProtocolId::Ibc))).unwrap();
        assert!(r.add_route(Arc::new(DummyController(ProtocolId::Ibc))).is_err());
    }

    #[test]
    fn test_unsupported_key_rejected() {
        let mut r = router();
        assert!(r
            .add_route(Arc::new(DummyController(ProtocolId::Unsupported)))
            .is_err());
        assert!(r.is_empty());
    }

    #[test]
    fn test_sealed_router_rejects_every_add() {
        let mut r = router();
        r.seal();
        assert!(r.sealed());
        for key in ProtocolId::SUPPORTED {
            assert!(r.add_route(Arc::new(DummyController(key))).is_err());
        }
        assert!(r.is_empty());
    }
}
