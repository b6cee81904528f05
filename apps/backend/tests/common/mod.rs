//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for building the router over in-memory stores
//! - Helpers for seeding cards directly into the store

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use stepcards_backend::services::settings::SettingsService;
use stepcards_backend::{router, AppState};
use stepcards_core::{Card, CardStore, MemoryStore, Parameters, QueueLimits, StoreError};

/// Store whose loads block for a while, widening the gap between a handler
/// reading a card and writing it back.
pub struct SlowStore {
    inner: Arc<MemoryStore>,
    delay: Duration,
}

impl CardStore for SlowStore {
    fn load(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        std::thread::sleep(self.delay);
        self.inner.load(id)
    }

    fn save(&self, card: &Card) -> Result<(), StoreError> {
        self.inner.save(card)
    }

    fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.remove(id)
    }

    fn list(&self) -> Result<Vec<Card>, StoreError> {
        self.inner.list()
    }
}

/// Test context holding the stores behind a router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub settings: Arc<SettingsService>,
    app: Router,
}

impl TestContext {
    /// Create a context with default parameters and limits.
    pub fn new() -> Self {
        Self::with_parameters(Parameters::default())
    }

    /// Create a context with the given scheduling parameters.
    ///
    /// # Panics
    /// Panics if the parameters are invalid.
    pub fn with_parameters(params: Parameters) -> Self {
        Self::build(params, QueueLimits::default())
    }

    pub fn with_limits(limits: QueueLimits) -> Self {
        Self::build(Parameters::default(), limits)
    }

    /// Create a context whose card loads each take `delay`.
    pub fn with_slow_loads(delay: Duration) -> Self {
        Self::build_with(Parameters::default(), QueueLimits::default(), |store| {
            Arc::new(SlowStore {
                inner: store,
                delay,
            }) as Arc<dyn CardStore>
        })
    }

    fn build(params: Parameters, limits: QueueLimits) -> Self {
        Self::build_with(params, limits, |store| store as Arc<dyn CardStore>)
    }

    fn build_with(
        params: Parameters,
        limits: QueueLimits,
        wrap: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn CardStore>,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());
        let settings = Arc::new(
            SettingsService::in_memory(params).expect("test parameters must be valid"),
        );
        let state = AppState::new(wrap(store.clone()), settings.clone(), limits);
        Self {
            store,
            settings,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("failed to start test server")
    }

    /// Insert a card straight into the store.
    pub fn seed(&self, card: Card) -> Card {
        self.store.save(&card).expect("failed to seed card");
        card
    }

    /// Read a card straight from the store.
    pub fn stored(&self, card: &Card) -> Option<Card> {
        self.store.load(card.id).expect("failed to load card")
    }
}
