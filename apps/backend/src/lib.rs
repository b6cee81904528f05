pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use stepcards_core::{Card, CardStore, MemoryStore, QueueLimits};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::services::settings::SettingsService;
use crate::services::storage::FileStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<dyn CardStore>,
    pub settings: Arc<SettingsService>,
    pub queue_limits: QueueLimits,
    /// Held across load, schedule and save so each card has a single writer.
    pub review_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        cards: Arc<dyn CardStore>,
        settings: Arc<SettingsService>,
        queue_limits: QueueLimits,
    ) -> Self {
        Self {
            cards,
            settings,
            queue_limits,
            review_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Persist `card` on the blocking pool, since a file-backed store rewrites
    /// the whole collection on every save.
    pub async fn save_card(&self, card: Card) -> Result<Card, ApiError> {
        let cards = Arc::clone(&self.cards);
        let card = tokio::task::spawn_blocking(move || cards.save(&card).map(|()| card))
            .await??;
        Ok(card)
    }

    /// Remove a card on the blocking pool. Returns whether it existed.
    pub async fn remove_card(&self, id: Uuid) -> Result<bool, ApiError> {
        let cards = Arc::clone(&self.cards);
        Ok(tokio::task::spawn_blocking(move || cards.remove(id)).await??)
    }

    /// Open the stores named by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cards: Arc<dyn CardStore> = match &config.data_file {
            Some(path) => {
                tracing::info!("Opening card store at {}", path.display());
                Arc::new(FileStore::open(path)?)
            }
            None => {
                tracing::warn!("DATA_FILE not set, cards are kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        let settings = match &config.parameters_file {
            Some(path) => SettingsService::load(path)?,
            None => SettingsService::in_memory(Default::default())?,
        };

        Ok(Self::new(cards, Arc::new(settings), config.queue_limits))
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Card routes
        .route(
            "/api/cards",
            get(routes::cards::list).post(routes::cards::create),
        )
        .route(
            "/api/cards/{id}",
            get(routes::cards::get)
                .patch(routes::cards::update)
                .delete(routes::cards::delete),
        )
        // Study routes
        .route("/api/study/queue", get(routes::study::queue))
        .route("/api/study/review", post(routes::study::review))
        .route("/api/study/preview/{id}", get(routes::study::preview))
        // Stats routes
        .route("/api/stats", get(routes::stats::get))
        // Settings routes
        .route(
            "/api/settings",
            get(routes::settings::get).put(routes::settings::update),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
