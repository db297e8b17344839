use crate::build_router;
use crate::config::{ServiflexConfig, StorageBackend};
use crate::services::seed::seed_demo_data;
use crate::services::{InMemoryRepository, MarketplaceRepository, MongoDb};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub config: ServiflexConfig,
    pub repo: Arc<dyn MarketplaceRepository>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    /// Builds the repository selected by `STORAGE_BACKEND` and binds the
    /// listener.
    pub async fn build(config: ServiflexConfig) -> Result<Self, AppError> {
        let repo: Arc<dyn MarketplaceRepository> = match config.storage.backend {
            StorageBackend::Mongo => {
                let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?;
                db.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                Arc::new(db)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Arc::new(InMemoryRepository::new())
            }
        };

        Self::build_with_repository(config, repo).await
    }

    pub async fn build_with_repository(
        config: ServiflexConfig,
        repo: Arc<dyn MarketplaceRepository>,
    ) -> Result<Self, AppError> {
        if config.seed_demo_data {
            seed_demo_data(repo.as_ref()).await.map_err(|e| {
                tracing::error!("Failed to seed demo data: {}", e);
                e
            })?;
        }

        let state = AppState {
            config: config.clone(),
            repo,
        };
        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            backend = ?config.storage.backend,
            "serviflex-service listening"
        );

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn repo(&self) -> Arc<dyn MarketplaceRepository> {
        self.state.repo.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
