//! Application Startup
//!
//! Storage selection, dependency wiring and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::{Dependencies, Mediator};
use crate::config::{Settings, StorageBackend};
use crate::infrastructure::database::{self, PgCommitSink};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::repositories::PgUserRepository;
use crate::infrastructure::security::{Argon2PasswordHasher, JwtService};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub jwt: Arc<JwtService>,
    /// `None` on the in-memory backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire handlers against PostgreSQL.
    pub fn postgres(pool: PgPool, settings: Settings) -> Self {
        let jwt = Arc::new(JwtService::new(settings.jwt.clone()));
        let deps = Dependencies {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            commit_sink: Arc::new(PgCommitSink::new(pool.clone())),
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            token_issuer: jwt.clone(),
        };

        Self {
            mediator: Arc::new(Mediator::new(deps)),
            jwt,
            db: Some(pool),
            settings: Arc::new(settings),
        }
    }

    /// Wire handlers against a process-local store.
    pub fn in_memory(store: Arc<MemoryStore>, settings: Settings) -> Self {
        let jwt = Arc::new(JwtService::new(settings.jwt.clone()));
        let deps = Dependencies {
            users: store.clone(),
            commit_sink: store,
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            token_issuer: jwt.clone(),
        };

        Self {
            mediator: Arc::new(Mediator::new(deps)),
            jwt,
            db: None,
            settings: Arc::new(settings),
        }
    }
}

/// Full router with tracing and CORS applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::mark_started();

        let state = match settings.storage.backend {
            StorageBackend::Postgres => {
                let db = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&db).await?;
                    tracing::info!("Database migrations applied");
                }

                AppState::postgres(db, settings.clone())
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                AppState::in_memory(Arc::new(MemoryStore::new()), settings.clone())
            }
        };

        let router = build_router(state);

        let addr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until ctrl-c
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
