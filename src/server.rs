//! Reusable parking service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! store selection, migrations, services, REST API, metrics, and graceful
//! shutdown.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::ParkingServices;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{init_database, run_migrations, InMemoryStore, SeaOrmRepositoryProvider};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the parking service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── Metrics ────────────────────────────────────────────────────────

/// Process-wide Prometheus handle.
///
/// The global recorder can only be installed once per process, so a restart
/// within the same process reuses the first handle.
pub fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                warn!("A metrics recorder is already installed; /metrics stays empty");
            } else {
                info!("📊 Prometheus metrics recorder installed");
            }
            handle
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running parking service.
///
/// # Examples
///
/// ```rust,no_run
/// use parking_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Application services behind the REST API.
    pub services: ParkingServices,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the REST API is listening on.
    pub api_port: u16,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the parking service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Open the store (database or in-memory) and run migrations
    /// 3. Build the services and start the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting parking service...");

        let prometheus = prometheus_handle();

        // ── Store ──────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if app_cfg.database.is_memory() {
                warn!("Using in-memory store; data is lost on shutdown");
                let store: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
                (store, None)
            } else {
                let db = init_database(&app_cfg.database).await?;
                if opts.auto_migrate {
                    info!("Running database migrations...");
                    run_migrations(&db).await?;
                }
                let provider: Arc<dyn RepositoryProvider> =
                    Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
                (provider, Some(db))
            };

        // ── Services ───────────────────────────────────────────
        let policy = app_cfg.parking.fine_policy();
        info!(
            free_minutes = app_cfg.parking.free_minutes,
            rate_per_hour = app_cfg.parking.fine_rate_per_hour,
            "Overstay fine policy configured"
        );
        let services = ParkingServices::new(repos.clone(), policy);

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        spawn_metrics_upkeep(prometheus.clone(), shutdown_signal.clone());

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(services.clone(), prometheus);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let api_port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("🛑 REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Parking service started.");

        Ok(Self {
            repos,
            services,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let finished = shutdown
            .run_with_deadline(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !finished {
            warn!("REST API did not stop before the shutdown deadline");
        }

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Parking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down parking service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Drain histogram buckets periodically until shutdown.
fn spawn_metrics_upkeep(handle: PrometheusHandle, shutdown: ShutdownSignal) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            tokio::select! {
                _ = interval.tick() => handle.run_upkeep(),
                _ = shutdown.wait() => break,
            }
        }
    });
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
