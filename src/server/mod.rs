pub mod config;
pub mod request_logger;

use crate::{
    climate::ClimateService,
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    metrics,
    routes::{
        create_climate_routes, create_docs_routes, create_health_routes, create_home_routes,
    },
    server::request_logger::request_response_logger,
    shutdown::{DatabaseShutdown, ShutdownCoordinator, ShutdownManager},
    utils::request_id::request_id_middleware,
};
use axum::{Router, middleware};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub health_service: Arc<HealthService>,
    pub climate_service: Arc<ClimateService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    /// Connect to the configured store and refuse to start if it lacks the climate tables
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let database = Arc::new(DatabaseManagerImpl::new_from_config(&config.database).await?);

        database.verify_schema().await?;
        info!("Database schema verified at {}", config.database.url);

        Ok(Self::with_database(config, database).await)
    }

    /// Build the server around an already-open database
    pub async fn with_database(config: Config, database_impl: Arc<DatabaseManagerImpl>) -> Self {
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let climate_service = Arc::new(ClimateService::new(
            database.clone(),
            config.dataset.clone(),
        ));

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;
        health_service.register(climate_service.clone()).await;

        Self {
            config: Arc::new(config),
            database,
            health_service,
            climate_service,
            shutdown_coordinator: Arc::new(ShutdownCoordinator::new()),
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let _metrics_handle = if self.config.metrics.enabled {
            let handle = metrics::init_metrics_with_port(self.config.metrics.port).map_err(|e| {
                error!(
                    "Failed to start metrics server on port {}: {}",
                    self.config.metrics.port, e
                );
                AppError::Internal(format!("Failed to start metrics server: {}", e))
            })?;
            Some(handle)
        } else {
            None
        };

        let mut shutdown_manager = ShutdownManager::new(Duration::from_secs(30));
        shutdown_manager.register(DatabaseShutdown::new(self.database.clone()));

        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            info!("Graceful shutdown initiated");
        })
        .await;

        if let Err(e) = result {
            error!("Server error: {}", e);
        }

        shutdown_manager.shutdown_all().await;
        info!("Server shutdown complete");

        Ok(())
    }

    // Creates an application router
    pub fn create_app(&self) -> Router {
        let app = Router::new()
            .merge(create_home_routes())
            .nest("/api/v1.0", create_climate_routes())
            .nest("/health", create_health_routes())
            .nest("/api-docs", create_docs_routes())
            .with_state(self.clone());

        self.add_conditional_middleware(app)
            .layer(middleware::from_fn(request_id_middleware))
    }

    fn add_conditional_middleware(&self, mut app: Router) -> Router {
        if self.config.metrics.enabled {
            app = app.layer(middleware::from_fn(metrics::metrics_middleware));
        }
        if self.config.logging.log_request {
            app = app.layer(middleware::from_fn(request_response_logger));
        }
        app
    }
}
