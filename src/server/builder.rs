//! ServerBuilder for fluent API to build the HTTP server

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::exposure::RestExposure;
use super::host::AppState;
use crate::config::AppConfig;
use crate::core::auth::{CodeSender, ConfirmationCodes, InMemoryTokenIssuer, LogCodeSender, TokenIssuer};
use crate::core::store::Store;
use crate::entities::{
    AuthDescriptor, Category, CommentDescriptor, Genre, ReviewDescriptor, TaxonDescriptor,
    TitleDescriptor, UserDescriptor, bootstrap_admin,
};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(config)
///     .register_defaults()
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Store>,
    tokens: Option<Arc<dyn TokenIssuer>>,
    code_sender: Option<Arc<dyn CodeSender>>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router<AppState>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default config and no entities
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            tokens: None,
            code_sender: None,
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific store (defaults to in-memory repositories)
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a specific token issuer (defaults to [`InMemoryTokenIssuer`])
    pub fn with_token_issuer(mut self, tokens: impl TokenIssuer + 'static) -> Self {
        self.tokens = Some(Arc::new(tokens));
        self
    }

    /// Use a specific confirmation code sender (defaults to [`LogCodeSender`])
    pub fn with_code_sender(mut self, sender: impl CodeSender + 'static) -> Self {
        self.code_sender = Some(Arc::new(sender));
        self
    }

    /// Add custom routes, mounted under `/v1` next to the entity routes
    pub fn with_custom_routes(mut self, routes: Router<AppState>) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register an entity descriptor
    pub fn register(mut self, descriptor: impl EntityDescriptor + 'static) -> Self {
        self.entity_registry.register(Box::new(descriptor));
        self
    }

    /// Register every entity of the review platform
    pub fn register_defaults(self) -> Self {
        self.register(UserDescriptor)
            .register(AuthDescriptor)
            .register(TaxonDescriptor::<Category>::new())
            .register(TaxonDescriptor::<Genre>::new())
            .register(TitleDescriptor)
            .register(ReviewDescriptor)
            .register(CommentDescriptor)
    }

    /// Entity types registered so far
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    /// Assemble the shared state, filling in defaults for anything not set
    fn build_state(&mut self) -> AppState {
        AppState {
            store: self.store.take().unwrap_or_default(),
            tokens: self
                .tokens
                .take()
                .unwrap_or_else(|| Arc::new(InMemoryTokenIssuer::new())),
            codes: Arc::new(ConfirmationCodes::new()),
            code_sender: self
                .code_sender
                .take()
                .unwrap_or_else(|| Arc::new(LogCodeSender)),
            config: Arc::new(self.config.clone()),
        }
    }

    /// Build the router together with the state it serves
    ///
    /// Tests use the state to seed users and issue tokens directly.
    pub fn build_with_state(mut self) -> Result<(Router, AppState)> {
        let state = self.build_state();
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let router =
            RestExposure::build_router(state.clone(), &self.entity_registry, custom_routes)?;
        Ok((router, state))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        self.build_with_state().map(|(router, _)| router)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Create the bootstrap admin, when configured
    /// - Bind to `server.bind`
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let (app, state) = self.build_with_state()?;

        bootstrap_admin(&state).await?;

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
