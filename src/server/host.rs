//! Shared application state
//!
//! `AppState` is the single source of truth handed to every handler: the
//! repositories, the authentication collaborators and the loaded config.
//! Every field is reference counted, so cloning per request is cheap.

use crate::config::AppConfig;
use crate::core::auth::{CodeSender, ConfirmationCodes, InMemoryTokenIssuer, LogCodeSender, TokenIssuer};
use crate::core::store::Store;
use std::sync::Arc;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// One repository per entity type
    pub store: Store,

    /// Issues and resolves bearer tokens
    pub tokens: Arc<dyn TokenIssuer>,

    /// Current confirmation code per user
    pub codes: Arc<ConfirmationCodes>,

    /// Out-of-band delivery of confirmation codes
    pub code_sender: Arc<dyn CodeSender>,

    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// In-memory state with the logging code sender
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: Store::in_memory(),
            tokens: Arc::new(InMemoryTokenIssuer::new()),
            codes: Arc::new(ConfirmationCodes::new()),
            code_sender: Arc::new(LogCodeSender),
            config: Arc::new(config),
        }
    }
}
