//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::{Arc, Mutex};
use yamdb::entities::Taxon;
use yamdb::prelude::*;

/// Code sender that keeps every code it was asked to deliver
#[derive(Clone, Default)]
pub struct CapturingSender {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl CapturingSender {
    /// The most recent code sent to `username`
    pub fn last_code(&self, username: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _, _)| name == username)
            .map(|(_, _, code)| code.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeSender for CapturingSender {
    async fn send(&self, username: &str, email: &str, code: &str) -> ApiResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((username.to_string(), email.to_string(), code.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub sender: CapturingSender,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let sender = CapturingSender::default();
        let (app, state) = ServerBuilder::new()
            .with_config(config)
            .with_code_sender(sender.clone())
            .register_defaults()
            .build_with_state()
            .expect("Failed to build app");
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            state,
            sender,
        }
    }

    /// Create a user directly in the store and issue a token for them
    pub async fn user(&self, username: &str, role: Role) -> (User, String) {
        let user = self
            .state
            .store
            .users
            .create(User::new(username, format!("{}@example.com", username)).with_role(role))
            .await
            .expect("Failed to create user");
        let token = self
            .state
            .tokens
            .issue(user.id)
            .await
            .expect("Failed to issue token");
        (user, token)
    }

    pub async fn admin(&self) -> String {
        self.user("admin", Role::Admin).await.1
    }

    pub async fn category(&self, name: &str, slug: &str) -> Category {
        self.state
            .store
            .categories
            .create(Category::new(name.into(), slug.into()))
            .await
            .expect("Failed to create category")
    }

    pub async fn genre(&self, name: &str, slug: &str) -> Genre {
        self.state
            .store
            .genres
            .create(Genre::new(name.into(), slug.into()))
            .await
            .expect("Failed to create genre")
    }

    pub async fn title(&self, name: &str) -> Title {
        self.state
            .store
            .titles
            .create(Title {
                id: 0,
                name: name.to_string(),
                year: 2000,
                description: None,
                category_id: None,
                genre_ids: vec![],
            })
            .await
            .expect("Failed to create title")
    }
}
