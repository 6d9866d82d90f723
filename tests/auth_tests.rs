//! HTTP tests for signup, token issuance and the profile endpoints

mod common;

use common::TestApp;
use serde_json::{Value, json};
use yamdb::config::AppConfig;
use yamdb::core::error::messages;
use yamdb::core::validation::ReservedNameCheck;
use yamdb::prelude::*;

mod signup_tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_sends_code() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/v1/auth/signup")
            .json(&json!({"username": "alice", "email": "alice@example.com"}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            body,
            json!({"username": "alice", "email": "alice@example.com"})
        );
        assert!(app.sender.last_code("alice").is_some());
    }

    #[tokio::test]
    async fn test_signup_me_always_fails() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/v1/auth/signup")
            .json(&json!({"username": "me", "email": "me@example.com"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["details"]["kind"], "reserved_username");
        assert_eq!(app.sender.count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_signup_is_idempotent() {
        let app = TestApp::new();
        let payload = json!({"username": "alice", "email": "alice@example.com"});

        for _ in 0..3 {
            app.server
                .post("/v1/auth/signup")
                .json(&payload)
                .await
                .assert_status_ok();
        }

        assert_eq!(app.state.store.users.list().await.unwrap().len(), 1);
        assert_eq!(app.sender.count(), 3);
    }

    #[tokio::test]
    async fn test_signup_conflicts() {
        let app = TestApp::new();
        app.server
            .post("/v1/auth/signup")
            .json(&json!({"username": "alice", "email": "alice@example.com"}))
            .await
            .assert_status_ok();

        let response = app
            .server
            .post("/v1/auth/signup")
            .json(&json!({"username": "alice", "email": "other@example.com"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["details"]["kind"], "username_taken");

        let response = app
            .server
            .post("/v1/auth/signup")
            .json(&json!({"username": "bob", "email": "alice@example.com"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["details"]["kind"], "email_taken");
    }

    #[tokio::test]
    async fn test_signup_field_rules() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/v1/auth/signup")
            .json(&json!({"username": "bad name", "email": "not-an-email"}))
            .await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        let fields: Vec<&str> = body["details"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["email", "username"]);
    }
}

mod token_tests {
    use super::*;

    async fn signup(app: &TestApp, username: &str) -> String {
        app.server
            .post("/v1/auth/signup")
            .json(&json!({"username": username, "email": format!("{}@example.com", username)}))
            .await
            .assert_status_ok();
        app.sender.last_code(username).unwrap()
    }

    #[tokio::test]
    async fn test_code_exchanged_for_working_token() {
        let app = TestApp::new();
        let code = signup(&app, "alice").await;

        let response = app
            .server
            .post("/v1/auth/token")
            .json(&json!({"username": "alice", "confirmation_code": code}))
            .await;
        response.assert_status_ok();
        let token = response.json::<Value>()["token"]
            .as_str()
            .unwrap()
            .to_string();

        let me: Value = app
            .server
            .get("/v1/users/me")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(me["username"], "alice");
        assert_eq!(me["role"], "user");
    }

    #[tokio::test]
    async fn test_wrong_code_rejected() {
        let app = TestApp::new();
        signup(&app, "alice").await;

        let response = app
            .server
            .post("/v1/auth/token")
            .json(&json!({"username": "alice", "confirmation_code": "nope"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["details"]["kind"],
            "invalid_confirmation_code"
        );
    }

    #[tokio::test]
    async fn test_resignup_replaces_code() {
        let app = TestApp::new();
        let first = signup(&app, "alice").await;
        let second = signup(&app, "alice").await;
        assert_ne!(first, second);

        app.server
            .post("/v1/auth/token")
            .json(&json!({"username": "alice", "confirmation_code": first}))
            .await
            .assert_status_bad_request();
        app.server
            .post("/v1/auth/token")
            .json(&json!({"username": "alice", "confirmation_code": second}))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_user_not_found() {
        let app = TestApp::new();
        app.server
            .post("/v1/auth/token")
            .json(&json!({"username": "ghost", "confirmation_code": "x"}))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_invalid_token_unauthorized() {
        let app = TestApp::new();
        app.server
            .get("/v1/users/me")
            .authorization_bearer("garbage")
            .await
            .assert_status_unauthorized();
        app.server.get("/v1/users/me").await.assert_status_unauthorized();
    }
}

mod profile_tests {
    use super::*;

    #[tokio::test]
    async fn test_me_cannot_change_role() {
        let app = TestApp::new();
        let (_, token) = app.user("alice", Role::User).await;

        let response = app
            .server
            .patch("/v1/users/me")
            .authorization_bearer(&token)
            .json(&json!({"bio": "Film buff", "role": "admin"}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["bio"], "Film buff");
        assert_eq!(body["role"], "user");
    }

    #[tokio::test]
    async fn test_profile_rejects_me_only() {
        let app = TestApp::new();
        let (_, token) = app.user("alice", Role::User).await;

        app.server
            .patch("/v1/users/me")
            .authorization_bearer(&token)
            .json(&json!({"username": "me"}))
            .await
            .assert_status_bad_request();

        app.server
            .patch("/v1/users/me")
            .authorization_bearer(&token)
            .json(&json!({"username": "m"}))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_legacy_substring_check() {
        let mut config = AppConfig::default();
        config.users.reserved_name_check = ReservedNameCheck::LegacySubstring;
        let app = TestApp::with_config(config);
        let (_, token) = app.user("alice", Role::User).await;

        app.server
            .patch("/v1/users/me")
            .authorization_bearer(&token)
            .json(&json!({"username": "e"}))
            .await
            .assert_status_bad_request();
    }
}

mod admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_users_endpoint_is_admin_only() {
        let app = TestApp::new();
        let (_, user) = app.user("alice", Role::User).await;
        let admin = app.admin().await;

        app.server
            .get("/v1/users")
            .authorization_bearer(&user)
            .await
            .assert_status_forbidden();

        let body: Value = app
            .server
            .get("/v1/users")
            .authorization_bearer(&admin)
            .add_query_param("search", "ali")
            .await
            .json();
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["username"], "alice");
    }

    #[tokio::test]
    async fn test_admin_manages_users() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let response = app
            .server
            .post("/v1/users")
            .authorization_bearer(&admin)
            .json(&json!({"username": "critic", "email": "critic@example.com", "role": "moderator"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["role"], "moderator");

        let response = app
            .server
            .post("/v1/users")
            .authorization_bearer(&admin)
            .json(&json!({"username": "critic", "email": "again@example.com"}))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["details"]["kind"], "username_taken");
        assert_eq!(body["message"], messages::USERNAME_TAKEN);

        let response = app
            .server
            .post("/v1/users")
            .authorization_bearer(&admin)
            .json(&json!({"username": "other", "email": "critic@example.com"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["details"]["kind"], "email_taken");

        app.server
            .patch("/v1/users/critic")
            .authorization_bearer(&admin)
            .json(&json!({"role": "admin"}))
            .await
            .assert_status_ok();

        app.server
            .delete("/v1/users/critic")
            .authorization_bearer(&admin)
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        app.server
            .get("/v1/users/critic")
            .authorization_bearer(&admin)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_deleting_user_removes_their_reviews_and_comments() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let solaris = app.title("Solaris").await;
        let stalker = app.title("Stalker").await;
        let (_, alice) = app.user("alice", Role::User).await;
        let (_, bob) = app.user("bob", Role::User).await;

        let review = |title_id: i64, token: &str, text: &str| {
            app.server
                .post(&format!("/v1/titles/{}/reviews", title_id))
                .authorization_bearer(token)
                .json(&json!({"text": text, "score": 7}))
        };
        let alice_review: Value = review(solaris.id, &alice, "Slow").await.json();
        let bob_review: Value = review(stalker.id, &bob, "Deep").await.json();

        // bob on alice's review, alice on bob's review
        app.server
            .post(&format!("/v1/titles/{}/reviews/{}/comments", solaris.id, alice_review["id"]))
            .authorization_bearer(&bob)
            .json(&json!({"text": "Disagree"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        app.server
            .post(&format!("/v1/titles/{}/reviews/{}/comments", stalker.id, bob_review["id"]))
            .authorization_bearer(&alice)
            .json(&json!({"text": "Agreed"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        assert_eq!(app.state.store.comments.list().await.unwrap().len(), 2);

        app.server
            .delete("/v1/users/alice")
            .authorization_bearer(&admin)
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        let reviews = app.state.store.reviews.list().await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, bob_review["id"].as_i64().unwrap());
        assert!(app.state.store.comments.list().await.unwrap().is_empty());

        app.server
            .get("/v1/users/me")
            .authorization_bearer(&alice)
            .await
            .assert_status_unauthorized();
        app.server
            .get("/v1/users/me")
            .authorization_bearer(&bob)
            .await
            .assert_status_ok();
    }
}
