//! HTTP tests for titles, categories and genres

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{Value, json};
use yamdb::prelude::*;

mod taxonomy_tests {
    use super::*;

    #[tokio::test]
    async fn test_category_crud_by_slug() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let response = app
            .server
            .post("/v1/categories")
            .authorization_bearer(&admin)
            .json(&json!({"name": "Films", "slug": "films"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>(), json!({"name": "Films", "slug": "films"}));

        let body: Value = app.server.get("/v1/categories/films").await.json();
        assert_eq!(body["name"], "Films");
        assert!(body.get("id").is_none());

        app.server
            .patch("/v1/categories/films")
            .authorization_bearer(&admin)
            .json(&json!({"name": "Movies"}))
            .await
            .assert_status_ok();

        app.server
            .delete("/v1/categories/films")
            .authorization_bearer(&admin)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.server
            .get("/v1/categories/films")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let app = TestApp::new();
        let admin = app.admin().await;
        app.genre("Drama", "drama").await;

        let response = app
            .server
            .post("/v1/genres")
            .authorization_bearer(&admin)
            .json(&json!({"name": "Drama again", "slug": "drama"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["details"]["kind"], "unique");
    }

    #[tokio::test]
    async fn test_writes_are_admin_only() {
        let app = TestApp::new();
        let (_, user) = app.user("alice", Role::User).await;

        app.server
            .post("/v1/genres")
            .json(&json!({"name": "Drama", "slug": "drama"}))
            .await
            .assert_status_unauthorized();
        app.server
            .post("/v1/genres")
            .authorization_bearer(&user)
            .json(&json!({"name": "Drama", "slug": "drama"}))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_search() {
        let app = TestApp::new();
        app.genre("Drama", "drama").await;
        app.genre("Comedy", "comedy").await;

        let body: Value = app
            .server
            .get("/v1/genres")
            .add_query_param("search", "dra")
            .await
            .json();
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["slug"], "drama");
    }
}

mod title_crud_tests {
    use super::*;

    async fn seeded() -> (TestApp, String) {
        let app = TestApp::new();
        let admin = app.admin().await;
        app.category("Films", "films").await;
        app.genre("Drama", "drama").await;
        app.genre("Comedy", "comedy").await;
        (app, admin)
    }

    #[tokio::test]
    async fn test_create_returns_read_representation() {
        let (app, admin) = seeded().await;

        let response = app
            .server
            .post("/v1/titles")
            .authorization_bearer(&admin)
            .json(&json!({
                "name": "Brazil",
                "year": 1985,
                "category": "films",
                "genre": ["drama", "comedy"]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["category"], json!({"name": "Films", "slug": "films"}));
        assert_eq!(
            body["genre"],
            json!([
                {"name": "Drama", "slug": "drama"},
                {"name": "Comedy", "slug": "comedy"}
            ])
        );
        assert_eq!(body["rating"], Value::Null);
        assert!(body["id"].is_i64());
    }

    #[tokio::test]
    async fn test_unknown_slug_names_the_slug() {
        let (app, admin) = seeded().await;

        let response = app
            .server
            .post("/v1/titles")
            .authorization_bearer(&admin)
            .json(&json!({
                "name": "Brazil",
                "year": 1985,
                "category": "books",
                "genre": []
            }))
            .await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["details"]["kind"], "unknown_slug");
        assert_eq!(body["message"], "Объект с slug=books не существует.");
    }

    #[tokio::test]
    async fn test_filters() {
        let (app, admin) = seeded().await;
        for (name, year, genre) in [("Brazil", 1985, "comedy"), ("Stalker", 1979, "drama")] {
            app.server
                .post("/v1/titles")
                .authorization_bearer(&admin)
                .json(&json!({"name": name, "year": year, "category": "films", "genre": [genre]}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let by_genre: Value = app
            .server
            .get("/v1/titles")
            .add_query_param("genre", "drama")
            .await
            .json();
        assert_eq!(by_genre["pagination"]["total"], 1);
        assert_eq!(by_genre["data"][0]["name"], "Stalker");

        let by_year: Value = app
            .server
            .get("/v1/titles")
            .add_query_param("year", 1985)
            .await
            .json();
        assert_eq!(by_year["data"][0]["name"], "Brazil");

        let by_name: Value = app
            .server
            .get("/v1/titles")
            .add_query_param("name", "stalk")
            .await
            .json();
        assert_eq!(by_name["pagination"]["total"], 1);

        let unknown: Value = app
            .server
            .get("/v1/titles")
            .add_query_param("category", "books")
            .await
            .json();
        assert_eq!(unknown["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let (app, _) = seeded().await;
        app.title("Brazil").await;

        let response = app
            .server
            .get("/v1/titles")
            .add_query_param("page", usize::MAX)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["pagination"]["has_next"], false);
    }

    #[tokio::test]
    async fn test_deleting_genre_detaches_titles() {
        let (app, admin) = seeded().await;
        let created: Value = app
            .server
            .post("/v1/titles")
            .authorization_bearer(&admin)
            .json(&json!({"name": "Brazil", "year": 1985, "category": "films", "genre": ["drama", "comedy"]}))
            .await
            .json();

        app.server
            .delete("/v1/genres/drama")
            .authorization_bearer(&admin)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.server
            .delete("/v1/categories/films")
            .authorization_bearer(&admin)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body: Value = app
            .server
            .get(&format!("/v1/titles/{}", created["id"]))
            .await
            .json();
        assert_eq!(body["genre"], json!([{"name": "Comedy", "slug": "comedy"}]));
        assert_eq!(body["category"], Value::Null);
    }

    #[tokio::test]
    async fn test_patch_and_delete_cascade() {
        let (app, admin) = seeded().await;
        let created: Value = app
            .server
            .post("/v1/titles")
            .authorization_bearer(&admin)
            .json(&json!({"name": "Brazil", "year": 1985, "category": "films", "genre": []}))
            .await
            .json();
        let url = format!("/v1/titles/{}", created["id"]);

        let response = app
            .server
            .patch(&url)
            .authorization_bearer(&admin)
            .json(&json!({"description": "Dystopia", "genre": ["drama"]}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["description"], "Dystopia");
        assert_eq!(body["genre"][0]["slug"], "drama");
        assert_eq!(body["name"], "Brazil");

        let (_, alice) = app.user("alice", Role::User).await;
        app.server
            .post(&format!("{}/reviews", url))
            .authorization_bearer(&alice)
            .json(&json!({"text": "Great", "score": 10}))
            .await
            .assert_status(StatusCode::CREATED);

        app.server
            .delete(&url)
            .authorization_bearer(&admin)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert!(app.state.store.reviews.list().await.unwrap().is_empty());
        app.server.get(&url).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_future_year_rejected() {
        let (app, admin) = seeded().await;
        app.server
            .post("/v1/titles")
            .authorization_bearer(&admin)
            .json(&json!({"name": "Later", "year": 3000, "category": "films", "genre": []}))
            .await
            .assert_status_bad_request();
    }
}
