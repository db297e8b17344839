//! Test helpers for serviflex-service integration tests.
//!
//! Every test spawns the real router on a random port backed by a fresh
//! in-memory repository.

#![allow(dead_code)]

use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use serviflex_service::config::ServiflexConfig;
use serviflex_service::services::{InMemoryRepository, MarketplaceRepository};
use serviflex_service::startup::Application;
use std::sync::Arc;
use uuid::Uuid;

pub const PASSWORD: &str = "s3cret-pass";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub repo: Arc<dyn MarketplaceRepository>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("STORAGE_BACKEND", "memory");
        let mut config = ServiflexConfig::load().expect("Failed to load configuration");
        config.common.port = 0;
        config.seed_demo_data = false;

        let repo: Arc<dyn MarketplaceRepository> = Arc::new(InMemoryRepository::new());
        let app = Application::build_with_repository(config, repo.clone())
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(app.run_until_stopped());

        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
            client: reqwest::Client::new(),
            repo,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers an account and returns its id.
    pub async fn register(&self, kind: &str, name: &str) -> String {
        let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());
        let response = self
            .post(
                "/api/register",
                &json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                    "kind": kind,
                }),
            )
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["user"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_procedure(&self, professional_id: &str, name: &str, price: f64, minutes: u32) -> String {
        let response = self
            .post(
                "/api/procedures",
                &json!({
                    "professional_id": professional_id,
                    "name": name,
                    "description": "",
                    "price": price,
                    "duration_minutes": minutes,
                }),
            )
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_working_hours(&self, professional_id: &str, weekdays: &[&str], start: &str, end: &str) -> Value {
        let response = self
            .post(
                "/api/working-hours",
                &json!({
                    "professional_id": professional_id,
                    "weekdays": weekdays,
                    "start_time": start,
                    "end_time": end,
                }),
            )
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn create_establishment(&self, name: &str) -> String {
        let response = self
            .post(
                "/api/establishments",
                &json!({
                    "name": name,
                    "description": "Hair and nails",
                    "photo_url": "https://images.example.com/est.jpg",
                    "category": "Beauty",
                    "location": { "street": "Rua A, 1", "city": "Campinas", "state": "SP" }
                }),
            )
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn book(&self, client_id: &str, professional_id: &str, establishment_id: &str, procedure: &str, date_time: &str) -> Response {
        self.post(
            "/api/appointments",
            &json!({
                "client_id": client_id,
                "professional_id": professional_id,
                "establishment_id": establishment_id,
                "procedure": procedure,
                "date_time": date_time,
            }),
        )
        .await
    }
}
