#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::Authenticator;
use auth::HashParams;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Argon2 parameters cheap enough for tests
pub fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(
        Authenticator::with_settings(
            JWT_SECRET,
            chrono::Duration::hours(24),
            HashParams {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
        )
        .expect("Failed to build authenticator"),
    )
}

/// Account service backed by an in-memory store
pub struct TestService {
    pub repository: Arc<InMemoryAccountRepository>,
    pub authenticator: Arc<Authenticator>,
    pub service: AccountService<InMemoryAccountRepository>,
}

impl TestService {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let authenticator = test_authenticator();
        let service = AccountService::new(Arc::clone(&repository), Arc::clone(&authenticator));

        Self {
            repository,
            authenticator,
            service,
        }
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryAccountRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with the default admin bootstrapped
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let authenticator = test_authenticator();
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        account_service
            .ensure_default_admin()
            .await
            .expect("Failed to create default admin");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(account_service, Arc::clone(&authenticator));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Log in and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK, "login failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Create an account through the admin endpoint
    pub async fn create_account(&self, username: &str, password: &str, is_admin: bool) -> i64 {
        let admin_token = self.login("admin", "admin").await;

        let response = self
            .post("/api/users")
            .bearer_auth(&admin_token)
            .json(&json!({
                "username": username,
                "password": password,
                "is_admin": is_admin
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing id")
    }
}
