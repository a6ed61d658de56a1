use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use user_api::authentication::service::AuthenticationService;
use user_api::inbound::http::router::create_router;
use user_api::user::models::User;
use user_api::user::models::UserId;
use user_api::user::ports::UserRepository;
use user_api::user::errors::UserError;
use user_api::user::service::UserService;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory; emails are unique and matched exactly.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Drop a user behind the service's back, as an admin or another process would.
    pub fn remove(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().remove(id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());
        let hasher = PasswordHasher::with_params(8, 1, 1).expect("valid argon2 params");
        let authenticator = Arc::new(Authenticator::with_password_hasher(JWT_SECRET, hasher));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));
        let authentication_service = Arc::new(AuthenticationService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
            Duration::hours(24),
        ));

        let router = create_router(user_service, authentication_service);

        // Spawn server in background
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

    /// GET with the token in the `x-access-token` header
    pub fn get_with_token(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header("x-access-token", token)
    }

    /// Register a user through the API and return the response body
    pub async fn register(&self, name: &str, email: &str, password: &str) -> serde_json::Value {
        self.post("/users")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }

    /// Authenticate through the API and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .post("/users/authenticate")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["token"]
            .as_str()
            .expect("login returned no token")
            .to_string()
    }
}
