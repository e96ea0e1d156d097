#![allow(dead_code)]

use laptop_catalog::client::{AccessToken, AuthClient, AuthInterceptorClient, LaptopClient};
use laptop_catalog::configuration::SeedUser;
use laptop_catalog::middleware::authorization::default_roles;
use laptop_catalog::services::JwtManager;
use laptop_catalog::startup::{run, AppState};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tonic::transport::{Channel, Endpoint};

pub const SECRET_KEY: &str = "integration-secret";

pub struct TestApp {
    pub address: String,
    pub state: AppState,
    _image_dir: TempDir,
}

fn seed(username: &str, role: &str) -> SeedUser {
    SeedUser {
        username: username.to_string(),
        password: "secret".to_string(),
        role: role.to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_token_duration(Duration::from_secs(15 * 60)).await
}

pub async fn spawn_app_with_token_duration(token_duration: Duration) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let image_dir = tempfile::tempdir().expect("Failed to create image folder");
    let jwt_manager = JwtManager::new(SECRET_KEY, token_duration).unwrap();
    let state = AppState::new(jwt_manager, image_dir.path());
    state
        .seed_users(&[seed("admin1", "admin"), seed("user1", "user")])
        .await
        .expect("Failed to seed users");

    let _ = tokio::spawn(run(listener, state.clone(), default_roles()));

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        state,
        _image_dir: image_dir,
    }
}

impl TestApp {
    pub async fn channel(&self) -> Channel {
        Endpoint::from_shared(self.address.clone())
            .unwrap()
            .connect()
            .await
            .expect("Failed to connect to the server")
    }

    pub async fn auth_client(&self, username: &str, password: &str) -> AuthClient {
        AuthClient::new(self.channel().await, username, password)
    }

    /// A client that sends no access token at all.
    pub async fn anonymous_client(&self) -> LaptopClient {
        LaptopClient::new(
            self.channel().await,
            AuthInterceptorClient::new(AccessToken::default()),
        )
    }

    /// A client holding a token obtained by logging in as `username`.
    pub async fn client_for(&self, username: &str) -> LaptopClient {
        let token = AccessToken::default();
        let access_token = self
            .auth_client(username, "secret")
            .await
            .login()
            .await
            .expect("Failed to log in");
        token.set(access_token);
        LaptopClient::new(self.channel().await, AuthInterceptorClient::new(token))
    }
}
