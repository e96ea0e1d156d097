use crate::configuration::{SeedUser, Settings};
use crate::db::{DiskImageStore, LaptopStore, RatingStore, UserStore, UserStoreError};
use crate::middleware::authentication::{AccessGuard, Manager};
use crate::middleware::authorization::AccessRoles;
use crate::models::{PasswordError, User};
use crate::pb::auth_service_server::AuthServiceServer;
use crate::pb::laptop_service_server::LaptopServiceServer;
use crate::routes::{laptop::MAX_IMAGE_SIZE, AuthServer, LaptopServer};
use crate::services::{JwtManager, TokenError};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("token manager: {0}")]
    Token(#[from] TokenError),
    #[error("seed user: {0}")]
    Password(#[from] PasswordError),
    #[error("seed user: {0}")]
    User(#[from] UserStoreError),
    #[error("image folder: {0}")]
    Io(#[from] std::io::Error),
    #[error("images.max_size {0} does not fit in 32 bits")]
    MaxImageSize(usize),
}

/// Everything the services share. Each store owns its own lock.
#[derive(Clone)]
pub struct AppState {
    pub laptops: Arc<LaptopStore>,
    pub images: Arc<DiskImageStore>,
    pub ratings: Arc<RatingStore>,
    pub users: Arc<UserStore>,
    pub jwt_manager: Arc<JwtManager>,
    pub max_image_size: usize,
}

impl AppState {
    pub fn new(jwt_manager: JwtManager, image_folder: impl Into<PathBuf>) -> Self {
        Self {
            laptops: Arc::new(LaptopStore::new()),
            images: Arc::new(DiskImageStore::new(image_folder)),
            ratings: Arc::new(RatingStore::new()),
            users: Arc::new(UserStore::new()),
            jwt_manager: Arc::new(jwt_manager),
            max_image_size: MAX_IMAGE_SIZE,
        }
    }

    /// Builds the state described by `settings`: creates the image folder
    /// and registers the seed users.
    pub async fn from_settings(settings: &Settings) -> Result<Self, StartupError> {
        if u32::try_from(settings.images.max_size).is_err() {
            return Err(StartupError::MaxImageSize(settings.images.max_size));
        }

        let jwt_manager = JwtManager::new(
            &settings.auth.secret_key,
            settings.auth.token_duration(),
        )?;
        tokio::fs::create_dir_all(&settings.images.folder).await?;

        let mut state = Self::new(jwt_manager, settings.images.folder.clone());
        state.max_image_size = settings.images.max_size;
        state.seed_users(&settings.seed_users).await?;

        Ok(state)
    }

    pub async fn seed_users(&self, users: &[SeedUser]) -> Result<(), StartupError> {
        for seed in users {
            let user = User::new(&seed.username, &seed.password, &seed.role)?;
            self.users.save(user).await?;
            tracing::info!(username = %seed.username, role = %seed.role, "seed user created");
        }
        Ok(())
    }
}

/// Serves both gRPC services on `listener` until the process is stopped.
pub async fn run(
    listener: TcpListener,
    state: AppState,
    roles: AccessRoles,
) -> Result<(), tonic::transport::Error> {
    run_until(listener, state, roles, std::future::pending()).await
}

/// Like [`run`], but stops accepting calls once `shutdown` completes.
pub async fn run_until(
    listener: TcpListener,
    state: AppState,
    roles: AccessRoles,
    shutdown: impl Future<Output = ()>,
) -> Result<(), tonic::transport::Error> {
    let laptop_server = LaptopServer::new(
        state.laptops.clone(),
        state.images.clone(),
        state.ratings.clone(),
    )
    .with_max_image_size(state.max_image_size);
    let auth_server = AuthServer::new(state.users.clone(), state.jwt_manager.clone());
    let guard = AccessGuard::new(state.jwt_manager.clone(), roles);

    if let Ok(address) = listener.local_addr() {
        tracing::info!("Start server at {:?}", address);
    }

    Server::builder()
        .layer(Manager::new(guard))
        .add_service(AuthServiceServer::new(auth_server))
        .add_service(LaptopServiceServer::new(laptop_server))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
