use super::AuthClient;
use crate::middleware::authentication::AUTHORIZATION;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// The current access token, shared between the refresher and every
/// intercepted call.
#[derive(Clone, Default)]
pub struct AccessToken(Arc<RwLock<String>>);

impl AccessToken {
    pub fn get(&self) -> String {
        match self.0.read() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, token: String) {
        match self.0.write() {
            Ok(mut current) => *current = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}

/// Attaches the current token to outgoing calls under `authorization`.
/// Nothing is attached while no token has been obtained yet.
#[derive(Clone)]
pub struct AuthInterceptorClient {
    token: AccessToken,
}

impl AuthInterceptorClient {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

impl Interceptor for AuthInterceptorClient {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let token = self.token.get();
        if token.is_empty() {
            return Ok(request);
        }

        let value: MetadataValue<Ascii> = token
            .parse()
            .map_err(|_| Status::unauthenticated("access token is not valid metadata"))?;
        request.metadata_mut().insert(AUTHORIZATION, value);
        Ok(request)
    }
}

/// Background task that logs in again every `refresh_every` and stores the
/// new token. A failed login ends the task; the last token stays in place
/// until it expires. Dropping the refresher stops the task.
pub struct TokenRefresher {
    handle: JoinHandle<()>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TokenRefresher {
    /// Logs in once up front, so a wrong password fails here rather than
    /// in the background.
    pub async fn start(
        auth: AuthClient,
        token: AccessToken,
        refresh_every: Duration,
    ) -> Result<Self, Status> {
        token.set(auth.login().await?);

        let (shutdown, mut stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh_every);
            // the first tick fires immediately and we've just logged in
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = &mut stopped => {
                        tracing::debug!("token refresher stopped");
                        return;
                    }
                    _ = ticker.tick() => {
                        match auth.login().await {
                            Ok(fresh) => {
                                token.set(fresh);
                                tracing::debug!(username = %auth.username(), "access token refreshed");
                            }
                            Err(status) => {
                                tracing::warn!("cannot refresh access token: {}", status.message());
                                return;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            handle,
            shutdown: Some(shutdown),
        })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = (&mut self.handle).await;
    }
}

impl Drop for TokenRefresher {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
