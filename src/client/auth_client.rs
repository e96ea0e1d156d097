use crate::pb::auth_service_client::AuthServiceClient;
use crate::pb::LoginRequest;
use std::time::Duration;
use tonic::transport::Channel;
use tonic::{Request, Status};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Logs one fixed account in on demand.
#[derive(Clone)]
pub struct AuthClient {
    service: AuthServiceClient<Channel>,
    username: String,
    password: String,
}

impl AuthClient {
    pub fn new(channel: Channel, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            service: AuthServiceClient::new(channel),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns a fresh access token.
    pub async fn login(&self) -> Result<String, Status> {
        let mut request = Request::new(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        });
        request.set_timeout(LOGIN_TIMEOUT);

        let response = self.service.clone().login(request).await?;
        Ok(response.into_inner().access_token)
    }
}
