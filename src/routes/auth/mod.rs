mod login;

use crate::db::UserStore;
use crate::pb::auth_service_server::AuthService;
use crate::pb::{LoginRequest, LoginResponse};
use crate::services::JwtManager;
use std::sync::Arc;
use tonic::{Request, Response, Status};

/// gRPC `AuthService`: exchanges a username and password for an access token.
#[derive(Clone)]
pub struct AuthServer {
    users: Arc<UserStore>,
    jwt_manager: Arc<JwtManager>,
}

impl AuthServer {
    pub fn new(users: Arc<UserStore>, jwt_manager: Arc<JwtManager>) -> Self {
        Self { users, jwt_manager }
    }
}

#[tonic::async_trait]
impl AuthService for AuthServer {
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = self.login_user(request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
