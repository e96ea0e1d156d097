use super::AuthServer;
use crate::pb::{LoginRequest, LoginResponse};
use tonic::Status;

impl AuthServer {
    /// Unknown users and wrong passwords get the same `NotFound` answer.
    #[tracing::instrument(name = "Login.", skip(self, request), fields(username = %request.username))]
    pub async fn login_user(&self, request: LoginRequest) -> Result<LoginResponse, Status> {
        let user = self.users.find(&request.username).await;

        let user = match user {
            Some(user) if user.is_correct_password(&request.password) => user,
            _ => {
                tracing::info!("login rejected");
                return Err(Status::not_found("invalid username or password"));
            }
        };

        let access_token = self
            .jwt_manager
            .issue(&user.username, &user.role)
            .map_err(|err| {
                tracing::error!("cannot generate token: {}", err);
                Status::internal(format!("cannot generate token: {err}"))
            })?;
        tracing::info!(role = %user.role, "user logged in");

        Ok(LoginResponse { access_token })
    }
}
