mod getheader;
mod manager;
mod manager_middleware;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;

use crate::middleware::authorization::AccessRoles;
use crate::services::{JwtManager, UserClaims};
use std::sync::Arc;
use tonic::{metadata::MetadataMap, Status};

/// What the access check needs to know about an inbound call, whatever
/// its streaming shape: the full method path and the request metadata.
#[derive(Debug)]
pub struct CallInfo {
    pub method: String,
    pub metadata: MetadataMap,
}

impl CallInfo {
    pub fn new(method: impl Into<String>, metadata: MetadataMap) -> Self {
        Self {
            method: method.into(),
            metadata,
        }
    }

    pub fn from_http<B>(req: &http::Request<B>) -> Self {
        Self::new(
            req.uri().path(),
            MetadataMap::from_headers(req.headers().clone()),
        )
    }
}

/// Authenticates the caller's token and checks its role against the table.
pub struct AccessGuard {
    jwt_manager: Arc<JwtManager>,
    roles: AccessRoles,
}

impl AccessGuard {
    pub fn new(jwt_manager: Arc<JwtManager>, roles: AccessRoles) -> Self {
        Self { jwt_manager, roles }
    }

    /// `Ok(None)` for public methods, `Ok(Some(claims))` for an authorized
    /// caller of a gated method.
    pub fn authorize(&self, call: &CallInfo) -> Result<Option<UserClaims>, Status> {
        let allowed = match self.roles.allowed(&call.method) {
            Some(allowed) => allowed,
            None => return Ok(None),
        };

        let token = get_token(&call.metadata)
            .map_err(Status::unauthenticated)?
            .ok_or_else(|| Status::unauthenticated("authorization token is not provided"))?;

        let claims = self.jwt_manager.verify(&token).map_err(|err| {
            tracing::debug!("token verification failed: {}", err);
            Status::unauthenticated(format!("access token is invalid: {err}"))
        })?;

        if !allowed.contains(&claims.role) {
            return Err(Status::permission_denied(format!(
                "role {} is not allowed to access {}",
                claims.role, call.method
            )));
        }

        tracing::debug!(username = %claims.sub, role = %claims.role, "caller authorized");
        Ok(Some(claims))
    }
}
