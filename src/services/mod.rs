pub mod jwt_manager;

pub use jwt_manager::{JwtManager, TokenError, UserClaims};
