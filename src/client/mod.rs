//! gRPC client side: login, token attachment and periodic token refresh.

mod auth_client;
mod interceptor;
mod laptop_client;

pub use auth_client::AuthClient;
pub use interceptor::{AccessToken, AuthInterceptorClient, TokenRefresher};
pub use laptop_client::{ClientError, LaptopClient};
