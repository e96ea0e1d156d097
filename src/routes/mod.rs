pub mod auth;
pub mod laptop;

pub use auth::AuthServer;
pub use laptop::LaptopServer;
