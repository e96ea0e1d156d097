//! Wire messages for the `catalog` gRPC package.
//!
//! The message structs are declared with `prost` derives directly; the
//! service stubs (`laptop_service_server`, `auth_service_client`, ...) are
//! generated by `build.rs` and pulled in at the bottom of this file.

mod messages;
mod requests;

pub use messages::*;
pub use requests::*;

/// Fully qualified gRPC method paths, as seen by the access layer.
pub mod methods {
    pub const CREATE_LAPTOP: &str = "/catalog.LaptopService/CreateLaptop";
    pub const SEARCH_LAPTOP: &str = "/catalog.LaptopService/SearchLaptop";
    pub const UPLOAD_IMAGE: &str = "/catalog.LaptopService/UploadImage";
    pub const RATE_LAPTOP: &str = "/catalog.LaptopService/RateLaptop";
    pub const LOGIN: &str = "/catalog.AuthService/Login";
}

include!(concat!(env!("OUT_DIR"), "/catalog.LaptopService.rs"));
include!(concat!(env!("OUT_DIR"), "/catalog.AuthService.rs"));
