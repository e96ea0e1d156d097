mod image;
pub mod rating;
pub mod user;

pub use image::*;
pub use rating::*;
pub use user::*;

pub use crate::pb::Laptop;
