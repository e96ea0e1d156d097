mod image;
mod laptop;
mod rating;
mod user;

pub use image::*;
pub use laptop::*;
pub use rating::*;
pub use user::*;
