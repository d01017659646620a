pub mod auth;
pub mod common;
pub mod courses;
pub mod materials;
pub mod users;

pub use common::{ApiResponse, ErrorResponse};
