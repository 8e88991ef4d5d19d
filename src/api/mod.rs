pub mod client;
pub mod error;
pub mod models;

pub use client::CampsiteClient;
pub use error::{ApiError, RatingError};
pub use models::*;
