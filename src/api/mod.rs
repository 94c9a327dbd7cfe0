pub mod client;
pub mod config;
pub mod errors;
pub mod response;

pub use client::{ApiClient, StatusPolicy};
pub use config::{ClientConfig, RuntimeConfig};
pub use errors::ApiError;
pub use response::ApiResponse;
