pub mod client;
pub mod types;

pub use client::{ApiError, AskBackend, HttpBackend};
pub use types::{AskRequest, AskResponse};
