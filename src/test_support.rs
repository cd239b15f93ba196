//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ApiError, AskBackend};
use crate::core::state::App;

/// A backend that returns a canned answer without touching the network.
pub struct CannedBackend(pub &'static str);

#[async_trait]
impl AskBackend for CannedBackend {
    async fn ask(&self, _prompt: &str) -> Result<String, ApiError> {
        Ok(self.0.to_string())
    }
}

/// Creates a test App with a canned backend.
pub fn test_app() -> App {
    App::new(Arc::new(CannedBackend("ok")))
}
