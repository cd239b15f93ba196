//! # Application State
//!
//! Core business state for Sage. Domain logic only - no TUI types here;
//! presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn AskBackend>   // how prompts get answered
//! ├── prompt: String                 // text captured at the last submit
//! ├── answer: String                 // latest answer (markdown) or error text
//! ├── status_message: String         // title bar text
//! └── is_loading: bool               // waiting for the backend
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::AskBackend;

pub struct App {
    pub backend: Arc<dyn AskBackend>,
    /// Prompt text captured at the last submit; this is what goes on the wire.
    pub prompt: String,
    /// Latest answer as returned by the backend, or the fixed error text.
    pub answer: String,
    pub status_message: String,
    pub is_loading: bool,
}

impl App {
    pub fn new(backend: Arc<dyn AskBackend>) -> Self {
        Self {
            backend,
            prompt: String::new(),
            answer: String::new(),
            status_message: String::from("Welcome to Sage!"),
            is_loading: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn new_app_is_idle_and_empty() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Sage!");
        assert!(!app.is_loading);
        assert!(app.answer.is_empty());
        assert!(app.prompt.is_empty());
    }
}
