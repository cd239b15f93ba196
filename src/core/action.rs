//! # Actions
//!
//! Everything that can happen in Sage becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Backend replies? That's `Action::AnswerReceived`.
//!
//! The `update()` function folds an action into the current state and
//! returns the `Effect` the caller must perform. No I/O happens here,
//! which is what makes the idle → busy → idle cycle testable:
//! `assert_eq!(update(state, action), expected_effect)`.

use log::{info, warn};

use crate::core::state::App;

/// Fixed user-visible text shown when the request cycle fails.
///
/// Every failure mode - connection refused, timeout, non-2xx status,
/// malformed body - collapses to this one string. The detail goes to the
/// log file only.
pub const CONNECT_ERROR: &str = "Error: could not reach the assistant backend.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User triggered a request with the given prompt text.
    Submit(String),
    /// Backend answered.
    AnswerReceived(String),
    /// The request failed; the payload is log detail, never shown to the user.
    RequestFailed(String),
    Quit,
}

/// Side effect the caller must perform after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn the HTTP request for `App::prompt`.
    SpawnRequest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                // Whitespace-only input never reaches the network.
                return Effect::None;
            }
            if app.is_loading {
                // The trigger is disabled while a request is outstanding;
                // drop a duplicate that slipped past the UI.
                return Effect::None;
            }
            info!("Submitting prompt ({} bytes)", text.len());
            app.prompt = text;
            app.is_loading = true;
            app.status_message = String::from("Thinking...");
            Effect::SpawnRequest
        }
        Action::AnswerReceived(answer) => {
            app.answer = answer;
            app.status_message = String::new();
            // Busy flag resets as the final step of the cycle.
            app.is_loading = false;
            Effect::None
        }
        Action::RequestFailed(detail) => {
            warn!("Request failed: {detail}");
            app.answer = String::from(CONNECT_ERROR);
            app.status_message = String::new();
            app.is_loading = false;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn empty_submit_is_a_noop() {
        let mut app = test_app();
        app.answer = "previous answer".to_string();

        let effect = update(&mut app, Action::Submit(String::new()));

        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.answer, "previous answer");
    }

    #[test]
    fn whitespace_only_submit_is_a_noop() {
        let mut app = test_app();
        app.answer = "previous answer".to_string();

        let effect = update(&mut app, Action::Submit("  \n\t ".to_string()));

        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.answer, "previous answer");
    }

    #[test]
    fn submit_sets_busy_and_spawns_the_request() {
        let mut app = test_app();

        let effect = update(&mut app, Action::Submit("What is Rust?".to_string()));

        assert_eq!(effect, Effect::SpawnRequest);
        assert!(app.is_loading);
        assert_eq!(app.prompt, "What is Rust?");
        assert_eq!(app.status_message, "Thinking...");
    }

    #[test]
    fn submit_while_busy_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));

        let effect = update(&mut app, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.prompt, "first");
    }

    #[test]
    fn answer_sets_output_and_clears_busy() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));

        let effect = update(&mut app, Action::AnswerReceived("hello".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.answer, "hello");
        assert!(!app.is_loading);
    }

    #[test]
    fn failure_sets_the_fixed_error_text_and_clears_busy() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));

        let effect = update(
            &mut app,
            Action::RequestFailed("connection refused".to_string()),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.answer, CONNECT_ERROR);
        assert!(!app.is_loading);
    }

    #[test]
    fn busy_flag_is_true_only_between_trigger_and_resolution() {
        let mut app = test_app();
        assert!(!app.is_loading, "idle before the first trigger");

        update(&mut app, Action::Submit("q1".to_string()));
        assert!(app.is_loading, "busy after trigger");
        update(&mut app, Action::AnswerReceived("a1".to_string()));
        assert!(!app.is_loading, "idle after success");

        update(&mut app, Action::Submit("q2".to_string()));
        assert!(app.is_loading, "busy again on re-trigger");
        update(&mut app, Action::RequestFailed("boom".to_string()));
        assert!(!app.is_loading, "idle after failure");
    }

    #[test]
    fn quit_requests_loop_exit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
