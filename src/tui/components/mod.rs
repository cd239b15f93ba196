//! # TUI Components
//!
//! - `TitleBar`: stateless header showing the backend origin and status
//! - `InputBox`: stateful prompt editor, emits `InputEvent`
//! - `AnswerView`: scrollable markdown panel for the latest answer
//!
//! Each component file contains its state types, event types, rendering
//! logic, and tests.

pub mod answer_view;
pub mod input_box;
pub mod title_bar;

pub use answer_view::{AnswerView, AnswerViewState};
pub use input_box::{InputBox, InputEvent};
pub use title_bar::TitleBar;
