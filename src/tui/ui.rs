use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AnswerView, TitleBar};

/// Frame layout: one-line title bar, answer panel, prompt box whose
/// height tracks its content.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, answer_area, input_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(tui.base_url.clone(), app.status_message.clone());
    title_bar.render(frame, title_area);

    let mut answer_view = AnswerView {
        answer: &app.answer,
        busy: app.is_loading,
        state: &mut tui.answer_view,
    };
    answer_view.render(frame, answer_area);

    tui.input_box.busy = app.is_loading;
    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new("http://localhost:8080".to_string());
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn draws_all_three_areas() {
        let text = draw(&test_app());
        assert!(text.contains("Sage"), "title bar");
        assert!(text.contains("Ask a coding question"), "empty answer hint");
        assert!(text.contains("Prompt"), "input box");
    }

    #[test]
    fn busy_app_shows_thinking_state() {
        let mut app = test_app();
        app.is_loading = true;
        app.status_message = String::from("Thinking...");

        let text = draw(&app);
        assert!(text.contains("Thinking..."));
        assert!(text.contains("waiting for answer"));
    }

    #[test]
    fn answer_text_reaches_the_screen() {
        let mut app = test_app();
        app.answer = "borrowing rules".to_string();

        let text = draw(&app);
        assert!(text.contains("borrowing rules"));
    }
}
