//! # TitleBar Component
//!
//! One-line header: application name, backend origin, and the transient
//! status message ("Thinking..." while a request is outstanding).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

/// Stateless, props-in-struct header component.
pub struct TitleBar {
    pub base_url: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(base_url: String, status_message: String) -> Self {
        Self {
            base_url,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("Sage (backend: {})", self.base_url)
        } else {
            format!("Sage (backend: {}) | {}", self.base_url, self.status_message)
        };
        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_backend_origin() {
        let mut bar = TitleBar::new("http://localhost:8080".to_string(), String::new());
        let text = rendered_text(&mut bar);
        assert!(text.contains("Sage"));
        assert!(text.contains("http://localhost:8080"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn shows_status_when_present() {
        let mut bar = TitleBar::new(
            "http://localhost:8080".to_string(),
            "Thinking...".to_string(),
        );
        let text = rendered_text(&mut bar);
        assert!(text.contains("Thinking..."));
        assert!(text.contains('|'));
    }
}
