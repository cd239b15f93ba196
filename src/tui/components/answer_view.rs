//! # AnswerView Component
//!
//! Scrollable panel showing the latest answer as rendered markdown.
//! Shows a hint when no answer has arrived yet, and a placeholder while
//! the first request is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Scroll state, persisted across frames in `TuiState`.
#[derive(Default)]
pub struct AnswerViewState {
    pub scroll_state: ScrollViewState,
}

impl EventHandler for AnswerViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Transient per-frame component wrapping the persistent scroll state.
pub struct AnswerView<'a> {
    pub answer: &'a str,
    pub busy: bool,
    pub state: &'a mut AnswerViewState,
}

impl Component for AnswerView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.answer.is_empty() {
            let hint = if self.busy {
                "Thinking..."
            } else {
                "Ask a coding question below - answers render as markdown."
            };
            let paragraph = Paragraph::new(hint)
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let paragraph = Paragraph::new(markdown::render(self.answer)).wrap(Wrap { trim: false });

        // Reserve one column for the scrollbar.
        let content_width = area.width.saturating_sub(1);
        let content_height = (paragraph.line_count(content_width) as u16).max(1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
