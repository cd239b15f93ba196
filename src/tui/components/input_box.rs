//! # InputBox Component
//!
//! The prompt editor. Captures text, handles editing (cursor movement,
//! backspace/delete, bracketed paste, Ctrl+J newlines) and submission.
//! While the app is waiting for an answer the trigger is disabled: Enter
//! is refused and the buffer is kept.
//!
//! The buffer and cursor are internal state; `busy` is a prop from the
//! application state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Left + right border columns.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom border rows.
const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before internal scrolling kicks in.
const MAX_VISIBLE_LINES: u16 = 5;

/// High-level events emitted by the InputBox.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter on a non-blank buffer while idle).
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text being typed (internal state).
    pub buffer: String,
    /// Request outstanding - trigger disabled (prop).
    pub busy: bool,
    /// Byte offset of the cursor within `buffer`.
    cursor: usize,
    /// First visible wrapped line.
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            busy: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Height required for the current buffer, clamped so the box never
    /// grows past `MAX_VISIBLE_LINES` of content.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(content_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Wrapped (row, column) of the cursor for the given outer width.
    fn cursor_row_col(&self, content_width: u16) -> (u16, u16) {
        let width = inner_width(content_width);
        if width == 0 {
            return (0, 0);
        }
        let prefix = &self.buffer[..self.cursor];
        // textwrap does not emit the empty line a trailing newline opens
        if prefix.ends_with('\n') {
            let rows = wrap_line_count(prefix, width);
            return (rows.saturating_sub(1), 0);
        }
        let lines = textwrap::wrap(prefix, wrap_options(width));
        let row = lines.len().saturating_sub(1) as u16;
        let col = lines.last().map(|l| l.width() as u16).unwrap_or(0);
        (row, col)
    }

    /// Keep the cursor's wrapped row inside the visible window.
    fn update_scroll(&mut self, content_width: u16) {
        let (row, _) = self.cursor_row_col(content_width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Visible slice of the wrapped buffer.
    fn visible_text(&self, content_width: u16) -> String {
        if self.scroll_offset == 0 {
            return self.buffer.clone();
        }
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }
        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = self.scroll_offset as usize;
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        if start >= end {
            return String::new();
        }
        lines[start..end].join("\n")
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.update_scroll(area.width);

        let (title, style) = if self.busy {
            (
                "Prompt (waiting for answer)",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                "Prompt - Enter sends, Ctrl+J newline",
                Style::default().fg(Color::Green),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(style);
        let paragraph = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(style)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);

        if !self.busy {
            let (row, col) = self.cursor_row_col(area.width);
            let visible_row = row.saturating_sub(self.scroll_offset);
            let x = area.x + 1 + col.min(inner_width(area.width));
            let y = area.y + 1 + visible_row.min(MAX_VISIBLE_LINES.saturating_sub(1));
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if self.busy || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

// ── Wrapping helpers ────────────────────────────────────────────────────

fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);
    // textwrap doesn't represent a trailing newline as an empty line
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }
    count
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn typing_appends_at_the_cursor() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::InputChar('h'));
        input.handle_event(&TuiEvent::InputChar('i'));
        assert_eq!(input.buffer, "hi");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(input.buffer, "hai");
    }

    #[test]
    fn backspace_respects_char_boundaries() {
        let mut input = InputBox::new();
        for c in "fé".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "f");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn paste_preserves_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("fn main() {\n}\n".to_string()));
        assert_eq!(input.buffer, "fn main() {\n}\n");
    }

    #[test]
    fn submit_takes_the_buffer() {
        let mut input = InputBox::new();
        input.buffer = "explain borrowck".to_string();
        input.cursor = input.buffer.len();

        let event = input.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(InputEvent::Submit("explain borrowck".to_string()))
        );
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn blank_buffer_never_submits() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);

        input.buffer = "  \n\t ".to_string();
        input.cursor = input.buffer.len();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "  \n\t ", "blank buffer is kept, not taken");
    }

    #[test]
    fn submit_is_refused_while_busy() {
        let mut input = InputBox::new();
        input.buffer = "queued question".to_string();
        input.cursor = input.buffer.len();
        input.busy = true;

        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "queued question", "buffer survives the refusal");
    }

    #[test]
    fn home_and_end_move_within_the_current_line() {
        let mut input = InputBox::new();
        input.buffer = "first\nsecond".to_string();
        input.cursor = input.buffer.len();

        input.handle_event(&TuiEvent::CursorHome);
        assert_eq!(input.cursor, 6, "start of second line");
        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.cursor, input.buffer.len());
    }

    #[test]
    fn height_grows_with_content_then_clamps() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);

        input.buffer = "a\nb\nc\nd\ne\nf\ng".to_string();
        assert_eq!(
            input.calculate_height(40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn render_shows_busy_title() {
        let backend = TestBackend::new(50, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new();
        input.busy = true;

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("waiting for answer"));
    }
}
