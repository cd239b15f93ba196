//! Markdown → ratatui `Text` conversion for the answer panel.
//!
//! Walks `pulldown_cmark` events and accumulates styled spans, flushing a
//! `Line` at each block boundary. Fenced code blocks with a language tag
//! are highlighted through syntect with one fixed dark theme; untagged and
//! indented blocks fall back to plain code styling.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Fixed syntect theme for fenced code blocks.
const CODE_THEME: &str = "base16-eighties.dark";
/// Left margin for code block content.
const CODE_INDENT: &str = "  ";

/// Convert markdown into styled `Text`. Pure function of its input.
pub fn render(source: &str) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::default();
    for event in Parser::new_ext(source, opts) {
        renderer.event(event);
    }
    renderer.finish()
}

fn plain_code_style() -> Style {
    Style::default().fg(Color::Gray)
}

fn heading_style(level: HeadingLevel) -> Style {
    let base = Style::default().fg(Color::Cyan);
    match level {
        HeadingLevel::H1 => base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => base.add_modifier(Modifier::BOLD),
        _ => base.add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

/// What happens to text inside the current code block.
enum CodeMode {
    Highlighted(HighlightLines<'static>),
    Plain,
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    /// Spans of the line being assembled.
    current: Vec<Span<'static>>,
    /// Inline style stack; nested emphasis composes via `patch`.
    inline: Vec<Style>,
    /// List nesting: None = bullet, Some(n) = next ordered index.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    code: Option<CodeMode>,
    /// URL stashed while the link text renders.
    link: Option<String>,
    /// Insert one blank line before the next block element.
    gap: bool,
}

impl Renderer {
    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.lines)
    }

    // ── Span/line plumbing ──────────────────────────────────────────────

    fn style(&self) -> Style {
        self.inline.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, overlay: Style) {
        self.inline.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.inline.pop();
    }

    /// Close the line being assembled, prefixing block quote bars.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = std::mem::take(&mut self.current);
        for _ in 0..self.quote_depth {
            spans.insert(
                0,
                Span::styled("▌ ", Style::default().fg(Color::DarkGray)),
            );
        }
        self.lines.push(Line::from(spans));
    }

    /// Start a block element: close any open line, emit the pending gap.
    fn open_block(&mut self) {
        self.flush();
        if self.gap {
            self.lines.push(Line::default());
            self.gap = false;
        }
    }

    fn push_code_line(&mut self, mut spans: Vec<Span<'static>>) {
        spans.insert(0, Span::raw(CODE_INDENT));
        self.lines.push(Line::from(spans));
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.current.push(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.open_block();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(32),
                    Style::default().fg(Color::DarkGray),
                )));
                self.gap = true;
            }
            _ => {} // HTML, footnotes, math - skip
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Inside a list item the marker is already on the open
                // line; a paragraph there continues it instead of opening
                // a fresh block.
                if self.current.is_empty() {
                    self.open_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.open_block();
                self.push_style(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.open_block();
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.open_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(token) => token.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                if !lang.is_empty() {
                    self.lines.push(Line::from(Span::styled(
                        format!("── {lang}"),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                self.code = Some(match SYNTAXES.find_syntax_by_token(lang) {
                    Some(syntax) if !lang.is_empty() => {
                        let theme = &THEMES.themes[CODE_THEME];
                        CodeMode::Highlighted(HighlightLines::new(syntax, theme))
                    }
                    _ => CodeMode::Plain,
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.open_block();
                } else {
                    self.flush();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.open_block();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions - skip
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                self.gap = true;
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.pop_style();
                self.gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth -= 1;
                self.pop_style();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap = true;
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link.take() {
                    self.current.push(Span::styled(
                        format!(" <{url}>"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    // ── Content ─────────────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', "    ");

        if self.code.is_some() {
            self.code_text(&text);
            return;
        }

        let style = self.style();
        self.current.push(Span::styled(text, style));
    }

    /// Emit code block content line by line. The block's terminating
    /// newline must not become a trailing blank line, while interior
    /// blank lines survive.
    fn code_text(&mut self, text: &str) {
        let Some(mode) = self.code.take() else {
            return;
        };
        match mode {
            CodeMode::Highlighted(mut hl) => {
                for raw in LinesWithEndings::from(text) {
                    let spans = match hl.highlight_line(raw, &SYNTAXES) {
                        Ok(regions) => regions
                            .into_iter()
                            .filter_map(|(region_style, frag)| {
                                let frag = frag.trim_end_matches('\n');
                                if frag.is_empty() {
                                    return None;
                                }
                                let fg = Color::Rgb(
                                    region_style.foreground.r,
                                    region_style.foreground.g,
                                    region_style.foreground.b,
                                );
                                Some(Span::styled(frag.to_owned(), Style::default().fg(fg)))
                            })
                            .collect(),
                        Err(_) => vec![Span::styled(
                            raw.trim_end_matches('\n').to_owned(),
                            plain_code_style(),
                        )],
                    };
                    self.push_code_line(spans);
                }
                self.code = Some(CodeMode::Highlighted(hl));
            }
            CodeMode::Plain => {
                for raw in text.lines() {
                    let spans = if raw.is_empty() {
                        vec![]
                    } else {
                        vec![Span::styled(raw.to_owned(), plain_code_style())]
                    };
                    self.push_code_line(spans);
                }
                self.code = Some(CodeMode::Plain);
            }
        }
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        self.current.push(Span::styled(
            cow.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
}
