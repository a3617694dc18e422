//! Source code pane rendering with token highlighting
//!
//! This module renders the source being tokenized. Coloring comes from the
//! recorded token stream rather than a separate highlighter, so what the pane
//! shows is exactly what the lexer produced.
//!
//! # Features
//!
//! - Per-token coloring (keywords, literals, identifiers, operators, errors)
//! - Current token highlighted, current line tinted
//! - Scroll state that keeps the current line at a fixed visual row
//! - Line numbering
//!
//! Characters the lexer skipped (whitespace, unknown characters, the tail of a
//! string that spans lines) are drawn unstyled.

use super::utils::{border_style, token_style};
use crate::history::TokenHistory;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to (None until first render)
    pub target_line_row: Option<usize>,
}

/// Build the styled spans for one source line.
fn highlight_line(line_num: usize, line: &str, history: &TokenHistory) -> Vec<Span<'static>> {
    let chars: Vec<char> = line.chars().collect();
    let current = history.position();
    let mut spans = Vec::new();
    let mut cursor = 0;

    for (idx, token) in history.tokens_on_line(line_num) {
        let start = token.location.column.saturating_sub(1).min(chars.len());
        let end = (start + token.width).min(chars.len());
        if start < cursor {
            continue;
        }

        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }

        let mut style = token_style(token.kind);
        if idx == current {
            style = style
                .bg(DEFAULT_THEME.current_token_bg)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(chars[start..end].iter().collect::<String>(), style));
        cursor = end;
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    spans
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    history: &TokenHistory,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = history.current().map_or(0, |t| t.location.line);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Center the current line on first render
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
    }

    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line_num, line, history);
            if is_current {
                for span in &mut content {
                    if span.style.bg.is_none() {
                        span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                    }
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
