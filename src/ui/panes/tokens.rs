//! Token list pane rendering

use super::utils::{border_style, display_text, token_style};
use crate::history::TokenHistory;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the token pane
#[derive(Debug, Default)]
pub struct TokenScrollState {
    pub offset: usize,
    /// Cursor position the offset was last adjusted for. Manual scrolling
    /// sticks until the cursor moves again.
    pub followed: Option<usize>,
}

impl TokenScrollState {
    /// Bring `position` into view if it moved since the last render.
    fn follow(&mut self, position: usize, visible_height: usize) {
        if self.followed == Some(position) {
            return;
        }
        self.followed = Some(position);

        if position < self.offset {
            self.offset = position;
        } else if position >= self.offset + visible_height {
            self.offset = position + 1 - visible_height;
        }
    }
}

/// Render the token list pane
pub fn render_token_pane(
    frame: &mut Frame,
    area: Rect,
    history: &TokenHistory,
    is_focused: bool,
    scroll_state: &mut TokenScrollState,
) {
    let title = match history.error_count() {
        0 => format!(" Tokens ({}) ", history.len()),
        n => format!(" Tokens ({}, {} errors) ", history.len(), n),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let total_items = history.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let current = history.position();

    scroll_state.follow(current, visible_height);
    if total_items > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_items - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let dim = Style::default().fg(DEFAULT_THEME.comment);

    let items: Vec<ListItem> = history
        .tokens()
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let is_current = idx == current;
            let marker = if is_current { "▶" } else { " " };

            let line = Line::from(vec![
                Span::styled(format!("{} {:>5} ", marker, idx), dim),
                Span::styled(format!("{:>8} ", token.location.to_string()), dim),
                Span::styled(format!("{:<10} ", token.kind.name()), token_style(token.kind)),
                Span::styled(
                    display_text(token.kind, &token.text),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ]);

            let row_style = if is_current {
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(line).style(row_style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_scrolls_only_when_cursor_moves() {
        let mut state = TokenScrollState::default();

        state.follow(12, 10);
        assert_eq!(state.offset, 3);

        // manual scroll is kept while the cursor stays put
        state.offset = 0;
        state.follow(12, 10);
        assert_eq!(state.offset, 0);

        state.follow(2, 10);
        assert_eq!(state.offset, 0);

        state.offset = 8;
        state.follow(3, 10);
        assert_eq!(state.offset, 3);
    }
}
