//! Styling helpers shared by the panes

use crate::syntax::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style for a pane, highlighted when focused
pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Foreground style for a token of the given kind
pub fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Error => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
        k if k.is_type_keyword() => Style::default().fg(DEFAULT_THEME.type_name),
        k if k.is_keyword() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::StringLiteral => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::IntegerLiteral | TokenKind::DoubleLiteral => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::Identifier => Style::default().fg(DEFAULT_THEME.identifier),
        TokenKind::EndOfInput => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default().fg(DEFAULT_THEME.operator),
    }
}

/// Printable form of a token's text for a single-line list row
pub fn display_text(kind: TokenKind, text: &str) -> String {
    match kind {
        TokenKind::StringLiteral => format!("\"{}\"", text.escape_debug()),
        TokenKind::EndOfInput => "(end of input)".to_string(),
        _ => text.escape_debug().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(TokenKind::StringLiteral, "a\nb"), "\"a\\nb\"");
        assert_eq!(display_text(TokenKind::Identifier, "x"), "x");
        assert_eq!(display_text(TokenKind::EndOfInput, ""), "(end of input)");
    }
}
