//! Main TUI application state and logic

use crate::history::{HistoryError, TokenHistory};
use crate::ui::panes::{
    render_source_pane, render_status_bar, render_token_pane, SourceScrollState,
    TokenScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between tokens in auto-play mode
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(500);

/// How long the event loop waits for input before redrawing
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Recorded token stream being browsed
    pub history: TokenHistory,

    /// The source the tokens came from
    pub source_code: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub token_scroll: TokenScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a recorded token stream and its source
    pub fn new(history: TokenHistory, source_code: String) -> Self {
        let mut app = App {
            history,
            source_code,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            token_scroll: TokenScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        };
        app.describe_current();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= AUTOPLAY_INTERVAL {
                if self.history.step_forward().is_ok() {
                    self.describe_current();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            &self.history,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_token_pane(
            frame,
            columns[1],
            &self.history,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            &self.history,
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.history.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.describe_current();
                if stepped < n {
                    self.status_message = format!("Stepped forward {} token(s)", stepped);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.history.step_backward();
                self.after_step(result);
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.history.step_forward();
                self.after_step(result);
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.token_scroll.offset = self.token_scroll.offset.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.token_scroll.offset = self.token_scroll.offset.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(AUTOPLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.history.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.history.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn after_step(&mut self, result: Result<(), HistoryError>) {
        match result {
            Ok(()) => self.describe_current(),
            Err(e) => self.status_message = format!("Cannot step: {}", e),
        }
    }

    /// Put the current token (or its diagnostic) in the status line
    fn describe_current(&mut self) {
        let Some(token) = self.history.current() else {
            return;
        };

        self.status_message = if token.is_error() {
            self.history
                .diagnostics()
                .iter()
                .find(|d| d.location == token.location)
                .map(|d| d.to_string())
                .unwrap_or_else(|| format!("Error at {}: {}", token.location, token.text))
        } else {
            format!("{} at {}", token, token.location)
        };
    }
}
