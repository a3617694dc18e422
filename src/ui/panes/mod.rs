//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text colored by the recorded tokens, current token highlighted
//! - [`tokens`]: The token stream as a list with locations and kinds
//! - [`status`]: Status bar with keybindings and cursor state
//! - `utils`: Shared border and token styles
//!
//! Each pane module exports a `render_*` function; panes that scroll also
//! export their scroll state type.

mod utils;

pub mod source;
pub mod status;
pub mod tokens;

pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::{render_token_pane, TokenScrollState};
