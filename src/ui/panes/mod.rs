//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and error line
//! - [`console`]: Classified output of the last run
//! - [`examples`]: Selectable gallery of built-in programs
//! - [`transpiled`]: JavaScript export of the current source
//! - [`status`]: Status bar with keybindings and run state
//!
//! Each pane module exports one stateless `render_*` function; scroll
//! offsets live in [`App`](crate::ui::App) and are clamped while rendering.

pub mod console;
pub mod examples;
pub mod source;
pub mod status;
pub mod transpiled;

// Re-export render functions for convenience
pub use console::render_console_pane;
pub use examples::render_examples_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use transpiled::render_transpiled_pane;
