//! UI rendering module for artgrid
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod artwork_view;
pub mod color_prompt;
pub mod help_overlay;
pub mod listing;

pub use artwork_view::render as render_artwork_view;
pub use color_prompt::render as render_color_prompt;
pub use help_overlay::render as render_help_overlay;
pub use listing::format_listing;
