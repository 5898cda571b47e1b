//! User commands and their key bindings
//!
//! Every user action is a [`Command`] dispatched against the
//! [`App`](crate::app::App), independent of the terminal input layer.

use crossterm::event::{KeyCode, KeyEvent};

use crate::settings::{ColorTarget, Rgb};

/// A named user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the next artwork of the batch, reloading past the end
    NextArtwork,
    /// Show or hide the details panel
    ToggleDetails,
    /// Switch the character color between sampled and fixed
    CycleCharColorMode,
    /// Switch the cell color between sampled and fixed
    CycleCellColorMode,
    SetCharColor(Rgb),
    SetCellColor(Rgb),
    SetBackgroundColor(Rgb),
    /// Open the hex entry prompt for one of the colors
    PromptColor(ColorTarget),
    /// Ask the record cache for a batch again
    Reload,
    ToggleHelp,
    Quit,
}

/// Maps a key press to its command
///
/// # Key Bindings
/// - `n`, `Right`, `Space`: next artwork
/// - `d`: toggle details
/// - `c`: cycle character color mode
/// - `b`: cycle cell color mode
/// - `C`, `B`, `g`: enter a hex character, cell or background color
/// - `r`: reload
/// - `?`: toggle help
/// - `q`, `Esc`: quit
pub fn command_for_key(key_event: KeyEvent) -> Option<Command> {
    let command = match key_event.code {
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char(' ') => Command::NextArtwork,
        KeyCode::Char('d') => Command::ToggleDetails,
        KeyCode::Char('c') => Command::CycleCharColorMode,
        KeyCode::Char('b') => Command::CycleCellColorMode,
        KeyCode::Char('C') => Command::PromptColor(ColorTarget::Char),
        KeyCode::Char('B') => Command::PromptColor(ColorTarget::Cell),
        KeyCode::Char('g') => Command::PromptColor(ColorTarget::Background),
        KeyCode::Char('r') => Command::Reload,
        KeyCode::Char('?') => Command::ToggleHelp,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}
