//! Application state management for artgrid
//!
//! This module contains the controller that owns the current artwork batch,
//! the position within it and the display settings. Keyboard input is mapped
//! to [`Command`]s, which are dispatched here.

use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::RecordCache;
use crate::cli::StartupConfig;
use crate::command::{command_for_key, Command};
use crate::data::{ArticClient, Artwork};
use crate::settings::{ColorTarget, Rgb, Settings};
use crate::store::{FileStore, KeyValueStore, MemoryStore};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for a batch of artworks
    Loading,
    /// Showing the current artwork
    Viewing,
    /// The last load failed; carries the reason shown to the user
    Failed(String),
}

/// Longest prompt input, `#rrggbb`
const PROMPT_MAX_LEN: usize = 7;

/// Hex color entry in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPrompt {
    /// Color being edited
    pub target: ColorTarget,
    /// Text typed so far
    pub input: String,
    /// Reason the last submission was rejected
    pub error: Option<String>,
}

impl ColorPrompt {
    fn new(target: ColorTarget) -> Self {
        Self {
            target,
            input: String::new(),
            error: None,
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// The current batch of artworks
    pub records: Vec<Artwork>,
    /// Index of the artwork on screen; always within `records` when non-empty
    pub current_index: usize,
    /// Display settings
    pub settings: Settings,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Open color entry prompt, if any
    pub color_prompt: Option<ColorPrompt>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a reload has been requested
    pub reload_requested: bool,
    /// When the current batch was received
    pub last_refresh: Option<DateTime<Local>>,
    /// When the cache slot backing the current batch was written
    pub cached_at: Option<DateTime<Utc>>,
    /// Source of artwork batches
    cache: RecordCache,
}

impl App {
    /// Creates a new App reading batches from `cache`
    pub fn new(cache: RecordCache, settings: Settings) -> Self {
        Self {
            state: AppState::Loading,
            records: Vec::new(),
            current_index: 0,
            settings,
            show_help: false,
            color_prompt: None,
            should_quit: false,
            reload_requested: false,
            last_refresh: None,
            cached_at: None,
            cache,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// Uses the persistent cache directory unless `no_cache` is set or the
    /// directory cannot be determined, in which case batches live in memory.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match FileStore::new() {
            Some(store) if !config.no_cache => Arc::new(store),
            _ => Arc::new(MemoryStore::new()),
        };
        let cache = RecordCache::new(Arc::new(ArticClient::new()), store);
        Self::new(cache, config.settings)
    }

    /// Returns the artwork currently on screen, if any
    pub fn current_artwork(&self) -> Option<&Artwork> {
        self.records.get(self.current_index)
    }

    /// Returns the 1-based position and batch size, if the batch is non-empty
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.records.is_empty() {
            None
        } else {
            Some((self.current_index + 1, self.records.len()))
        }
    }

    /// Fetches a batch from the record cache
    ///
    /// On success the batch replaces the current one and the position resets
    /// to the first artwork. On failure the previous batch is kept and the
    /// state moves to `Failed` with the reason.
    pub async fn load_records(&mut self) {
        self.reload_requested = false;

        match self.cache.get_records().await {
            Ok(records) => {
                info!(count = records.len(), "loaded artwork batch");
                self.replace_records(records);
                self.cached_at = self
                    .cache
                    .peek(Utc::now())
                    .and_then(|entry| DateTime::<Utc>::from_timestamp_millis(entry.timestamp));
                self.last_refresh = Some(Local::now());
                self.state = AppState::Viewing;
            }
            Err(e) => {
                warn!(error = %e, "failed to load artworks");
                self.state = AppState::Failed(e.to_string());
            }
        }
    }

    /// Replaces the batch and resets the position to its start
    pub fn replace_records(&mut self, records: Vec<Artwork>) {
        self.records = records;
        self.current_index = 0;
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// While a color prompt is open all keys edit it. While the help overlay
    /// is shown only `Esc`, `?` and `q` are handled, and all of them close it.
    /// While loading only quitting is allowed.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if self.color_prompt.is_some() {
            self.handle_prompt_key(key_event);
            return;
        }

        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if let Some(command) = command_for_key(key_event) {
            if self.state == AppState::Loading && command != Command::Quit {
                return;
            }
            self.dispatch(command);
        }
    }

    /// Applies a command to the application state
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::NextArtwork => self.next_artwork(),
            Command::ToggleDetails => {
                self.settings.show_details = !self.settings.show_details;
            }
            Command::CycleCharColorMode => {
                self.settings.char_color_mode = self.settings.char_color_mode.toggled();
            }
            Command::CycleCellColorMode => {
                self.settings.cell_color_mode = self.settings.cell_color_mode.toggled();
            }
            Command::SetCharColor(color) => self.settings.char_color = color,
            Command::SetCellColor(color) => self.settings.cell_color = color,
            Command::SetBackgroundColor(color) => self.settings.background_color = color,
            Command::PromptColor(target) => self.color_prompt = Some(ColorPrompt::new(target)),
            Command::Reload => self.reload_requested = true,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Quit => self.should_quit = true,
        }
    }

    /// Edits the open color prompt; `Enter` applies a valid color, `Esc` cancels
    fn handle_prompt_key(&mut self, key_event: KeyEvent) {
        let Some(prompt) = self.color_prompt.as_mut() else {
            return;
        };

        match key_event.code {
            KeyCode::Esc => self.color_prompt = None,
            KeyCode::Backspace => {
                prompt.input.pop();
                prompt.error = None;
            }
            KeyCode::Char(c) if c.is_ascii_hexdigit() || c == '#' => {
                if prompt.input.len() < PROMPT_MAX_LEN {
                    prompt.input.push(c);
                    prompt.error = None;
                }
            }
            KeyCode::Enter => match Rgb::from_hex(&prompt.input) {
                Ok(color) => {
                    let target = prompt.target;
                    self.color_prompt = None;
                    self.dispatch(set_color_command(target, color));
                }
                Err(e) => prompt.error = Some(e.to_string()),
            },
            _ => {}
        }
    }

    /// Moves to the next artwork, requesting a reload past the end of the batch
    ///
    /// After a failed load the kept batch is not advanced; the request is
    /// retried instead.
    fn next_artwork(&mut self) {
        if matches!(self.state, AppState::Failed(_)) {
            self.reload_requested = true;
            return;
        }

        if self.current_index + 1 < self.records.len() {
            self.current_index += 1;
        } else {
            self.reload_requested = true;
        }
    }
}

fn set_color_command(target: ColorTarget, color: Rgb) -> Command {
    match target {
        ColorTarget::Char => Command::SetCharColor(color),
        ColorTarget::Cell => Command::SetCellColor(color),
        ColorTarget::Background => Command::SetBackgroundColor(color),
    }
}
