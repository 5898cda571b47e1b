//! Command-line interface parsing for artgrid
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the initial display settings and storage choice for the application.

use clap::Parser;
use thiserror::Error;

use crate::settings::{ColorMode, Rgb, Settings, SettingsError};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag value could not be parsed
    #[error("--{flag}: {source}")]
    InvalidValue {
        flag: &'static str,
        #[source]
        source: SettingsError,
    },
}

/// artgrid - Browse random artworks from the Art Institute of Chicago
#[derive(Parser, Debug)]
#[command(name = "artgrid")]
#[command(about = "Browse random artworks from the Art Institute of Chicago in your terminal")]
#[command(version)]
pub struct Cli {
    /// Character color mode: sampled or fixed
    #[arg(long, value_name = "MODE")]
    pub char_mode: Option<String>,

    /// Cell color mode: sampled or fixed
    #[arg(long, value_name = "MODE")]
    pub cell_mode: Option<String>,

    /// Character color used in fixed mode, e.g. #ffffff
    #[arg(long, value_name = "HEX")]
    pub char_color: Option<String>,

    /// Cell color used in fixed mode, e.g. #000000
    #[arg(long, value_name = "HEX")]
    pub cell_color: Option<String>,

    /// Background color, e.g. #000000
    #[arg(long, value_name = "HEX")]
    pub bg_color: Option<String>,

    /// Start with the details panel visible
    #[arg(long)]
    pub details: bool,

    /// Keep fetched artworks in memory only instead of the cache directory
    #[arg(long)]
    pub no_cache: bool,

    /// Print the current batch of artworks and exit
    #[arg(long)]
    pub list: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Initial display settings
    pub settings: Settings,
    /// Use an in-memory store instead of the persistent one
    pub no_cache: bool,
    /// Print the batch instead of starting the terminal UI
    pub list_only: bool,
}

fn parse_flag<T>(
    flag: &'static str,
    value: Option<&str>,
    parse: impl Fn(&str) -> Result<T, SettingsError>,
) -> Result<Option<T>, CliError> {
    value
        .map(|v| parse(v).map_err(|source| CliError::InvalidValue { flag, source }))
        .transpose()
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with unspecified settings left at their defaults
    /// * `Err(CliError)` if a color or color mode is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut settings = Settings::default();

        if let Some(mode) = parse_flag("char-mode", cli.char_mode.as_deref(), str::parse::<ColorMode>)? {
            settings.char_color_mode = mode;
        }
        if let Some(mode) = parse_flag("cell-mode", cli.cell_mode.as_deref(), str::parse::<ColorMode>)? {
            settings.cell_color_mode = mode;
        }
        if let Some(color) = parse_flag("char-color", cli.char_color.as_deref(), Rgb::from_hex)? {
            settings.char_color = color;
        }
        if let Some(color) = parse_flag("cell-color", cli.cell_color.as_deref(), Rgb::from_hex)? {
            settings.cell_color = color;
        }
        if let Some(color) = parse_flag("bg-color", cli.bg_color.as_deref(), Rgb::from_hex)? {
            settings.background_color = color;
        }
        settings.show_details = cli.details;

        Ok(StartupConfig {
            settings,
            no_cache: cli.no_cache,
            list_only: cli.list,
        })
    }
}
