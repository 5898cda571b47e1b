//! artgrid library
//!
//! Random artwork browsing on top of the Art Institute of Chicago API: a
//! time-boxed record cache, the collection client, and the terminal UI
//! controller driving them.

pub mod app;
pub mod cache;
pub mod cli;
pub mod command;
pub mod data;
pub mod settings;
pub mod store;
pub mod ui;
