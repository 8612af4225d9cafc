//! A small terminal text editor whose buffer and application state are
//! persistent values: every edit produces a new snapshot that shares the
//! unchanged lines with the one before it.

pub mod app;
pub mod command;
pub mod config;
pub mod file_io;
pub mod geometry;
pub mod key;
pub mod keymap;
pub mod logging;
pub mod state;
pub mod text;

mod input;
mod ui;
