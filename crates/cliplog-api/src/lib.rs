//! Shared data model for cliplog
//!
//! This crate defines the types every other crate agrees on:
//! - `ClipboardSnapshot`: one observation of the clipboard, built once per tick
//! - `LogEntry`: the flattened JSON object stored in a daily log file
//! - JSON key names of the on-disk format

mod entry;
mod types;

pub use entry::*;
pub use types::*;
