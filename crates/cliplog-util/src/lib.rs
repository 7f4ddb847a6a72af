//! Shared utilities for cliplog
//!
//! This crate provides:
//! - Time utilities (wall-clock `now()` with mock time, file name stamps)
//! - Default paths for data and config directories

mod paths;
mod time;

pub use paths::*;
pub use time::*;
