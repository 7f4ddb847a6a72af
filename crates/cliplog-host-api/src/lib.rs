//! Clipboard reader interface for cliplog
//!
//! This crate defines the capability-based interface between the monitor core
//! and platform-specific clipboard access. It contains no platform code itself.

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
