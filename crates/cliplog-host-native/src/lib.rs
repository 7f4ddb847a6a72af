//! Native clipboard adapter for cliplog
//!
//! Provides [`SystemClipboard`], a `ClipboardReader` over the platform
//! clipboard (X11 on Linux, NSPasteboard on macOS, Win32 on Windows).

mod clipboard;

pub use clipboard::*;
