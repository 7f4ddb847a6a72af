//! Mock clipboard for testing

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::{ClipboardReader, ReaderError, ReaderResult};

/// Contents and failure switches of a [`MockClipboard`]
#[derive(Debug, Clone, Default)]
pub struct MockClipboardState {
    pub image: Option<Vec<u8>>,
    pub text: Option<String>,
    pub files: Option<Vec<String>>,
    pub formats: BTreeMap<String, u32>,

    pub fail_image: bool,
    pub fail_text: bool,
    pub fail_files: bool,
    pub fail_formats: bool,
}

/// In-memory clipboard for unit/integration testing.
///
/// Clones share state, so a test can keep one handle to change the clipboard
/// while the monitor owns another.
#[derive(Debug, Clone, Default)]
pub struct MockClipboard {
    state: Arc<Mutex<MockClipboardState>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard with plain text (like a fresh copy)
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.image = None;
        state.files = None;
        state.text = Some(text.into());
        state.formats = BTreeMap::from([("text/plain".to_string(), 1)]);
    }

    /// Replace the clipboard with an image
    pub fn set_image(&self, png: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.text = None;
        state.files = None;
        state.image = Some(png);
        state.formats = BTreeMap::from([("image/png".to_string(), 2)]);
    }

    /// Replace the clipboard with a file list
    pub fn set_files(&self, paths: Vec<String>) {
        let mut state = self.state.lock().unwrap();
        state.text = None;
        state.image = None;
        state.files = Some(paths);
        state.formats = BTreeMap::from([("text/uri-list".to_string(), 3)]);
    }

    /// Empty the clipboard
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.text = None;
        state.image = None;
        state.files = None;
        state.formats.clear();
    }

    /// Direct access for tests that need several formats at once
    pub fn update(&self, f: impl FnOnce(&mut MockClipboardState)) {
        f(&mut self.state.lock().unwrap());
    }
}

impl ClipboardReader for MockClipboard {
    fn try_image(&self) -> ReaderResult<Option<Vec<u8>>> {
        let state = self.state.lock().unwrap();
        if state.fail_image {
            return Err(ReaderError::backend("Mock image read failure"));
        }
        Ok(state.image.clone())
    }

    fn try_text(&self) -> ReaderResult<Option<String>> {
        let state = self.state.lock().unwrap();
        if state.fail_text {
            return Err(ReaderError::backend("Mock text read failure"));
        }
        Ok(state.text.clone())
    }

    fn try_files(&self) -> ReaderResult<Option<Vec<String>>> {
        let state = self.state.lock().unwrap();
        if state.fail_files {
            return Err(ReaderError::backend("Mock files read failure"));
        }
        Ok(state.files.clone())
    }

    fn list_formats(&self) -> ReaderResult<BTreeMap<String, u32>> {
        let state = self.state.lock().unwrap();
        if state.fail_formats {
            return Err(ReaderError::Unavailable("Mock clipboard locked".into()));
        }
        Ok(state.formats.clone())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
