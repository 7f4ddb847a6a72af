//! clipboard-rs backed reader

use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use cliplog_host_api::{ClipboardReader, ReaderError, ReaderResult};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Mutex;
use tracing::debug;

type BackendResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

fn map_clipboard_err<T>(result: BackendResult<T>) -> ReaderResult<T> {
    result.map_err(|e| ReaderError::backend(e.to_string()))
}

/// The platform clipboard
pub struct SystemClipboard {
    ctx: Mutex<ClipboardContext>,
}

impl SystemClipboard {
    pub fn new() -> ReaderResult<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| ReaderError::Unavailable(format!("Failed to create clipboard context: {}", e)))?;

        debug!("System clipboard opened");
        Ok(Self {
            ctx: Mutex::new(ctx),
        })
    }

    fn with_ctx<T>(&self, f: impl FnOnce(&ClipboardContext) -> ReaderResult<T>) -> ReaderResult<T> {
        let ctx = self
            .ctx
            .lock()
            .map_err(|_| ReaderError::Unavailable("clipboard context poisoned".into()))?;
        f(&ctx)
    }
}

impl ClipboardReader for SystemClipboard {
    fn try_image(&self) -> ReaderResult<Option<Vec<u8>>> {
        self.with_ctx(|ctx| {
            if !ctx.has(ContentFormat::Image) {
                return Ok(None);
            }
            let image = map_clipboard_err(ctx.get_image())?;
            let png = map_clipboard_err(image.to_png())?;
            Ok(Some(png.get_bytes().to_vec()))
        })
    }

    fn try_text(&self) -> ReaderResult<Option<String>> {
        self.with_ctx(|ctx| {
            if !ctx.has(ContentFormat::Text) {
                return Ok(None);
            }
            map_clipboard_err(ctx.get_text()).map(Some)
        })
    }

    fn try_files(&self) -> ReaderResult<Option<Vec<String>>> {
        self.with_ctx(|ctx| {
            if !ctx.has(ContentFormat::Files) {
                return Ok(None);
            }
            map_clipboard_err(ctx.get_files()).map(Some)
        })
    }

    fn list_formats(&self) -> ReaderResult<BTreeMap<String, u32>> {
        self.with_ctx(|ctx| map_clipboard_err(ctx.available_formats()).map(format_map))
    }

    fn backend_name(&self) -> &'static str {
        "clipboard-rs"
    }
}

/// clipboard-rs reports format names only; ids are their position in the
/// platform's list. Repeated names keep their first id.
fn format_map(names: Vec<String>) -> BTreeMap<String, u32> {
    let mut formats = BTreeMap::new();
    for (id, name) in (0u32..).zip(names) {
        formats.entry(name).or_insert(id);
    }
    formats
}
