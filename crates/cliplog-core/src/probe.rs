//! Ordered clipboard probes

use cliplog_api::{ClipboardContent, ClipboardSnapshot, ContentKind, FormatMap};
use cliplog_config::ContentTypeSettings;
use cliplog_host_api::{ClipboardReader, ReaderError};
use tracing::{debug, warn};

/// Kinds in the order they are tried. Images first: an image copied from a
/// browser usually also carries text.
pub const PROBE_ORDER: [ContentKind; 3] = [ContentKind::Image, ContentKind::Text, ContentKind::Files];

/// Result of asking the reader for one kind of content
#[derive(Debug)]
pub enum Probe {
    Present(ClipboardContent),
    Absent,
    /// Kind is switched off in `[content_types]`
    Disabled,
    Oversized { size: u64, limit: u64 },
    Failed(ReaderError),
}

impl Probe {
    pub fn is_present(&self) -> bool {
        matches!(self, Probe::Present(_))
    }
}

/// Probe a single content kind
pub fn probe(reader: &dyn ClipboardReader, kind: ContentKind, settings: &ContentTypeSettings) -> Probe {
    match kind {
        ContentKind::Image => probe_image(reader, settings),
        ContentKind::Text => probe_text(reader, settings),
        ContentKind::Files => probe_files(reader, settings),
        ContentKind::Unknown => Probe::Absent,
    }
}

fn probe_image(reader: &dyn ClipboardReader, settings: &ContentTypeSettings) -> Probe {
    if !settings.enable_image {
        return Probe::Disabled;
    }
    match reader.try_image() {
        Ok(Some(bytes)) if bytes.len() as u64 > settings.max_image_size => Probe::Oversized {
            size: bytes.len() as u64,
            limit: settings.max_image_size,
        },
        Ok(Some(bytes)) if !bytes.is_empty() => Probe::Present(ClipboardContent::Image(bytes)),
        Ok(_) => Probe::Absent,
        Err(e) => Probe::Failed(e),
    }
}

fn probe_text(reader: &dyn ClipboardReader, settings: &ContentTypeSettings) -> Probe {
    if !settings.enable_text {
        return Probe::Disabled;
    }
    match reader.try_text() {
        Ok(Some(text)) if text.is_empty() => Probe::Absent,
        Ok(Some(text)) => {
            let chars = text.chars().count();
            if chars > settings.max_text_length {
                Probe::Oversized {
                    size: chars as u64,
                    limit: settings.max_text_length as u64,
                }
            } else {
                Probe::Present(ClipboardContent::Text(text))
            }
        }
        Ok(None) => Probe::Absent,
        Err(e) => Probe::Failed(e),
    }
}

fn probe_files(reader: &dyn ClipboardReader, settings: &ContentTypeSettings) -> Probe {
    if !settings.enable_files {
        return Probe::Disabled;
    }
    match reader.try_files() {
        Ok(Some(paths)) if !paths.is_empty() => Probe::Present(ClipboardContent::Files(paths)),
        Ok(_) => Probe::Absent,
        Err(e) => Probe::Failed(e),
    }
}

/// Build this tick's snapshot: the first present kind in [`PROBE_ORDER`], or
/// no content at all.
pub fn capture_snapshot(reader: &dyn ClipboardReader, settings: &ContentTypeSettings) -> ClipboardSnapshot {
    let available_formats = reader.list_formats().unwrap_or_else(|e| {
        debug!(error = %e, "Failed to list clipboard formats");
        FormatMap::new()
    });

    let mut content = None;
    for kind in PROBE_ORDER {
        match probe(reader, kind, settings) {
            Probe::Present(found) => {
                content = Some(found);
                break;
            }
            Probe::Absent | Probe::Disabled => {}
            Probe::Oversized { size, limit } => {
                debug!(kind = %kind, size, limit, "Clipboard content over size limit, skipping");
            }
            Probe::Failed(e) => {
                warn!(kind = %kind, backend = reader.backend_name(), error = %e, "Clipboard read failed");
            }
        }
    }

    ClipboardSnapshot::new(available_formats, content)
}
