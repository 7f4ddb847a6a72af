//! Standalone image files

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const IMAGE_FILE_PREFIX: &str = "clipboard_image_";
const IMAGE_FILE_EXTENSION: &str = ".png";

/// Writes clipboard images to `<base>/<images_dir>/clipboard_image_<stamp>.png`
#[derive(Debug, Clone)]
pub struct ImageStore {
    base_dir: PathBuf,
    images_dir: String,
    enabled: bool,
    max_size: u64,
}

impl ImageStore {
    pub fn new(base_dir: impl Into<PathBuf>, images_dir: impl Into<String>, enabled: bool, max_size: u64) -> Self {
        Self {
            base_dir: base_dir.into(),
            images_dir: images_dir.into(),
            enabled,
            max_size,
        }
    }

    pub fn dir(&self) -> PathBuf {
        self.base_dir.join(&self.images_dir)
    }

    /// Persist image bytes captured at `captured_at`.
    ///
    /// Returns the path relative to the base directory, or `None` when saving
    /// is disabled, the image is over the size ceiling, or the write failed.
    pub fn persist(&self, bytes: &[u8], captured_at: &DateTime<Local>) -> Option<String> {
        if !self.enabled {
            return None;
        }

        if bytes.len() as u64 > self.max_size {
            info!(
                size = bytes.len(),
                max_size = self.max_size,
                "Image exceeds size limit, not saving file"
            );
            return None;
        }

        let stamp = cliplog_util::format_image_stamp(captured_at);
        match write_unique(&self.dir(), &stamp, bytes) {
            Ok(name) => {
                debug!(file = %name, size = bytes.len(), "Image saved");
                Some(format!("{}/{}", self.images_dir, name))
            }
            Err(e) => {
                warn!(error = %e, dir = %self.dir().display(), "Failed to save image");
                None
            }
        }
    }
}

/// Create a new file named from `stamp`, appending `_1`, `_2`, ... while the
/// name is taken. Returns the file name that was written.
fn write_unique(dir: &Path, stamp: &str, bytes: &[u8]) -> io::Result<String> {
    for n in 0u32.. {
        let name = if n == 0 {
            format!("{}{}{}", IMAGE_FILE_PREFIX, stamp, IMAGE_FILE_EXTENSION)
        } else {
            format!("{}{}_{}{}", IMAGE_FILE_PREFIX, stamp, n, IMAGE_FILE_EXTENSION)
        };
        let path = dir.join(&name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };

        if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
            drop(file);
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }
        return Ok(name);
    }

    Err(io::Error::other("no free image file name"))
}
