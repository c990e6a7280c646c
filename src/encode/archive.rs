use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::foundation::error::{CarouselError, CarouselResult};

/// In-memory zip archive of already-encoded slides.
///
/// Entries are stored uncompressed with a fixed 1980-01-01 timestamp, so identical slides
/// produce identical archives.
pub struct SlideArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: Vec<String>,
}

impl Default for SlideArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SlideArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideArchive")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl SlideArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append one file.
    pub fn add(&mut self, name: &str, data: &[u8]) -> CarouselResult<()> {
        if name.is_empty() {
            return Err(CarouselError::encode("zip entry name must be non-empty"));
        }
        if self.names.iter().any(|n| n == name) {
            return Err(CarouselError::encode(format!("duplicate zip entry '{name}'")));
        }
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default());
        self.writer
            .start_file(name, options)
            .map_err(|e| CarouselError::encode(format!("zip entry '{name}': {e}")))?;
        self.writer
            .write_all(data)
            .map_err(|e| CarouselError::encode(format!("zip entry '{name}': {e}")))?;
        self.names.push(name.to_owned());
        Ok(())
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(self) -> CarouselResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| CarouselError::encode(format!("finish zip archive: {e}")))?;
        tracing::debug!(entries = self.names.len(), "zip archive finished");
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/archive.rs"]
mod tests;
