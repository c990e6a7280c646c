use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::foundation::core::SlideId;
use crate::foundation::error::CarouselResult;

/// Decoded raster image, premultiplied RGBA8, shared between preview and export passes.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Per-session cache of decoded slide images.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<SlideId, PreparedImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded image for `id`, decoding `bytes` on first use.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn get_or_decode(&mut self, id: SlideId, bytes: &[u8]) -> CarouselResult<PreparedImage> {
        if let Some(hit) = self.entries.get(&id) {
            return Ok(hit.clone());
        }
        let prepared = decode_image(bytes)?;
        tracing::debug!(width = prepared.width, height = prepared.height, "decoded slide image");
        self.entries.insert(id, prepared.clone());
        Ok(prepared)
    }

    pub fn get(&self, id: SlideId) -> Option<&PreparedImage> {
        self.entries.get(&id)
    }

    /// Drop the decoded image for `id`. Returns `false` if nothing was held.
    pub fn release(&mut self, id: SlideId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
