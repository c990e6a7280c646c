use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::SlideId;

/// Most slides a carousel can hold.
pub const MAX_SLIDES: usize = 10;

/// One file handed over by the upload area.
#[derive(Clone, Debug)]
pub struct Upload {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// An uploaded image in the carousel.
#[derive(Clone, Debug)]
pub struct Slide {
    id: SlideId,
    name: String,
    bytes: Arc<[u8]>,
}

impl Slide {
    pub(crate) fn new(id: SlideId, upload: Upload) -> Self {
        Self {
            id,
            name: upload.name,
            bytes: upload.bytes,
        }
    }

    pub fn id(&self) -> SlideId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File name used when this slide is exported on its own.
    pub fn export_name(&self) -> String {
        let stem = Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("slide");
        format!("{stem}.jpg")
    }
}

/// Outcome of one upload batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeReport {
    pub accepted: Vec<SlideId>,
    pub dropped: Vec<String>,
    pub notice: Option<String>,
}

/// Split `uploads` into the ones that fit beside `existing` slides and the overflow.
pub(crate) fn split_at_capacity(
    existing: usize,
    mut uploads: Vec<Upload>,
) -> (Vec<Upload>, Vec<Upload>) {
    let room = MAX_SLIDES.saturating_sub(existing);
    let overflow = uploads.split_off(room.min(uploads.len()));
    (uploads, overflow)
}

/// Message shown when uploads were turned away.
pub(crate) fn capacity_notice(dropped: &[String]) -> Option<String> {
    if dropped.is_empty() {
        return None;
    }
    Some(format!(
        "Maximum of {MAX_SLIDES} slides reached; skipped {}",
        dropped.join(", ")
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/session/intake.rs"]
mod tests;
