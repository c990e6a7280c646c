use crate::render::surface::FrameRGBA;

/// Ticket for one preview render; only the newest ticket may publish its frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderToken(u64);

/// Last-writer-wins slot for the live preview.
///
/// Every input change calls [`PreviewTarget::begin`]; a render that finishes after a newer one
/// was requested is discarded by [`PreviewTarget::complete`].
#[derive(Debug, Default)]
pub struct PreviewTarget {
    issued: u64,
    shown: Option<(RenderToken, FrameRGBA)>,
}

impl PreviewTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new render, superseding every earlier one.
    pub fn begin(&mut self) -> RenderToken {
        self.issued += 1;
        RenderToken(self.issued)
    }

    pub fn is_current(&self, token: RenderToken) -> bool {
        token.0 == self.issued
    }

    /// Publish `frame` if `token` is current. Returns `false` for a stale render.
    pub fn complete(&mut self, token: RenderToken, frame: FrameRGBA) -> bool {
        if !self.is_current(token) {
            tracing::debug!(token = token.0, newest = self.issued, "dropping stale preview");
            return false;
        }
        self.shown = Some((token, frame));
        true
    }

    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.shown.as_ref().map(|(_, f)| f)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
