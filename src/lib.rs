//! Carousel composes social-media slides: a photo scaled to cover a fixed canvas, a caption
//! wrapped and shrunk to fit a movable box, and optional washes behind it.
//!
//! - Build a [`StyleConfiguration`] (or start from [`base_preset`])
//! - Paint slides with a [`Composer`], or drive a whole carousel through a [`CarouselSession`]
//! - Export single JPEGs or a `carousel.zip` of every slide
#![forbid(unsafe_code)]

/// Image decoding and the per-slide decode cache.
pub mod assets;
/// JPEG and zip encoders.
pub mod encode;
mod foundation;
/// Cover fit, caption box resolution and shrink-to-fit wrapping.
pub mod layout;
/// Slide painting, surfaces and preview staleness.
pub mod render;
/// Editing session: slides, captions, exports and gestures.
pub mod session;
/// Caption style model, colors and presets.
pub mod style;
/// Font readiness and text shaping.
pub mod text;

pub use crate::foundation::core::{Affine, Aspect, Canvas, Point, Rect, Rgba8, Size, SlideId, Vec2};
pub use crate::foundation::error::{CarouselError, CarouselResult};

pub use crate::assets::decode::decode_image;
pub use crate::assets::store::{ImageCache, PreparedImage};
pub use crate::encode::archive::SlideArchive;
pub use crate::encode::jpeg::{DEFAULT_QUALITY, encode_jpeg};
pub use crate::layout::fit::{LayoutResult, TextMeasure, shrink_to_fit, wrap_lines};
pub use crate::render::composer::Composer;
pub use crate::render::preview::{PreviewTarget, RenderToken};
pub use crate::render::surface::{FrameRGBA, RenderTarget};
pub use crate::session::gestures::{BoxGesture, DragMode, GesturePhase, ReorderGesture};
pub use crate::session::intake::{IntakeReport, MAX_SLIDES, Slide, Upload};
pub use crate::session::state::{ARCHIVE_NAME, CarouselSession, ExportedFile};
pub use crate::style::color::HexColor;
pub use crate::style::config::{StyleConfiguration, StylePatch, TextAlign, TextBox};
pub use crate::style::preset::{StylePreset, base_preset};
pub use crate::text::fonts::{FONT_DIR_ENV, FontGate};
