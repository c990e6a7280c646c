use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use anyhow::Context;

/// Environment variable naming the font catalog directory.
pub const FONT_DIR_ENV: &str = "CAROUSEL_FONT_DIR";
/// Catalog directory used when [`FONT_DIR_ENV`] is unset.
pub const DEFAULT_FONT_DIR: &str = "fonts";

/// Weight that is always loaded alongside the requested one.
pub const NORMAL_WEIGHT: u16 = 400;

const FACE_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// CSS generic family a catalog font degrades to when its faces are missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    SansSerif,
    Serif,
    Monospace,
}

impl GenericFamily {
    pub fn css_name(self) -> &'static str {
        match self {
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Serif => "serif",
            GenericFamily::Monospace => "monospace",
        }
    }
}

/// Families offered by the style controls, with their generic fallback.
pub const FONT_CATALOG: [(&str, GenericFamily); 12] = [
    ("Inter", GenericFamily::SansSerif),
    ("Poppins", GenericFamily::SansSerif),
    ("Roboto", GenericFamily::SansSerif),
    ("Montserrat", GenericFamily::SansSerif),
    ("Raleway", GenericFamily::SansSerif),
    ("Playfair Display", GenericFamily::Serif),
    ("Manrope", GenericFamily::SansSerif),
    ("Space Grotesk", GenericFamily::SansSerif),
    ("Lora", GenericFamily::Serif),
    ("DM Sans", GenericFamily::SansSerif),
    ("Oswald", GenericFamily::SansSerif),
    ("JetBrains Mono", GenericFamily::Monospace),
];

/// Generic fallback for `family`; unknown families fall back to sans-serif.
pub fn generic_fallback(family: &str) -> GenericFamily {
    FONT_CATALOG
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, generic)| *generic)
        .unwrap_or(GenericFamily::SansSerif)
}

/// CSS font-family list: the quoted family followed by its generic fallback.
pub fn font_stack(family: &str) -> String {
    format!("\"{family}\", {}", generic_fallback(family).css_name())
}

/// A font family at one weight.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub family: String,
    pub weight: u16,
}

impl FontKey {
    pub fn new(family: impl Into<String>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }

    pub fn file_stem(&self) -> String {
        let family: String = self.family.chars().filter(|c| !c.is_whitespace()).collect();
        format!("{family}-{}", self.weight)
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family, self.weight)
    }
}

/// Font faces resolved for one [`FontKey`]. Empty when nothing could be loaded.
#[derive(Clone, Default)]
pub struct FontFaces {
    pub blobs: Vec<parley::fontique::Blob<u8>>,
}

impl fmt::Debug for FontFaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFaces")
            .field("face_count", &self.blobs.len())
            .finish()
    }
}

impl FontFaces {
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

/// Memo of font readiness, keyed by family and weight.
///
/// Missing or unreadable faces are logged and skipped; text then degrades to the generic fallback.
pub struct FontGate {
    root: PathBuf,
    ready: Mutex<HashMap<FontKey, Arc<FontFaces>>>,
}

static GLOBAL_GATE: LazyLock<Arc<FontGate>> = LazyLock::new(|| {
    let root = std::env::var_os(FONT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_DIR));
    Arc::new(FontGate::new(root))
});

impl FontGate {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ready: Mutex::new(HashMap::new()),
        }
    }

    /// Process-wide gate over the directory named by [`FONT_DIR_ENV`].
    pub fn global() -> Arc<FontGate> {
        Arc::clone(&GLOBAL_GATE)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_ready(&self, family: &str, weight: u16) -> bool {
        let ready = self.ready.lock().unwrap_or_else(PoisonError::into_inner);
        ready.contains_key(&FontKey::new(family, weight))
    }

    /// Resolve `family` at `weight`, loading faces on first use.
    #[tracing::instrument(skip(self))]
    pub fn ensure_ready(&self, family: &str, weight: u16) -> Arc<FontFaces> {
        let key = FontKey::new(family, weight);
        let mut ready = self.ready.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(faces) = ready.get(&key) {
            return Arc::clone(faces);
        }

        let mut weights = vec![NORMAL_WEIGHT];
        if weight != NORMAL_WEIGHT {
            weights.push(weight);
        }

        let mut faces = FontFaces::default();
        for w in weights {
            let face_key = FontKey::new(family, w);
            match self.load_face(&face_key) {
                Ok(blob) => faces.blobs.push(blob),
                Err(err) => {
                    tracing::warn!(font = %face_key, error = %err, "font face unavailable, using fallback");
                }
            }
        }
        tracing::debug!(font = %key, faces = faces.blobs.len(), "font ready");

        let faces = Arc::new(faces);
        ready.insert(key, Arc::clone(&faces));
        faces
    }

    fn load_face(&self, key: &FontKey) -> anyhow::Result<parley::fontique::Blob<u8>> {
        let stem = key.file_stem();
        let path = FACE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{stem}.{ext}")))
            .find(|p| p.is_file())
            .with_context(|| format!("no face '{stem}' in '{}'", self.root.display()))?;
        let bytes =
            std::fs::read(&path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(parley::fontique::Blob::from(bytes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
