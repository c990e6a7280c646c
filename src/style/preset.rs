use serde::{Deserialize, Serialize};

use crate::style::config::StyleConfiguration;

/// Named style bundle offered by the style controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: StyleConfiguration,
}

/// The starting style of every session.
pub fn base_preset() -> StylePreset {
    StylePreset {
        id: "base".to_owned(),
        name: "Base".to_owned(),
        description: Some("Light caption over a soft bottom wash".to_owned()),
        options: StyleConfiguration::default(),
    }
}
