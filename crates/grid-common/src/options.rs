//! Construction-time options for an occupancy grid layer.
//!
//! Options are immutable once built. They can be written in code or loaded
//! from a JSON / YAML file:
//!
//! ```yaml
//! palette: costmap
//! opacity: 0.7
//! color: "#ffffff"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{GridError, GridResult};

/// Named value-to-color lookup tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PaletteName {
    /// Identity grayscale
    #[default]
    Raw,
    /// Occupancy probability grayscale with sentinel bands
    Map,
    /// Cost ramp with inscribed / lethal sentinels
    Costmap,
}

impl PaletteName {
    pub const ALL: [PaletteName; 3] = [PaletteName::Raw, PaletteName::Map, PaletteName::Costmap];

    /// Resolve a palette by name. Unknown names fall back to `Raw`.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::debug!(name, "Unknown palette name, falling back to raw");
            PaletteName::Raw
        })
    }

    /// Strict lookup; `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "raw" => Some(PaletteName::Raw),
            "map" => Some(PaletteName::Map),
            "costmap" => Some(PaletteName::Costmap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteName::Raw => "raw",
            PaletteName::Map => "map",
            PaletteName::Costmap => "costmap",
        }
    }
}

impl From<String> for PaletteName {
    fn from(name: String) -> Self {
        PaletteName::from_name(&name)
    }
}

impl From<&str> for PaletteName {
    fn from(name: &str) -> Self {
        PaletteName::from_name(name)
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for building a grid layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerOptions {
    /// Default tint. Palette lookups ignore it; custom color resolvers may use it.
    #[serde(default)]
    pub color: Color,

    /// Material opacity in `[0, 1]`
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Lookup table used when no color function is configured
    #[serde(default, alias = "colorPallete", alias = "color_palette")]
    pub palette: PaletteName,
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            color: Color::default(),
            opacity: default_opacity(),
            palette: PaletteName::default(),
        }
    }
}

impl LayerOptions {
    pub fn with_palette(mut self, palette: impl Into<PaletteName>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Opacity clamped into `[0, 1]`. NaN counts as fully opaque.
    pub fn effective_opacity(&self) -> f32 {
        if self.opacity.is_nan() {
            tracing::warn!("Opacity is NaN, using 1.0");
            return 1.0;
        }
        let clamped = self.opacity.clamp(0.0, 1.0);
        if clamped != self.opacity {
            tracing::warn!(opacity = self.opacity, clamped, "Opacity out of range, clamping");
        }
        clamped
    }

    /// Whether the material has to be drawn with blending.
    pub fn is_transparent(&self) -> bool {
        self.effective_opacity() < 1.0
    }

    /// Parse options from a JSON string.
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from a YAML string.
    pub fn from_yaml(yaml: &str) -> GridResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load options from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GridError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            other => Err(GridError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_name_parse() {
        assert_eq!(PaletteName::from_name("map"), PaletteName::Map);
        assert_eq!(PaletteName::from_name("COSTMAP"), PaletteName::Costmap);
        assert_eq!(PaletteName::from_name("bogus"), PaletteName::Raw);
        assert_eq!(PaletteName::parse("bogus"), None);
    }

    #[test]
    fn test_defaults() {
        let opts = LayerOptions::default();
        assert_eq!(opts.palette, PaletteName::Raw);
        assert_eq!(opts.opacity, 1.0);
        assert_eq!(opts.color, Color::WHITE);
        assert!(!opts.is_transparent());
    }

    #[test]
    fn test_opacity_clamped() {
        assert_eq!(LayerOptions::default().with_opacity(1.5).effective_opacity(), 1.0);
        assert_eq!(LayerOptions::default().with_opacity(-0.5).effective_opacity(), 0.0);
        assert_eq!(LayerOptions::default().with_opacity(f32::NAN).effective_opacity(), 1.0);
        assert!(LayerOptions::default().with_opacity(0.5).is_transparent());
    }

    #[test]
    fn test_legacy_palette_key() {
        let opts = LayerOptions::from_json(r#"{"colorPallete": "map", "opacity": 0.25}"#).unwrap();
        assert_eq!(opts.palette, PaletteName::Map);
        assert_eq!(opts.opacity, 0.25);
    }

    #[test]
    fn test_unknown_palette_in_json_falls_back() {
        let opts = LayerOptions::from_json(r#"{"palette": "bogus"}"#).unwrap();
        assert_eq!(opts.palette, PaletteName::Raw);
    }
}
