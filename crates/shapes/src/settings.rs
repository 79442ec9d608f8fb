//! Shape engine settings
//!
//! Tolerances, default display style, arc sampling density and the
//! identity scheme, loadable from a JSON file.

use crate::{Result, ShapeError};
use canvas::ItemOptions;
use geometry::{ArcSampling, DEFAULT_RELATIVE_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every shape created through one context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapeSettings {
    /// Relative tolerance for side length, distance and parallelism checks
    pub relative_tolerance: f64,
    /// Style applied to every new shape before caller options
    pub default_style: StyleDefaults,
    /// Vertex density for ellipses, circles and curved edges
    pub arc_sampling: ArcSampling,
    /// How identity tags are generated
    pub id_scheme: IdScheme,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            default_style: StyleDefaults::default(),
            arc_sampling: ArcSampling::default(),
            id_scheme: IdScheme::Sequential,
        }
    }
}

/// Display options a shape starts with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleDefaults {
    pub fill: String,
    pub outline: String,
    pub width: f64,
}

impl Default for StyleDefaults {
    /// Outline only: no fill, black outline of width 1
    fn default() -> Self {
        Self {
            fill: String::new(),
            outline: "black".to_string(),
            width: 1.0,
        }
    }
}

impl StyleDefaults {
    pub fn to_options(&self) -> ItemOptions {
        ItemOptions::new()
            .with_fill(self.fill.clone())
            .with_outline(self.outline.clone())
            .with_width(self.width)
    }
}

/// Identity tag format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// `Rectangle1`, `Group2`, ...
    #[default]
    Sequential,
    /// `Rectangle-<uuid>`
    Uuid,
}

impl ShapeSettings {
    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: ShapeSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file.
    ///
    /// A missing file gives the defaults. A file that fails to parse or
    /// validate is logged and also gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match Self::from_json_str(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(
                    target: "shapes::settings",
                    "Failed to load shape settings from {}, using defaults: {}",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.relative_tolerance.is_finite() || self.relative_tolerance < 0.0 {
            return Err(ShapeError::InvalidArgument(format!(
                "relative_tolerance must be a non-negative number, got {}",
                self.relative_tolerance
            )));
        }
        if !self.default_style.width.is_finite() || self.default_style.width < 0.0 {
            return Err(ShapeError::InvalidArgument(format!(
                "default outline width must be non-negative, got {}",
                self.default_style.width
            )));
        }
        let sampling = &self.arc_sampling;
        if sampling.points_per_unit < 0.0 || sampling.base_points < 0.0 {
            return Err(ShapeError::InvalidArgument(
                "arc sampling density must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
