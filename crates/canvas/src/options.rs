//! Display options for canvas items

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A partial update of an item's display options.
///
/// Only the fields that are set are applied; everything else keeps its
/// current value. Supplying `tags` replaces the item's whole tag list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOptions {
    /// Interior color; an empty string means unfilled
    pub fill: Option<String>,
    /// Outline color; an empty string means no outline
    pub outline: Option<String>,
    /// Outline width
    pub width: Option<f64>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
    /// Surface-specific options passed through untouched
    pub extra: BTreeMap<String, String>,
}

impl ItemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = Some(outline.into());
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// True if applying these options would change nothing
    pub fn is_empty(&self) -> bool {
        self.fill.is_none()
            && self.outline.is_none()
            && self.width.is_none()
            && self.tags.is_none()
            && self.extra.is_empty()
    }
}

/// The complete option set of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub fill: String,
    pub outline: String,
    pub width: f64,
    pub tags: Vec<String>,
    pub extra: BTreeMap<String, String>,
}

impl Default for ItemConfig {
    /// A freshly created polygon: filled black, no outline
    fn default() -> Self {
        Self {
            fill: "black".to_string(),
            outline: String::new(),
            width: 1.0,
            tags: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl ItemConfig {
    /// Merge a partial update into this configuration
    pub fn apply(&mut self, options: &ItemOptions) {
        if let Some(fill) = &options.fill {
            self.fill = fill.clone();
        }
        if let Some(outline) = &options.outline {
            self.outline = outline.clone();
        }
        if let Some(width) = options.width {
            self.width = width;
        }
        if let Some(tags) = &options.tags {
            self.tags.clear();
            for tag in tags {
                if !self.tags.contains(tag) {
                    self.tags.push(tag.clone());
                }
            }
        }
        for (name, value) in &options.extra {
            self.extra.insert(name.clone(), value.clone());
        }
    }

    /// Current value of a single option, rendered as a string
    pub fn get(&self, option: &str) -> Option<String> {
        match option {
            "fill" => Some(self.fill.clone()),
            "outline" => Some(self.outline.clone()),
            "width" => Some(self.width.to_string()),
            "tags" => Some(self.tags.join(" ")),
            other => self.extra.get(other).cloned(),
        }
    }

    /// An update that would reproduce this configuration on another item
    pub fn to_options(&self) -> ItemOptions {
        ItemOptions {
            fill: Some(self.fill.clone()),
            outline: Some(self.outline.clone()),
            width: Some(self.width),
            tags: Some(self.tags.clone()),
            extra: self.extra.clone(),
        }
    }
}
