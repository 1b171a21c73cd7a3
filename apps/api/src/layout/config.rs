//! Named layout parameters for the CV page.
//!
//! Units are millimetres on an A4 page with y growing downwards from the top
//! edge. The defaults give the classic single-column CV page; a config file only
//! needs to name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::font_metrics::FontFamily;

#[derive(Debug, Error)]
pub enum LayoutConfigError {
    #[error("Failed to read layout config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid layout config: {0}")]
    Invalid(String),
}

/// Font size in points for each text role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub section_header: f32,
    pub entry_title: f32,
    pub entry_meta: f32,
    pub body: f32,
    pub skill: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        FontSizes {
            title: 24.0,
            subtitle: 16.0,
            section_header: 18.0,
            entry_title: 14.0,
            entry_meta: 12.0,
            body: 10.0,
            skill: 12.0,
        }
    }
}

/// Section header texts, in the fixed order the engine emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionTitles {
    pub experience: String,
    pub education: String,
    pub skills: String,
}

impl FontSizes {
    fn named(&self) -> [(&'static str, f32); 7] {
        [
            ("title", self.title),
            ("subtitle", self.subtitle),
            ("section_header", self.section_header),
            ("entry_title", self.entry_title),
            ("entry_meta", self.entry_meta),
            ("body", self.body),
            ("skill", self.skill),
        ]
    }
}

impl Default for SectionTitles {
    fn default() -> Self {
        SectionTitles {
            experience: "Experience".to_string(),
            education: "Education".to_string(),
            skills: "Skills".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Largest y a command may be placed at before a page break is required.
    pub usable_height: f32,
    pub left_margin: f32,
    /// Cursor position after a page break.
    pub top_margin: f32,
    /// x the centered header lines are aligned on.
    pub header_center_x: f32,
    pub title_y: f32,
    pub subtitle_y: f32,
    /// Cursor position on page 1 once the header is placed.
    pub content_start_y: f32,
    /// Width free text is wrapped to.
    pub wrap_width: f32,
    pub font: FontFamily,
    pub font_sizes: FontSizes,
    pub section_header_advance: f32,
    pub line_height: f32,
    pub experience_trailing_gap: f32,
    pub education_trailing_gap: f32,
    pub skills_per_row: usize,
    pub skill_separator: String,
    pub section_titles: SectionTitles,
    /// PDF points per layout unit (72 / 25.4 for millimetres).
    pub points_per_unit: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_width: 210.0,
            page_height: 297.0,
            usable_height: 270.0,
            left_margin: 20.0,
            top_margin: 20.0,
            header_center_x: 105.0,
            title_y: 20.0,
            subtitle_y: 30.0,
            content_start_y: 50.0,
            wrap_width: 170.0,
            font: FontFamily::Helvetica,
            font_sizes: FontSizes::default(),
            section_header_advance: 10.0,
            line_height: 7.0,
            experience_trailing_gap: 5.0,
            education_trailing_gap: 3.0,
            skills_per_row: 3,
            skill_separator: " | ".to_string(),
            section_titles: SectionTitles::default(),
            points_per_unit: 72.0 / 25.4,
        }
    }
}

impl LayoutConfig {
    /// Load a layout config from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, LayoutConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LayoutConfigError> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs the engine cannot lay out on any page.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.skills_per_row == 0 {
            return Err(LayoutConfigError::Invalid(
                "skills_per_row must be at least 1".to_string(),
            ));
        }
        if self.line_height <= 0.0 || self.section_header_advance <= 0.0 {
            return Err(LayoutConfigError::Invalid(
                "line_height and section_header_advance must be positive".to_string(),
            ));
        }
        if self.wrap_width <= 0.0 || self.points_per_unit <= 0.0 {
            return Err(LayoutConfigError::Invalid(
                "wrap_width and points_per_unit must be positive".to_string(),
            ));
        }
        if self.top_margin >= self.usable_height || self.usable_height > self.page_height {
            return Err(LayoutConfigError::Invalid(format!(
                "usable_height {} must lie between top_margin {} and page_height {}",
                self.usable_height, self.top_margin, self.page_height
            )));
        }
        let non_positive = self.font_sizes.named().into_iter().find(|(_, s)| *s <= 0.0);
        if let Some((name, size)) = non_positive {
            return Err(LayoutConfigError::Invalid(format!(
                "font_sizes.{name} must be positive, got {size}"
            )));
        }
        if self.experience_trailing_gap < 0.0 || self.education_trailing_gap < 0.0 {
            return Err(LayoutConfigError::Invalid(
                "trailing gaps must not be negative".to_string(),
            ));
        }
        for (name, y) in [
            ("title_y", self.title_y),
            ("subtitle_y", self.subtitle_y),
            ("content_start_y", self.content_start_y),
        ] {
            if y < 0.0 || y > self.usable_height {
                return Err(LayoutConfigError::Invalid(format!(
                    "{name} {y} must lie within the usable height {}",
                    self.usable_height
                )));
            }
        }
        Ok(())
    }
}
