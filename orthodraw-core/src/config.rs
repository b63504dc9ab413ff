/// Layout constants and drawing variants
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::ViewEnd;

/// Immutable layout constants, all in drawing units (mm) unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum gap between neighbouring views
    pub view_spacing: f64,
    /// Margin around the whole drawing
    pub padding: f64,
    /// Clearance between the outline and the nearest dimension line
    pub dim_offset: f64,
    /// Gap between a dimension line and its text
    pub text_offset: f64,
    /// Distance between thread hatch slashes
    pub hatch_pitch: f64,
    /// Uniform scale applied to every view
    pub scale: f64,
    /// Thread runout, as a fraction of the threaded length
    pub termination_fraction: f64,
    /// Extra callout height per section index, as a fraction of `dim_offset`
    pub callout_stagger: f64,
    /// Dimension text size in points
    pub font_size: f64,
    /// View and drawing title size in points
    pub title_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            view_spacing: 15.0,
            padding: 5.0,
            dim_offset: 10.0,
            text_offset: 3.0,
            hatch_pitch: 3.0,
            scale: 1.0,
            termination_fraction: 0.1,
            callout_stagger: 0.25,
            font_size: 10.0,
            title_size: 11.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("view spacing", self.view_spacing),
            ("dimension offset", self.dim_offset),
            ("hatch pitch", self.hatch_pitch),
            ("scale", self.scale),
            ("font size", self.font_size),
            ("title size", self.title_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidLayout { field, value });
            }
        }

        let non_negative = [
            ("padding", self.padding),
            ("text offset", self.text_offset),
            ("callout stagger", self.callout_stagger),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError::InvalidLayout { field, value });
            }
        }

        let fraction = self.termination_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(ValidationError::InvalidLayout {
                field: "termination fraction",
                value: fraction,
            });
        }

        Ok(())
    }
}

/// How threaded spans are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadRenderMode {
    /// Thin lines at the minor diameter
    #[default]
    MinorDiameter,
    /// Slash lines at a fixed pitch
    Hatch,
    Both,
}

impl ThreadRenderMode {
    pub fn draws_minor_diameter(&self) -> bool {
        matches!(self, ThreadRenderMode::MinorDiameter | ThreadRenderMode::Both)
    }

    pub fn draws_hatch(&self) -> bool {
        matches!(self, ThreadRenderMode::Hatch | ThreadRenderMode::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatchStyle {
    #[default]
    Diagonal,
    Perpendicular,
}

/// Which view is the front view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOrder {
    /// Front is the end-on view; top and right side are profiles
    #[default]
    EndViewFront,
    /// Front and top are horizontal profiles; the end view sits on the right
    ProfileFront,
}

/// Options selecting one flavour of the drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingVariant {
    pub name: String,
    pub title: Option<String>,
    pub end_view_end: ViewEnd,
    pub thread_render: ThreadRenderMode,
    pub hatch_style: HatchStyle,
    pub view_order: ViewOrder,
    pub projection_lines: bool,
}

impl Default for DrawingVariant {
    fn default() -> Self {
        Self {
            name: "drawing".to_string(),
            title: None,
            end_view_end: ViewEnd::Left,
            thread_render: ThreadRenderMode::MinorDiameter,
            hatch_style: HatchStyle::Diagonal,
            view_order: ViewOrder::EndViewFront,
            projection_lines: false,
        }
    }
}

impl DrawingVariant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Output file derived from the variant name
    pub fn output_path(&self, extension: &str) -> PathBuf {
        PathBuf::from(format!("{}.{extension}", self.name))
    }
}
