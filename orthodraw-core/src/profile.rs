/// Part profile: the ordered cylindrical sections of a turned part
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Absolute tolerance (mm) for abutting sections and equal diameters
pub const TOLERANCE: f64 = 1e-6;

/// Which end of the part an end-on view looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewEnd {
    /// The end at axial offset 0
    #[default]
    Left,
    /// The end at the total length
    Right,
}

/// A constant-diameter cylindrical segment, possibly threaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub length: f64,
    pub major_diameter: f64,
    pub minor_diameter: f64,
    pub start_offset: f64,
    pub is_threaded: bool,
    pub thread_label: Option<String>,
}

impl SectionDescriptor {
    /// An unthreaded section starting at offset 0
    pub fn plain(length: f64, diameter: f64) -> Self {
        Self {
            length,
            major_diameter: diameter,
            minor_diameter: diameter,
            start_offset: 0.0,
            is_threaded: false,
            thread_label: None,
        }
    }

    /// A threaded section starting at offset 0
    pub fn threaded(length: f64, major: f64, minor: f64, label: impl Into<String>) -> Self {
        Self {
            length,
            major_diameter: major,
            minor_diameter: minor,
            start_offset: 0.0,
            is_threaded: true,
            thread_label: Some(label.into()),
        }
    }

    /// Place the section at an axial offset
    pub fn at(mut self, start_offset: f64) -> Self {
        self.start_offset = start_offset;
        self
    }

    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.length
    }

    pub fn mid_offset(&self) -> f64 {
        self.start_offset + self.length / 2.0
    }

    pub fn major_radius(&self) -> f64 {
        self.major_diameter / 2.0
    }

    pub fn minor_radius(&self) -> f64 {
        self.minor_diameter / 2.0
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        for (field, value) in [
            ("length", self.length),
            ("major diameter", self.major_diameter),
            ("minor diameter", self.minor_diameter),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::NonPositive { index, field, value });
            }
        }

        if self.minor_diameter > self.major_diameter + TOLERANCE {
            return Err(ValidationError::MinorExceedsMajor {
                index,
                minor: self.minor_diameter,
                major: self.major_diameter,
            });
        }

        Ok(())
    }
}

/// A validated, ordered stack of sections
#[derive(Debug, Clone, PartialEq)]
pub struct PartProfile {
    sections: Vec<SectionDescriptor>,
    total_length: f64,
    max_diameter: f64,
}

impl PartProfile {
    /// Validate a section table whose start offsets are already filled in.
    ///
    /// The first section must start at 0 and every following section must
    /// start exactly where the previous one ends.
    pub fn new(sections: Vec<SectionDescriptor>) -> Result<Self, ValidationError> {
        if sections.is_empty() {
            return Err(ValidationError::Empty);
        }

        let mut expected = 0.0;
        for (index, section) in sections.iter().enumerate() {
            section.validate(index)?;
            if !section.start_offset.is_finite()
                || (section.start_offset - expected).abs() > TOLERANCE
            {
                return Err(ValidationError::OffsetMismatch {
                    index,
                    expected,
                    found: section.start_offset,
                });
            }
            expected = section.end_offset();
        }

        let total_length = sections.iter().map(|s| s.length).sum();
        let max_diameter = sections
            .iter()
            .map(|s| s.major_diameter)
            .fold(f64::MIN, f64::max);

        log::debug!(
            "validated profile: {} sections, length {total_length}, max diameter {max_diameter}",
            sections.len()
        );

        Ok(Self {
            sections,
            total_length,
            max_diameter,
        })
    }

    /// Build a profile by stacking sections end to end, ignoring their own offsets
    pub fn stacked<I>(sections: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = SectionDescriptor>,
    {
        let mut offset = 0.0;
        let placed = sections
            .into_iter()
            .map(|section| {
                let placed = section.at(offset);
                offset += placed.length;
                placed
            })
            .collect();
        Self::new(placed)
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn max_diameter(&self) -> f64 {
        self.max_diameter
    }

    pub fn max_radius(&self) -> f64 {
        self.max_diameter / 2.0
    }

    /// Distinct major diameters, largest first
    pub fn distinct_diameters(&self) -> Vec<f64> {
        let mut diameters: Vec<f64> = self.sections.iter().map(|s| s.major_diameter).collect();
        diameters.sort_by(|a, b| b.total_cmp(a));
        diameters.dedup_by(|a, b| (*a - *b).abs() <= TOLERANCE);
        diameters
    }

    /// The section an end-on view sees first
    pub fn end_section(&self, end: ViewEnd) -> &SectionDescriptor {
        // Non-empty by construction.
        match end {
            ViewEnd::Left => &self.sections[0],
            ViewEnd::Right => &self.sections[self.sections.len() - 1],
        }
    }

    pub fn threaded_sections(&self) -> impl Iterator<Item = (usize, &SectionDescriptor)> {
        self.sections.iter().enumerate().filter(|(_, s)| s.is_threaded)
    }
}
