/// JSON drawing jobs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{DrawingVariant, LayoutConfig};
use crate::error::ConfigError;
use crate::profile::{PartProfile, SectionDescriptor};
use crate::surface::{OutputFormat, RasterOptions};
use crate::thread::derive_minor_diameter;

/// One row of a job's section table.
///
/// `start_offset` may be left out, in which case the section starts where the
/// previous one ends. A threaded section without `minor_diameter` derives it
/// from its thread label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRow {
    pub length: f64,
    pub major_diameter: f64,
    #[serde(default)]
    pub minor_diameter: Option<f64>,
    #[serde(default)]
    pub start_offset: Option<f64>,
    #[serde(default)]
    pub threaded: bool,
    #[serde(default)]
    pub thread_label: Option<String>,
}

impl SectionRow {
    /// A label alone marks the section as threaded
    pub fn is_threaded(&self) -> bool {
        self.threaded || self.thread_label.is_some()
    }

    fn to_section(&self, index: usize, offset: f64) -> Result<SectionDescriptor, ConfigError> {
        let minor = match (self.minor_diameter, self.is_threaded(), &self.thread_label) {
            (Some(minor), _, _) => minor,
            (None, false, _) => self.major_diameter,
            (None, true, Some(label)) => derive_minor_diameter(label)
                .map_err(|source| ConfigError::Thread { index, source })?,
            (None, true, None) => return Err(ConfigError::MissingMinorDiameter { index }),
        };

        Ok(SectionDescriptor {
            length: self.length,
            major_diameter: self.major_diameter,
            minor_diameter: minor,
            start_offset: self.start_offset.unwrap_or(offset),
            is_threaded: self.is_threaded(),
            thread_label: self.thread_label.clone(),
        })
    }
}

/// A part plus everything needed to render it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingJob {
    /// Overrides the variant name, and with it the default output file
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub sections: Vec<SectionRow>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub variant: DrawingVariant,
    #[serde(default)]
    pub raster: RasterOptions,
}

impl DrawingJob {
    /// Build and validate the part profile
    pub fn profile(&self) -> Result<PartProfile, ConfigError> {
        let mut offset = 0.0;
        let mut sections = Vec::with_capacity(self.sections.len());
        for (index, row) in self.sections.iter().enumerate() {
            let section = row.to_section(index, offset)?;
            offset = section.end_offset();
            sections.push(section);
        }
        Ok(PartProfile::new(sections)?)
    }

    pub fn variant(&self) -> DrawingVariant {
        match &self.name {
            Some(name) => DrawingVariant {
                name: name.clone(),
                ..self.variant.clone()
            },
            None => self.variant.clone(),
        }
    }

    /// Explicit output path, or one derived from the variant name
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.variant().output_path(format.extension()))
    }
}

/// Read a job file
pub fn load_job(path: &Path) -> Result<DrawingJob, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let job: DrawingJob = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "loaded job {} with {} sections",
        path.display(),
        job.sections.len()
    );
    Ok(job)
}
