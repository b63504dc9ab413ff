/// Orthodraw terminal front end: renders drawings to PNG and previews them as ASCII
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use orthodraw_core::{
    compose, load_job, presets, render, ConfigError, Drawing, DrawingVariant, LayoutConfig,
    OutputFormat, PartProfile, RasterOptions, RenderError, Surface, ValidationError,
};
use orthodraw_raster::PngSurface;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod renderer;

pub use renderer::AsciiSurface;

/// Preview size used when stdout is not a terminal
pub const DEFAULT_PREVIEW: (usize, usize) = (100, 36);

/// Anything that can stop a drawing from being produced
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A drawing written to disk
#[derive(Debug, Clone)]
pub struct Rendered {
    pub path: PathBuf,
    pub drawing: Drawing,
}

/// Renders presets or job files into an output directory
pub struct TerminalApp {
    output_dir: PathBuf,
    preview_size: (usize, usize),
}

impl TerminalApp {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let preview_size = terminal::size()
            .map(|(w, h)| (w as usize, (h as usize).saturating_sub(2).max(10)))
            .unwrap_or(DEFAULT_PREVIEW);
        Self {
            output_dir: output_dir.into(),
            preview_size,
        }
    }

    pub fn with_preview_size(mut self, width: usize, height: usize) -> Self {
        self.preview_size = (width, height);
        self
    }

    /// Compose one drawing and write it as PNG
    pub fn render_png(
        &self,
        profile: &PartProfile,
        layout: &LayoutConfig,
        variant: &DrawingVariant,
        raster: &RasterOptions,
        path: &Path,
    ) -> Result<Rendered, DrawError> {
        let drawing = compose(profile, layout, variant)?;
        let mut surface = PngSurface::new(*raster);
        render(&drawing, &mut surface)?;
        surface.save(path, OutputFormat::Png, raster.dpi)?;
        Ok(Rendered {
            path: path.to_path_buf(),
            drawing,
        })
    }

    /// Render every built-in preset to `<variant name>.png`
    pub fn render_presets(&self) -> Result<Vec<Rendered>, DrawError> {
        let raster = RasterOptions::default();
        presets::all()?
            .iter()
            .map(|preset| {
                let path = self
                    .output_dir
                    .join(preset.variant.output_path(OutputFormat::Png.extension()));
                self.render_png(&preset.profile, &preset.layout, &preset.variant, &raster, &path)
            })
            .collect()
    }

    /// Render a JSON job file; relative output paths land in the output directory
    pub fn render_job(&self, job_path: &Path) -> Result<Rendered, DrawError> {
        let job = load_job(job_path)?;
        let profile = job.profile()?;
        let path = self.output_dir.join(job.output_path(OutputFormat::Png));
        self.render_png(&profile, &job.layout, &job.variant(), &job.raster, &path)
    }

    /// Rasterize a drawing into character cells
    pub fn preview(&self, drawing: &Drawing) -> Result<AsciiSurface, DrawError> {
        let (width, height) = self.preview_size;
        let mut surface = AsciiSurface::new(width, height);
        render(drawing, &mut surface)?;
        Ok(surface)
    }

    /// Render presets or one job and print a preview of the last drawing
    pub fn run(&self, job: Option<&Path>) -> Result<Vec<Rendered>, DrawError> {
        let rendered = match job {
            Some(path) => vec![self.render_job(path)?],
            None => self.render_presets()?,
        };

        let mut stdout = io::stdout();
        if let Some(last) = rendered.last() {
            let surface = self.preview(&last.drawing)?;
            queue!(
                stdout,
                SetForegroundColor(Color::Yellow),
                Print(format!("{}\n", last.drawing.title)),
                ResetColor
            )?;
            surface.draw(&mut stdout)?;
        }
        for item in &rendered {
            queue!(stdout, Print(format!("wrote {}\n", item.path.display())))?;
        }
        stdout.flush()?;

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("orthodraw-app-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_render_job_file() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = scratch("job");
        let job_path = dir.join("shaft.json");
        std::fs::write(
            &job_path,
            r#"{
                "name": "job_shaft",
                "sections": [
                    {"length": 20, "major_diameter": 12},
                    {"length": 10, "major_diameter": 10, "thread_label": "M10x1.5"}
                ],
                "raster": {"dpi": 40, "width_in": 4, "height_in": 3}
            }"#,
        )
        .unwrap();

        let app = TerminalApp::new(&dir).with_preview_size(60, 20);
        let rendered = app.render_job(&job_path).unwrap();
        assert_eq!(rendered.path, dir.join("job_shaft.png"));
        assert!(rendered.path.exists());
        assert_eq!(rendered.drawing.circles().count(), 2);

        let preview = app.preview(&rendered.drawing).unwrap();
        assert_eq!(preview.size(), (60, 20));
        assert!(preview.to_text().contains("VIEW"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_job_reports_validation() {
        let dir = scratch("invalid");
        let job_path = dir.join("bad.json");
        std::fs::write(
            &job_path,
            r#"{"sections": [{"length": -1, "major_diameter": 12}]}"#,
        )
        .unwrap();

        let app = TerminalApp::new(&dir);
        let err = app.render_job(&job_path).unwrap_err();
        assert!(matches!(
            err,
            DrawError::Config(ConfigError::Validation(ValidationError::NonPositive { .. }))
        ));
        assert!(!dir.join("drawing.png").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
