/// PNG drawing surface backed by a plotters bitmap
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use nalgebra::Point2;
use plotters::prelude::{BitMapBackend, IntoDrawingArea, PathElement, RGBColor, Text, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontDesc, FontFamily, FontStyle, FontTransform, TextStyle};

use orthodraw_core::primitive::{HAlign, Segment, VAlign};
use orthodraw_core::surface::{dash_segments, tessellate_circle};
use orthodraw_core::{Bounds, Label, OutputFormat, RasterOptions, RenderError, Style, Surface};

use crate::font;
use crate::viewport::Viewport;

const POINTS_PER_INCH: f64 = 72.0;
const CIRCLE_STEPS: usize = 128;

/// A recorded drawing operation, in drawing units
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Stroke { segments: Vec<Segment>, style: Style },
    Text(Label),
}

/// Retained-mode surface that rasterizes on `save`
#[derive(Debug, Clone)]
pub struct PngSurface {
    options: RasterOptions,
    aspect_equal: bool,
    bounds: Option<Bounds>,
    ops: Vec<Op>,
}

impl PngSurface {
    pub fn new(options: RasterOptions) -> Self {
        Self {
            options,
            aspect_equal: false,
            bounds: None,
            ops: Vec::new(),
        }
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Drop every recorded operation, keeping the options
    pub fn clear(&mut self) {
        self.bounds = None;
        self.aspect_equal = false;
        self.ops.clear();
    }

    fn check_bounds(&self) -> Result<(), RenderError> {
        match self.bounds {
            Some(_) => Ok(()),
            None => Err(RenderError::BoundsNotSet),
        }
    }

    /// Rasterize the recorded operations and encode them as PNG bytes
    pub fn encode(&self, dpi: u32) -> Result<Vec<u8>, RenderError> {
        let bounds = self.bounds.ok_or(RenderError::BoundsNotSet)?;
        let options = RasterOptions { dpi, ..self.options };
        let (width, height) = options.pixel_size();
        let viewport = Viewport::fit(&bounds, (width, height), self.aspect_equal)?;
        let px_per_pt = dpi as f64 / POINTS_PER_INCH;
        if self.ops.iter().any(|op| matches!(op, Op::Text(_))) {
            font::ensure_sans_serif()?;
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(backend)?;

            for op in &self.ops {
                match op {
                    Op::Stroke { segments, style } => {
                        let color = RGBColor(style.color.r, style.color.g, style.color.b);
                        let stroke = color.stroke_width(stroke_width(style, px_per_pt));
                        for segment in segments {
                            let points: Vec<(i32, i32)> =
                                segment.iter().map(|p| viewport.to_pixel(p)).collect();
                            root.draw(&PathElement::new(points, stroke)).map_err(backend)?;
                        }
                    }
                    Op::Text(label) => {
                        let style = text_style(label, px_per_pt);
                        let position = viewport.to_pixel(&label.position);
                        root.draw(&Text::new(label.text.clone(), position, style))
                            .map_err(backend)?;
                    }
                }
            }

            root.present().map_err(backend)?;
        }

        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(&buffer, width, height, ColorType::Rgb8.into())
            .map_err(|err| RenderError::Encode(err.to_string()))?;

        log::debug!("encoded {width}x{height} px, {} bytes", bytes.len());
        Ok(bytes)
    }
}

impl Default for PngSurface {
    fn default() -> Self {
        Self::new(RasterOptions::default())
    }
}

impl Surface for PngSurface {
    fn set_aspect_equal(&mut self) {
        self.aspect_equal = true;
    }

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError> {
        if bounds.is_empty() || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(RenderError::EmptyCanvas);
        }
        self.bounds = Some(bounds);
        Ok(())
    }

    fn draw_line(&mut self, points: &[Point2<f64>], style: &Style) -> Result<(), RenderError> {
        self.check_bounds()?;
        self.ops.push(Op::Stroke {
            segments: dash_segments(points, style.dash),
            style: *style,
        });
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        style: &Style,
    ) -> Result<(), RenderError> {
        let points = tessellate_circle(center, radius, CIRCLE_STEPS);
        self.draw_line(&points, style)
    }

    fn draw_text(&mut self, label: &Label) -> Result<(), RenderError> {
        self.check_bounds()?;
        self.ops.push(Op::Text(label.clone()));
        Ok(())
    }

    fn save(&mut self, path: &Path, format: OutputFormat, dpi: u32) -> Result<(), RenderError> {
        if format != OutputFormat::Png {
            return Err(RenderError::UnsupportedFormat(format));
        }
        let bytes = self.encode(dpi)?;
        write_atomic(path, &bytes)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn backend<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

fn stroke_width(style: &Style, px_per_pt: f64) -> u32 {
    (style.line_width * px_per_pt).round().max(1.0) as u32
}

fn text_style(label: &Label, px_per_pt: f64) -> TextStyle<'static> {
    let font = FontDesc::new(FontFamily::SansSerif, label.size * px_per_pt, FontStyle::Normal);
    let h = match label.anchor.h {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match label.anchor.v {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };

    if label.is_vertical() {
        // plotters anchors the unrotated box and then rotates it, so the
        // box axes are swapped on screen for text reading upwards.
        let along = match v {
            VPos::Top => HPos::Right,
            VPos::Center => HPos::Center,
            VPos::Bottom => HPos::Left,
        };
        let across = match h {
            HPos::Left => VPos::Top,
            HPos::Center => VPos::Center,
            HPos::Right => VPos::Bottom,
        };
        return TextStyle::from(font.transform(FontTransform::Rotate270))
            .pos(Pos::new(along, across));
    }

    TextStyle::from(font).pos(Pos::new(h, v))
}

/// Temporary sibling of `path`, in the same directory so rename stays atomic
fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name")
    })?;
    Ok(path.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}

/// Write the whole file or nothing
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path)?;
    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        // Nothing to clean up when the temporary file was never created.
        let _ = fs::remove_file(&tmp);
    }
    result
}
