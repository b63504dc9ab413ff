/// Abstract 2D drawing surface and the dispatch of a drawing onto it
use std::path::Path;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::drawing::Drawing;
use crate::error::RenderError;
use crate::primitive::{Bounds, DashPattern, Label, Primitive, Segment, Style};

/// File format requested from [`Surface::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Png,
    /// Plain character grid
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Text => "txt",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "txt" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

/// Raster output size and resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    pub dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            dpi: 150,
            width_in: 10.0,
            height_in: 8.0,
        }
    }
}

impl RasterOptions {
    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round().max(0.0) as u32,
            (self.height_in * dpi).round().max(0.0) as u32,
        )
    }
}

/// Something primitives can be drawn onto.
///
/// Coordinates are drawing units (mm); `set_bounds` must be called before any
/// draw call so the surface can map them to its own space.
pub trait Surface {
    /// Keep one drawing unit the same length along both axes
    fn set_aspect_equal(&mut self);

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError>;

    fn draw_line(&mut self, points: &[Point2<f64>], style: &Style) -> Result<(), RenderError>;

    fn draw_circle(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        style: &Style,
    ) -> Result<(), RenderError>;

    fn draw_text(&mut self, label: &Label) -> Result<(), RenderError>;

    fn save(&mut self, path: &Path, format: OutputFormat, dpi: u32) -> Result<(), RenderError>;
}

/// Send every primitive of a drawing to a surface
pub fn render<S: Surface + ?Sized>(drawing: &Drawing, surface: &mut S) -> Result<(), RenderError> {
    surface.set_aspect_equal();
    surface.set_bounds(drawing.bounds)?;

    for primitive in &drawing.primitives {
        match primitive {
            Primitive::Polyline { points, style } => surface.draw_line(points, style)?,
            Primitive::Circle {
                center,
                radius,
                style,
            } => surface.draw_circle(*center, *radius, style)?,
            Primitive::Centerline { from, to, style } => surface.draw_line(&[*from, *to], style)?,
            Primitive::Dimension(dim) => {
                for segment in &dim.extension {
                    surface.draw_line(segment, &Style::thin())?;
                }
                surface.draw_line(&dim.line, &dim.style)?;
                surface.draw_text(&dim.label)?;
            }
            Primitive::Hatch { segments, style } => {
                for segment in segments {
                    surface.draw_line(segment, style)?;
                }
            }
            Primitive::Text(label) => surface.draw_text(label)?,
        }
    }

    log::debug!(
        "rendered '{}': {} primitives",
        drawing.title,
        drawing.primitives.len()
    );
    Ok(())
}

/// Split a polyline into the visible pieces of a dash pattern.
///
/// The pattern runs continuously across vertices; a solid pattern returns the
/// polyline's own segments.
pub fn dash_segments(points: &[Point2<f64>], pattern: DashPattern) -> Vec<Segment> {
    let lengths = pattern.lengths();
    let mut out = Vec::new();

    if lengths.is_empty() {
        out.extend(points.windows(2).map(|w| [w[0], w[1]]));
        return out;
    }

    let mut index = 0;
    let mut remaining = lengths[0];

    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let length = (b - a).norm();
        if length <= f64::EPSILON {
            continue;
        }
        let dir = (b - a) / length;

        let mut t = 0.0;
        while t < length {
            let step = remaining.min(length - t);
            if index % 2 == 0 {
                out.push([a + dir * t, a + dir * (t + step)]);
            }
            t += step;
            remaining -= step;
            if remaining <= 1e-12 {
                index = (index + 1) % lengths.len();
                remaining = lengths[index];
            }
        }
    }

    out
}

/// Closed polygon approximating a circle; the first point is repeated last
pub fn tessellate_circle(center: Point2<f64>, radius: f64, steps: usize) -> Vec<Point2<f64>> {
    let steps = steps.max(8);
    (0..=steps)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i % steps) as f64 / steps as f64;
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DrawingVariant, LayoutConfig};
    use crate::drawing::compose;
    use crate::presets;
    use approx::assert_abs_diff_eq;

    #[derive(Debug, PartialEq)]
    enum Call {
        AspectEqual,
        Bounds,
        Line(usize),
        Circle,
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Surface for Recorder {
        fn set_aspect_equal(&mut self) {
            self.calls.push(Call::AspectEqual);
        }

        fn set_bounds(&mut self, _bounds: Bounds) -> Result<(), RenderError> {
            self.calls.push(Call::Bounds);
            Ok(())
        }

        fn draw_line(&mut self, points: &[Point2<f64>], _style: &Style) -> Result<(), RenderError> {
            self.calls.push(Call::Line(points.len()));
            Ok(())
        }

        fn draw_circle(
            &mut self,
            _center: Point2<f64>,
            _radius: f64,
            _style: &Style,
        ) -> Result<(), RenderError> {
            self.calls.push(Call::Circle);
            Ok(())
        }

        fn draw_text(&mut self, label: &Label) -> Result<(), RenderError> {
            self.calls.push(Call::Text(label.text.clone()));
            Ok(())
        }

        fn save(&mut self, _path: &Path, format: OutputFormat, _dpi: u32) -> Result<(), RenderError> {
            Err(RenderError::UnsupportedFormat(format))
        }
    }

    #[test]
    fn test_render_order() {
        let profile = presets::stepped_shaft_profile().unwrap();
        let drawing = compose(&profile, &LayoutConfig::default(), &DrawingVariant::default()).unwrap();
        let mut surface = Recorder::default();
        render(&drawing, &mut surface).unwrap();

        assert_eq!(surface.calls[0], Call::AspectEqual);
        assert_eq!(surface.calls[1], Call::Bounds);
        assert_eq!(surface.calls.iter().filter(|c| **c == Call::Circle).count(), 4);

        let texts = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Text(_)))
            .count();
        let expected = drawing.dimensions().count() + 4;
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_dimension_dispatch() {
        let profile = presets::simple_cylinder_profile().unwrap();
        let mut drawing =
            compose(&profile, &LayoutConfig::default(), &DrawingVariant::default()).unwrap();
        drawing.primitives.retain(|p| matches!(p, Primitive::Dimension(_)));
        let count = drawing.primitives.len();

        let mut surface = Recorder::default();
        render(&drawing, &mut surface).unwrap();
        let lines = surface
            .calls
            .iter()
            .filter(|c| **c == Call::Line(2))
            .count();
        assert_eq!(lines, 3 * count);
    }

    #[test]
    fn test_solid_pattern_keeps_segments() {
        let points = [Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(5.0, 5.0)];
        let pieces = dash_segments(&points, DashPattern::Solid);
        assert_eq!(pieces.len(), 2);
    }

    #[test]
    fn test_dashed_line() {
        let points = [Point2::new(0.0, 0.0), Point2::new(6.0, 0.0)];
        let pieces = dash_segments(&points, DashPattern::Dashed);
        assert_eq!(pieces.len(), 2);
        assert_abs_diff_eq!(pieces[0][1].x, 2.0);
        assert_abs_diff_eq!(pieces[1][0].x, 3.0);
        assert_abs_diff_eq!(pieces[1][1].x, 5.0);
    }

    #[test]
    fn test_dash_continues_across_vertex() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 5.0),
        ];
        let pieces = dash_segments(&points, DashPattern::Dashed);
        // The first dash is split at the corner.
        assert_abs_diff_eq!(pieces[1][0].y, 0.0);
        assert_abs_diff_eq!(pieces[1][1].y, 1.0);
    }

    #[test]
    fn test_tessellated_circle() {
        let center = Point2::new(3.0, 4.0);
        let points = tessellate_circle(center, 2.5, 64);
        assert_eq!(points.len(), 65);
        assert_eq!(points.first(), points.last());
        for p in &points {
            assert_abs_diff_eq!((p - center).norm(), 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(Path::new("drawing")), None);
        assert_eq!(RasterOptions::default().pixel_size(), (1500, 1200));
    }
}
