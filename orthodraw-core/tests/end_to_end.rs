/// End-to-end drawing of the built-in parts.
use approx::assert_abs_diff_eq;
use nalgebra::Point2;

use orthodraw_core::drawing::compose;
use orthodraw_core::presets;
use orthodraw_core::{
    render, Bounds, DrawingVariant, Label, LayoutConfig, OutputFormat, Primitive, RenderError,
    Style, Surface, ViewOrder, ViewRole,
};

/// Counts what a surface is asked to draw
#[derive(Default)]
struct Tally {
    bounds: Option<Bounds>,
    lines: usize,
    circles: Vec<(f64, Style)>,
    texts: Vec<String>,
}

impl Surface for Tally {
    fn set_aspect_equal(&mut self) {}

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError> {
        self.bounds = Some(bounds);
        Ok(())
    }

    fn draw_line(&mut self, _points: &[Point2<f64>], _style: &Style) -> Result<(), RenderError> {
        self.bounds.ok_or(RenderError::BoundsNotSet)?;
        self.lines += 1;
        Ok(())
    }

    fn draw_circle(
        &mut self,
        _center: Point2<f64>,
        radius: f64,
        style: &Style,
    ) -> Result<(), RenderError> {
        self.circles.push((radius * 2.0, *style));
        Ok(())
    }

    fn draw_text(&mut self, label: &Label) -> Result<(), RenderError> {
        self.texts.push(label.text.clone());
        Ok(())
    }

    fn save(
        &mut self,
        _path: &std::path::Path,
        format: OutputFormat,
        _dpi: u32,
    ) -> Result<(), RenderError> {
        Err(RenderError::UnsupportedFormat(format))
    }
}

#[test]
fn stepped_shaft_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();

    let profile = presets::stepped_shaft_profile().unwrap();
    assert_abs_diff_eq!(profile.total_length(), 81.5, epsilon = 1e-9);
    assert_abs_diff_eq!(profile.max_diameter(), 10.05);

    let drawing = compose(&profile, &LayoutConfig::default(), &DrawingVariant::default()).unwrap();
    let primary = drawing.layout.primary_profile().unwrap();
    assert_eq!(primary.role, ViewRole::RightSide);

    let callouts: Vec<(String, f64)> = drawing
        .dimensions()
        .filter(|d| d.label.text.starts_with('M'))
        .map(|d| (d.label.text.clone(), d.label.position.x - primary.origin.x))
        .collect();
    assert_eq!(callouts.len(), 2);
    assert_eq!(callouts[0].0, "M10x1.25 L=7.5");
    assert_abs_diff_eq!(callouts[0].1, 6.75, epsilon = 1e-9);
    assert_eq!(callouts[1].0, "M8x1.0 L=7.0");
    assert_abs_diff_eq!(callouts[1].1, 78.0, epsilon = 1e-9);

    let mut tally = Tally::default();
    render(&drawing, &mut tally).unwrap();
    assert_eq!(tally.bounds, Some(drawing.bounds));

    let diameters: Vec<f64> = tally.circles.iter().map(|(d, _)| *d).collect();
    assert_eq!(diameters, vec![10.05, 10.0, 8.4, 8.0]);
    let solid = tally
        .circles
        .iter()
        .filter(|(_, s)| *s == Style::outline())
        .count();
    assert_eq!(solid, 1);
    assert!(tally.texts.iter().any(|t| t == "FRONT VIEW (Ø8.40)"));
}

#[test]
fn every_preset_composes_inside_its_bounds() {
    for preset in presets::all().unwrap() {
        let drawing = compose(&preset.profile, &preset.layout, &preset.variant).unwrap();
        for primitive in &drawing.primitives {
            for p in primitive.extent_points() {
                assert!(drawing.bounds.contains(&p), "{} escapes its bounds", preset.variant.name);
            }
        }
        if let Some(title) = &preset.variant.title {
            assert_eq!(&drawing.title, title);
        }
    }
}

#[test]
fn simple_cylinder_has_one_solid_circle() {
    let preset = presets::simple_cylinder().unwrap();
    let drawing = compose(&preset.profile, &preset.layout, &preset.variant).unwrap();

    let circles: Vec<&Primitive> = drawing.circles().collect();
    assert_eq!(circles.len(), 1);
    assert!(matches!(
        circles[0],
        Primitive::Circle { radius, style, .. } if *radius == 5.0 && *style == Style::outline()
    ));
    // No threads, so no callouts: overall length, one diameter, and the
    // secondary profile's single section length.
    assert_eq!(drawing.dimensions().count(), 3);
}

#[test]
fn hatched_preset_emits_hatching() {
    let preset = presets::stepped_shaft().unwrap();
    let drawing = compose(&preset.profile, &preset.layout, &preset.variant).unwrap();
    let hatches = drawing
        .primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Hatch { .. }))
        .count();
    // Two threaded sections in two profile views.
    assert_eq!(hatches, 4);
}

#[test]
fn profile_front_places_end_view_right() {
    let preset = presets::stepped_shaft_profile_front().unwrap();
    assert_eq!(preset.variant.view_order, ViewOrder::ProfileFront);
    let drawing = compose(&preset.profile, &preset.layout, &preset.variant).unwrap();

    let end = drawing.layout.end_view().unwrap();
    assert_eq!(end.role, ViewRole::RightSide);
    let front = drawing.layout.front;
    assert!(end.origin.x > front.origin.x + preset.profile.total_length());
    assert_abs_diff_eq!(end.origin.y, front.origin.y);
}
