/// Assembly of a complete drawing from a profile, a layout and a variant
use nalgebra::Point2;

use crate::config::{DrawingVariant, LayoutConfig};
use crate::dimension::{dimension, format_diameter, format_length, DimensionOrientation};
use crate::engine::{
    centerlines, dimension_orientation, end_view, profile_outline, thread_convention,
};
use crate::error::ValidationError;
use crate::frame::{Orientation, ViewFrame, ViewRole};
use crate::layout::{layout_views, ViewLayout};
use crate::primitive::{Anchor, Bounds, Dimension, HAlign, Label, Primitive, Style, VAlign};
use crate::profile::PartProfile;

/// Everything a surface needs to render one drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub title: String,
    pub layout: ViewLayout,
    pub primitives: Vec<Primitive>,
    pub bounds: Bounds,
}

impl Drawing {
    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Dimension(d) => Some(d),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
    }
}

/// Build every primitive of the drawing.
///
/// Fails only when the layout configuration is invalid; the profile is
/// already validated by construction.
pub fn compose(
    profile: &PartProfile,
    config: &LayoutConfig,
    variant: &DrawingVariant,
) -> Result<Drawing, ValidationError> {
    config.validate()?;

    for (index, section) in profile.threaded_sections() {
        if section.thread_label.is_none() {
            log::warn!("threaded section {index} has no label; callout uses its nominal diameter");
        }
    }

    let layout = layout_views(profile, config, variant);
    let primary = layout.primary_profile().map(|f| f.role);
    let mut primitives = Vec::new();

    for frame in layout.frames() {
        let mut view = Vec::new();

        if frame.is_profile() {
            let is_primary = Some(frame.role) == primary;
            view.extend(profile_outline(profile, &frame));
            view.extend(centerlines(profile, &frame));
            for (index, section) in profile.sections().iter().enumerate() {
                view.extend(thread_convention(
                    section, index, profile, &frame, config, variant, is_primary,
                ));
            }
            if is_primary {
                view.push(overall_length_dimension(profile, &frame, config));
                view.extend(diameter_dimensions(profile, &frame, config));
            } else {
                let side = match frame.orientation {
                    Orientation::Vertical => -1.0,
                    _ => 1.0,
                };
                view.extend(section_length_dimensions(profile, &frame, config, side));
            }
        } else {
            view.extend(end_view(profile, &frame, variant.end_view_end));
            view.extend(centerlines(profile, &frame));
        }

        view.push(view_title(&frame, &view, profile, variant, config));
        primitives.extend(view);
    }

    if variant.projection_lines {
        primitives.extend(projection_lines(profile, &layout));
    }

    let content = Bounds::from_points(primitives.iter().flat_map(|p| p.extent_points()));
    let title = variant.title.clone().unwrap_or_else(|| {
        format!(
            "Three-View Orthographic Drawing, L={}",
            format_length(profile.total_length())
        )
    });
    primitives.push(Primitive::Text(Label {
        position: Point2::new(
            (content.min.x + content.max.x) / 2.0,
            content.max.y + config.text_offset,
        ),
        text: title.clone(),
        anchor: Anchor::new(HAlign::Center, VAlign::Bottom),
        rotation: 0.0,
        size: config.title_size,
    }));

    let bounds = Bounds::from_points(primitives.iter().flat_map(|p| p.extent_points()))
        .grow(config.padding);

    log::debug!(
        "composed '{}': {} primitives, bounds {:.1} x {:.1}",
        variant.name,
        primitives.len(),
        bounds.width(),
        bounds.height()
    );

    Ok(Drawing {
        title,
        layout,
        primitives,
        bounds,
    })
}

/// Total length, below (or left of) the outline
pub fn overall_length_dimension(
    profile: &PartProfile,
    frame: &ViewFrame,
    config: &LayoutConfig,
) -> Primitive {
    let r = profile.max_radius();
    let length = profile.total_length();
    dimension(
        frame.to_drawing(0.0, -r),
        frame.to_drawing(length, -r),
        format_length(length),
        -config.dim_offset,
        dimension_orientation(frame),
        config,
    )
}

/// One diameter dimension per distinct diameter, stacked before the axial start
pub fn diameter_dimensions(
    profile: &PartProfile,
    frame: &ViewFrame,
    config: &LayoutConfig,
) -> Vec<Primitive> {
    let orientation = match dimension_orientation(frame) {
        DimensionOrientation::Horizontal => DimensionOrientation::Vertical,
        DimensionOrientation::Vertical => DimensionOrientation::Horizontal,
    };

    profile
        .distinct_diameters()
        .into_iter()
        .enumerate()
        .map(|(j, d)| {
            dimension(
                frame.to_drawing(0.0, -d / 2.0),
                frame.to_drawing(0.0, d / 2.0),
                format_diameter(d),
                -config.dim_offset * (1.5 + j as f64),
                orientation,
                config,
            )
        })
        .collect()
}

/// Length of every section, on the `side` (+1 or -1) of the outline
pub fn section_length_dimensions(
    profile: &PartProfile,
    frame: &ViewFrame,
    config: &LayoutConfig,
    side: f64,
) -> Vec<Primitive> {
    let r = side * profile.max_radius();
    profile
        .sections()
        .iter()
        .map(|section| {
            dimension(
                frame.to_drawing(section.start_offset, r),
                frame.to_drawing(section.end_offset(), r),
                format_length(section.length),
                side * config.dim_offset,
                dimension_orientation(frame),
                config,
            )
        })
        .collect()
}

/// Dotted lines carrying the end view's extents across to aligned profiles
pub fn projection_lines(profile: &PartProfile, layout: &ViewLayout) -> Vec<Primitive> {
    let Some(end) = layout.end_view() else {
        return Vec::new();
    };
    let style = Style::projection();
    let r = profile.max_radius() * end.scale;
    let mut out = Vec::new();

    for frame in layout.frames().iter().filter(|f| f.is_profile()) {
        let length = profile.total_length() * frame.scale;
        match frame.orientation {
            Orientation::Horizontal if (frame.origin.y - end.origin.y).abs() < 1e-9 => {
                let (from, to) = if frame.origin.x > end.origin.x {
                    (end.origin.x + r, frame.origin.x)
                } else {
                    (frame.origin.x + length, end.origin.x - r)
                };
                for y in [end.origin.y - r, end.origin.y + r] {
                    out.push(Primitive::line(Point2::new(from, y), Point2::new(to, y), style));
                }
            }
            Orientation::Vertical if (frame.origin.x - end.origin.x).abs() < 1e-9 => {
                let (from, to) = if frame.origin.y > end.origin.y {
                    (end.origin.y + r, frame.origin.y)
                } else {
                    (frame.origin.y + length, end.origin.y - r)
                };
                for x in [end.origin.x - r, end.origin.x + r] {
                    out.push(Primitive::line(Point2::new(x, from), Point2::new(x, to), style));
                }
            }
            _ => {}
        }
    }

    out
}

/// Title under a view, or above it for the top view
fn view_title(
    frame: &ViewFrame,
    view: &[Primitive],
    profile: &PartProfile,
    variant: &DrawingVariant,
    config: &LayoutConfig,
) -> Primitive {
    let extent = Bounds::from_points(view.iter().flat_map(|p| p.extent_points()));
    let body = frame.body_bounds(profile.total_length(), profile.max_radius());
    let x = (body.min.x + body.max.x) / 2.0;

    let text = if frame.orientation == Orientation::EndOn {
        let facing = profile.end_section(variant.end_view_end).major_diameter;
        format!("{} ({})", frame.role.title(), format_diameter(facing))
    } else {
        frame.role.title().to_string()
    };

    let (y, v) = if frame.role == ViewRole::Top {
        (extent.max.y + config.text_offset, VAlign::Bottom)
    } else {
        (extent.min.y - config.text_offset, VAlign::Top)
    };

    Primitive::Text(Label {
        position: Point2::new(x, y),
        text,
        anchor: Anchor::new(HAlign::Center, v),
        rotation: 0.0,
        size: config.title_size,
    })
}
