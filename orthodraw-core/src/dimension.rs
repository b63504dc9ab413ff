/// Generic dimension callouts and label formatting
use nalgebra::Point2;

use crate::config::LayoutConfig;
use crate::primitive::{Anchor, Dimension, HAlign, Label, Primitive, Style, VAlign};

/// Direction of the dimension line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionOrientation {
    /// Measures a distance along drawing x
    Horizontal,
    /// Measures a distance along drawing y; the label is rotated
    Vertical,
}

/// Dimension between two measured points.
///
/// The dimension line sits `offset` away from `p0`, perpendicular to
/// `orientation`; a negative offset places it below (horizontal) or to the
/// left (vertical). Extension lines run from each measured point to the line.
pub fn dimension(
    p0: Point2<f64>,
    p1: Point2<f64>,
    label: impl Into<String>,
    offset: f64,
    orientation: DimensionOrientation,
    config: &LayoutConfig,
) -> Primitive {
    let side = if offset < 0.0 { -1.0 } else { 1.0 };
    let text_gap = side * config.text_offset;

    let (extension, line, position, anchor, rotation) = match orientation {
        DimensionOrientation::Horizontal => {
            let y = p0.y + offset;
            let a = Point2::new(p0.x, y);
            let b = Point2::new(p1.x, y);
            let v = if side > 0.0 { VAlign::Bottom } else { VAlign::Top };
            (
                [[p0, a], [p1, b]],
                [a, b],
                Point2::new((p0.x + p1.x) / 2.0, y + text_gap),
                Anchor::new(HAlign::Center, v),
                0.0,
            )
        }
        DimensionOrientation::Vertical => {
            let x = p0.x + offset;
            let a = Point2::new(x, p0.y);
            let b = Point2::new(x, p1.y);
            let h = if side > 0.0 { HAlign::Left } else { HAlign::Right };
            (
                [[p0, a], [p1, b]],
                [a, b],
                Point2::new(x + text_gap, (p0.y + p1.y) / 2.0),
                Anchor::new(h, VAlign::Center),
                90.0,
            )
        }
    };

    Primitive::Dimension(Dimension {
        extension,
        line,
        label: Label {
            position,
            text: label.into(),
            anchor,
            rotation,
            size: config.font_size,
        },
        style: Style::dimension(),
    })
}

/// Length text: whole numbers without decimals, otherwise one decimal
pub fn format_length(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

pub fn format_diameter(value: f64) -> String {
    format!("Ø{value:.2}")
}
