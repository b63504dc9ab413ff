/// Drawable primitives produced by the layout engine
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::layout::text_height;

/// Average sans-serif glyph advance, as a fraction of the text height
const CHAR_WIDTH_EM: f64 = 0.6;

/// A straight segment in drawing space
pub type Segment = [Point2<f64>; 2];

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const GREY: Color = Color {
        r: 96,
        g: 96,
        b: 96,
    };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// Line pattern, in drawing units (mm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashPattern {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl DashPattern {
    /// Alternating on/off lengths; empty for a continuous line
    pub fn lengths(&self) -> &'static [f64] {
        match self {
            DashPattern::Solid => &[],
            DashPattern::Dashed => &[2.0, 1.0],
            DashPattern::DashDot => &[4.0, 1.0, 0.5, 1.0],
            DashPattern::Dotted => &[0.3, 0.8],
        }
    }
}

/// Stroke style; `line_width` is in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub line_width: f64,
    pub dash: DashPattern,
    pub color: Color,
}

impl Style {
    pub const fn new(line_width: f64, dash: DashPattern, color: Color) -> Self {
        Self {
            line_width,
            dash,
            color,
        }
    }

    /// Visible part edges
    pub const fn outline() -> Self {
        Self::new(1.5, DashPattern::Solid, Color::BLACK)
    }

    /// Hidden edges
    pub const fn hidden() -> Self {
        Self::new(1.0, DashPattern::Dashed, Color::BLACK)
    }

    pub const fn center() -> Self {
        Self::new(0.8, DashPattern::DashDot, Color::BLACK)
    }

    /// Thread roots, hatching, extension lines
    pub const fn thin() -> Self {
        Self::new(0.5, DashPattern::Solid, Color::BLACK)
    }

    pub const fn dimension() -> Self {
        Self::new(0.8, DashPattern::Solid, Color::BLACK)
    }

    pub const fn projection() -> Self {
        Self::new(0.5, DashPattern::Dotted, Color::GREY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Which point of the text box sits on the label position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl Anchor {
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }

    pub const CENTER: Anchor = Anchor::new(HAlign::Center, VAlign::Center);
}

/// Positioned text; `rotation` is counter-clockwise degrees, `size` is points
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Point2<f64>,
    pub text: String,
    pub anchor: Anchor,
    pub rotation: f64,
    pub size: f64,
}

impl Label {
    pub fn is_vertical(&self) -> bool {
        (self.rotation - 90.0).abs() < 1e-9
    }

    /// Estimated on-page box of the text, as opposite corners.
    ///
    /// The anchor refers to this box as it appears on the page, so a label
    /// reading upwards is one line wide and its run of glyphs tall.
    pub fn extent(&self) -> [Point2<f64>; 2] {
        let line = text_height(self.size);
        let run = self.text.chars().count() as f64 * CHAR_WIDTH_EM * line;
        let (w, h) = if self.is_vertical() {
            (line, run)
        } else {
            (run, line)
        };

        let x = match self.anchor.h {
            HAlign::Left => self.position.x,
            HAlign::Center => self.position.x - w / 2.0,
            HAlign::Right => self.position.x - w,
        };
        let y = match self.anchor.v {
            VAlign::Bottom => self.position.y,
            VAlign::Center => self.position.y - h / 2.0,
            VAlign::Top => self.position.y - h,
        };
        [Point2::new(x, y), Point2::new(x + w, y + h)]
    }
}

/// A dimension callout: two extension lines, the dimension line and its label
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub extension: [Segment; 2],
    pub line: Segment,
    pub label: Label,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<Point2<f64>>,
        style: Style,
    },
    Circle {
        center: Point2<f64>,
        radius: f64,
        style: Style,
    },
    Centerline {
        from: Point2<f64>,
        to: Point2<f64>,
        style: Style,
    },
    Dimension(Dimension),
    Hatch {
        segments: Vec<Segment>,
        style: Style,
    },
    Text(Label),
}

impl Primitive {
    pub fn line(from: Point2<f64>, to: Point2<f64>, style: Style) -> Self {
        Primitive::Polyline {
            points: vec![from, to],
            style,
        }
    }

    /// Every point that must stay inside the drawing bounds
    pub fn extent_points(&self) -> Vec<Point2<f64>> {
        match self {
            Primitive::Polyline { points, .. } => points.clone(),
            Primitive::Circle { center, radius, .. } => vec![
                Point2::new(center.x - radius, center.y - radius),
                Point2::new(center.x + radius, center.y + radius),
            ],
            Primitive::Centerline { from, to, .. } => vec![*from, *to],
            Primitive::Dimension(dim) => {
                let mut points: Vec<Point2<f64>> = dim.extension.iter().flatten().copied().collect();
                points.extend(dim.line);
                points.extend(dim.label.extent());
                points
            }
            Primitive::Hatch { segments, .. } => segments.iter().flatten().copied().collect(),
            Primitive::Text(label) => label.extent().to_vec(),
        }
    }
}

/// Axis-aligned box in drawing space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    /// A box containing nothing; `include` grows it
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            min: Point2::new(x_min, y_min),
            max: Point2::new(x_max, y_max),
        }
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include(p);
        }
        bounds
    }

    pub fn include(&mut self, p: Point2<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn grow(&self, margin: f64) -> Self {
        Self::new(
            self.min.x - margin,
            self.max.x + margin,
            self.min.y - margin,
            self.max.y + margin,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Distance separating two boxes along the clearer axis; negative when they overlap
    pub fn separation(&self, other: &Bounds) -> f64 {
        [
            other.min.x - self.max.x,
            self.min.x - other.max.x,
            other.min.y - self.max.y,
            self.min.y - other.max.y,
        ]
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.separation(other) < 0.0
    }
}
