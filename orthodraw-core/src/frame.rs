/// View frames: where and how one orthographic view sits in drawing space
use nalgebra::{Matrix3, Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::primitive::Bounds;

/// How the part axis appears in a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Profile with the axis along drawing x
    Horizontal,
    /// Profile with the axis along drawing y
    Vertical,
    /// Looking down the axis; sections appear as circles
    EndOn,
}

/// Which of the three orthographic views a frame holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewRole {
    Front,
    Top,
    RightSide,
}

impl ViewRole {
    pub fn title(&self) -> &'static str {
        match self {
            ViewRole::Front => "FRONT VIEW",
            ViewRole::Top => "TOP VIEW",
            ViewRole::RightSide => "RIGHT SIDE VIEW",
        }
    }
}

/// Placement of a view.
///
/// Local coordinates are `(axial, radial)`. For profile views the origin is
/// axial 0 on the centerline; for end-on views it is the circle center and
/// local coordinates map straight onto drawing x/y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub role: ViewRole,
    pub origin: Point2<f64>,
    pub orientation: Orientation,
    pub scale: f64,
}

impl ViewFrame {
    pub fn new(role: ViewRole, origin: Point2<f64>, orientation: Orientation, scale: f64) -> Self {
        Self {
            role,
            origin,
            orientation,
            scale,
        }
    }

    /// Homogeneous local-to-drawing transform
    pub fn transform(&self) -> Matrix3<f64> {
        let basis = match self.orientation {
            Orientation::Horizontal | Orientation::EndOn => Matrix3::identity(),
            // (axial, radial) -> (radial, axial)
            Orientation::Vertical => Matrix3::new(
                0.0, 1.0, 0.0,
                1.0, 0.0, 0.0,
                0.0, 0.0, 1.0,
            ),
        };
        Matrix3::new_translation(&self.origin.coords) * Matrix3::new_scaling(self.scale) * basis
    }

    /// Map a local `(axial, radial)` point into drawing space
    pub fn to_drawing(&self, axial: f64, radial: f64) -> Point2<f64> {
        self.transform().transform_point(&Point2::new(axial, radial))
    }

    /// Unit vector along the part axis in drawing space
    pub fn axis_direction(&self) -> Vector2<f64> {
        match self.orientation {
            Orientation::Vertical => Vector2::y(),
            Orientation::Horizontal | Orientation::EndOn => Vector2::x(),
        }
    }

    pub fn is_profile(&self) -> bool {
        self.orientation != Orientation::EndOn
    }

    /// Drawing coordinate shared by the centerline, perpendicular to the axis.
    ///
    /// For an end-on view this is the center's y; use `origin` for both axes.
    pub fn centerline_coordinate(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.origin.x,
            Orientation::Horizontal | Orientation::EndOn => self.origin.y,
        }
    }

    /// Box occupied by the part body in this view
    pub fn body_bounds(&self, total_length: f64, max_radius: f64) -> Bounds {
        match self.orientation {
            Orientation::EndOn => Bounds::from_points([
                self.to_drawing(-max_radius, -max_radius),
                self.to_drawing(max_radius, max_radius),
            ]),
            Orientation::Horizontal | Orientation::Vertical => Bounds::from_points([
                self.to_drawing(0.0, -max_radius),
                self.to_drawing(total_length, max_radius),
            ]),
        }
    }
}
