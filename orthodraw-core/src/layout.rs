/// Placement of the three orthographic views
use nalgebra::{Point2, Vector2};

use crate::config::{DrawingVariant, LayoutConfig, ViewOrder};
use crate::frame::{Orientation, ViewFrame, ViewRole};
use crate::profile::PartProfile;

/// Millimetres per typographic point
pub const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Height of a text line, in drawing units
pub fn text_height(size_pt: f64) -> f64 {
    size_pt * MM_PER_POINT
}

/// The three frames of a drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLayout {
    pub front: ViewFrame,
    pub top: ViewFrame,
    pub right_side: ViewFrame,
}

impl ViewLayout {
    pub fn frames(&self) -> [ViewFrame; 3] {
        [self.front, self.top, self.right_side]
    }

    pub fn get(&self, role: ViewRole) -> &ViewFrame {
        match role {
            ViewRole::Front => &self.front,
            ViewRole::Top => &self.top,
            ViewRole::RightSide => &self.right_side,
        }
    }

    pub fn end_view(&self) -> Option<&ViewFrame> {
        [&self.front, &self.top, &self.right_side]
            .into_iter()
            .find(|f| f.orientation == Orientation::EndOn)
    }

    /// The horizontal profile that carries callouts, overall length and diameters
    pub fn primary_profile(&self) -> Option<&ViewFrame> {
        [&self.front, &self.right_side, &self.top]
            .into_iter()
            .find(|f| f.orientation == Orientation::Horizontal)
    }
}

/// Space left of a profile's axial start taken by the stacked diameter dimensions
pub fn diameter_gutter(profile: &PartProfile, config: &LayoutConfig) -> f64 {
    let count = profile.distinct_diameters().len() as f64;
    config.dim_offset * (0.5 + count) + config.text_offset + text_height(config.font_size)
}

/// Height above the outline taken by the staggered thread callouts
pub fn callout_height(profile: &PartProfile, config: &LayoutConfig) -> f64 {
    profile
        .threaded_sections()
        .map(|(index, _)| config.dim_offset * (1.0 + index as f64 * config.callout_stagger))
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))))
        .map_or(0.0, |h| h + config.text_offset + text_height(config.font_size))
}

/// Assign frames so views never overlap and stay aligned.
///
/// The end view's center shares its perpendicular coordinate with the
/// centerline of each profile it projects onto, and every view keeps at least
/// `view_spacing` from its neighbours.
pub fn layout_views(
    profile: &PartProfile,
    config: &LayoutConfig,
    variant: &DrawingVariant,
) -> ViewLayout {
    let scale = config.scale;
    let r = profile.max_radius() * scale;
    let length = profile.total_length() * scale;
    let origin = Point2::new(config.padding, config.padding);

    let layout = match variant.view_order {
        ViewOrder::EndViewFront => {
            let center = origin + Vector2::new(r, r);
            let right_x = center.x + r + config.view_spacing + diameter_gutter(profile, config);
            let top_y = center.y + r + config.view_spacing + 2.0 * config.dim_offset;
            ViewLayout {
                front: ViewFrame::new(ViewRole::Front, center, Orientation::EndOn, scale),
                top: ViewFrame::new(
                    ViewRole::Top,
                    Point2::new(center.x, top_y),
                    Orientation::Vertical,
                    scale,
                ),
                right_side: ViewFrame::new(
                    ViewRole::RightSide,
                    Point2::new(right_x, center.y),
                    Orientation::Horizontal,
                    scale,
                ),
            }
        }
        ViewOrder::ProfileFront => {
            let front = Point2::new(origin.x, origin.y + r);
            let top_y = front.y + 2.0 * r + callout_height(profile, config) + config.view_spacing;
            let end_x = front.x + length + config.view_spacing + r;
            ViewLayout {
                front: ViewFrame::new(ViewRole::Front, front, Orientation::Horizontal, scale),
                top: ViewFrame::new(
                    ViewRole::Top,
                    Point2::new(front.x, top_y),
                    Orientation::Horizontal,
                    scale,
                ),
                right_side: ViewFrame::new(
                    ViewRole::RightSide,
                    Point2::new(end_x, front.y),
                    Orientation::EndOn,
                    scale,
                ),
            }
        }
    };

    log::debug!(
        "{:?} layout: front {:?}, top {:?}, right side {:?}",
        variant.view_order,
        layout.front.origin,
        layout.top.origin,
        layout.right_side.origin
    );

    layout
}
