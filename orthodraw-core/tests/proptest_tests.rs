/// Property-based tests for profile, layout and annotation invariants.
use std::collections::HashMap;

use nalgebra::Point2;
use proptest::prelude::*;

use orthodraw_core::drawing::{overall_length_dimension, section_length_dimensions};
use orthodraw_core::engine::{end_view, profile_outline, thread_convention};
use orthodraw_core::{
    layout_views, DrawingVariant, LayoutConfig, Orientation, PartProfile, Primitive,
    SectionDescriptor, Style, ViewEnd, ViewFrame, ViewOrder,
};

const TOL: f64 = 1e-9;

/// One section: (length, major diameter, threaded)
fn arb_section() -> impl Strategy<Value = (f64, f64, bool)> {
    (0.5f64..60.0, 1.0f64..40.0, any::<bool>())
}

fn arb_profile() -> impl Strategy<Value = PartProfile> {
    prop::collection::vec(arb_section(), 1..8).prop_map(|rows| {
        let sections = rows.into_iter().map(|(length, major, threaded)| {
            if threaded {
                SectionDescriptor::threaded(length, major, major * 0.85, format!("M{major:.1}x1"))
            } else {
                SectionDescriptor::plain(length, major)
            }
        });
        PartProfile::stacked(sections).expect("generated sections are valid")
    })
}

fn arb_view_order() -> impl Strategy<Value = ViewOrder> {
    prop_oneof![Just(ViewOrder::EndViewFront), Just(ViewOrder::ProfileFront)]
}

fn arb_layout() -> impl Strategy<Value = LayoutConfig> {
    (5.0f64..40.0, 2.0f64..20.0, 0.5f64..3.0).prop_map(|(view_spacing, dim_offset, scale)| {
        LayoutConfig {
            view_spacing,
            dim_offset,
            scale,
            ..LayoutConfig::default()
        }
    })
}

/// Distance of a point from a profile frame's centerline
fn radial_distance(frame: &ViewFrame, p: &Point2<f64>) -> f64 {
    match frame.orientation {
        Orientation::Vertical => (p.x - frame.centerline_coordinate()).abs(),
        _ => (p.y - frame.centerline_coordinate()).abs(),
    }
}

proptest! {
    #[test]
    fn totals_follow_sections(profile in arb_profile()) {
        let sum: f64 = profile.sections().iter().map(|s| s.length).sum();
        let max = profile.sections().iter().map(|s| s.major_diameter).fold(0.0, f64::max);
        prop_assert!((profile.total_length() - sum).abs() < TOL);
        prop_assert_eq!(profile.max_diameter(), max);

        let last = &profile.sections()[profile.len() - 1];
        prop_assert!((last.end_offset() - profile.total_length()).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn gaps_are_rejected(length in 1.0f64..10.0, gap in 0.01f64..5.0) {
        let sections = vec![
            SectionDescriptor::plain(length, 5.0),
            SectionDescriptor::plain(length, 4.0).at(length + gap),
        ];
        prop_assert!(PartProfile::new(sections).is_err());
    }
}

proptest! {
    #[test]
    fn outline_is_closed(profile in arb_profile()) {
        let frame = ViewFrame::new(
            orthodraw_core::ViewRole::Top,
            Point2::origin(),
            Orientation::Horizontal,
            1.0,
        );
        let mut degree: HashMap<(i64, i64), usize> = HashMap::new();
        for primitive in profile_outline(&profile, &frame) {
            let Primitive::Polyline { points, .. } = primitive else {
                panic!("outline must be made of lines");
            };
            for p in [points[0], points[points.len() - 1]] {
                let key = ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64);
                *degree.entry(key).or_default() += 1;
            }
        }
        prop_assert!(degree.values().all(|&d| d == 2));
    }
}

proptest! {
    #[test]
    fn end_view_has_one_solid_circle(profile in arb_profile(), right in any::<bool>()) {
        let end = if right { ViewEnd::Right } else { ViewEnd::Left };
        let frame = ViewFrame::new(
            orthodraw_core::ViewRole::Front,
            Point2::origin(),
            Orientation::EndOn,
            1.0,
        );
        let circles = end_view(&profile, &frame, end);
        prop_assert_eq!(circles.len(), profile.distinct_diameters().len());

        let radii: Vec<f64> = circles
            .iter()
            .map(|c| match c {
                Primitive::Circle { radius, .. } => *radius,
                _ => f64::NAN,
            })
            .collect();
        prop_assert!(radii.windows(2).all(|w| w[0] > w[1]));

        let solid = circles
            .iter()
            .filter(|c| matches!(c, Primitive::Circle { style, .. } if *style == Style::outline()))
            .count();
        prop_assert_eq!(solid, 1);
    }
}

proptest! {
    #[test]
    fn views_never_overlap(
        profile in arb_profile(),
        config in arb_layout(),
        view_order in arb_view_order(),
    ) {
        let variant = DrawingVariant { view_order, ..DrawingVariant::default() };
        let layout = layout_views(&profile, &config, &variant);
        let boxes: Vec<_> = layout
            .frames()
            .iter()
            .map(|f| f.body_bounds(profile.total_length(), profile.max_radius()))
            .collect();

        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                prop_assert!(boxes[i].separation(&boxes[j]) >= config.view_spacing - 1e-6);
            }
        }

        let end = layout.end_view().expect("one end view");
        for frame in layout.frames().iter().filter(|f| f.is_profile()) {
            let aligned = match frame.orientation {
                Orientation::Horizontal => (frame.origin.y - end.origin.y).abs() < TOL,
                _ => (frame.origin.x - end.origin.x).abs() < TOL,
            };
            let shares_start = frame.origin.x == layout.front.origin.x;
            prop_assert!(aligned || shares_start);
        }
    }
}

proptest! {
    #[test]
    fn dimensions_clear_the_outline(
        profile in arb_profile(),
        view_order in arb_view_order(),
    ) {
        let config = LayoutConfig::default();
        let variant = DrawingVariant { view_order, ..DrawingVariant::default() };
        let layout = layout_views(&profile, &config, &variant);
        let min_distance = profile.max_radius() + config.dim_offset;

        for frame in layout.frames().iter().filter(|f| f.is_profile()) {
            let mut dims = vec![overall_length_dimension(&profile, frame, &config)];
            let side = if frame.orientation == Orientation::Vertical { -1.0 } else { 1.0 };
            dims.extend(section_length_dimensions(&profile, frame, &config, side));
            for (index, section) in profile.threaded_sections() {
                dims.extend(
                    thread_convention(section, index, &profile, frame, &config, &variant, true)
                        .into_iter()
                        .filter(|p| matches!(p, Primitive::Dimension(_))),
                );
            }

            for dim in dims {
                let Primitive::Dimension(dim) = dim else {
                    panic!("expected a dimension");
                };
                for p in dim.line {
                    prop_assert!(radial_distance(frame, &p) >= min_distance - 1e-6);
                }
            }
        }
    }
}
