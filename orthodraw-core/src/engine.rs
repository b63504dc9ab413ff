/// Per-view primitive generators: outlines, end views, centerlines and threads
use crate::config::{DrawingVariant, HatchStyle, LayoutConfig};
use crate::dimension::{dimension, format_length, DimensionOrientation};
use crate::frame::{Orientation, ViewFrame};
use crate::primitive::{Primitive, Segment, Style};
use crate::profile::{PartProfile, SectionDescriptor, ViewEnd, TOLERANCE};

/// Stepped silhouette of a profile view.
///
/// Emits the upper and lower boundary of every section, a step edge on both
/// sides wherever the diameter changes, and full-diameter caps at both ends.
pub fn profile_outline(profile: &PartProfile, frame: &ViewFrame) -> Vec<Primitive> {
    let style = Style::outline();
    let sections = profile.sections();
    let mut out = Vec::with_capacity(sections.len() * 4 + 2);

    for (i, section) in sections.iter().enumerate() {
        let r = section.major_radius();
        let (a0, a1) = (section.start_offset, section.end_offset());

        for side in [1.0, -1.0] {
            out.push(Primitive::line(
                frame.to_drawing(a0, side * r),
                frame.to_drawing(a1, side * r),
                style,
            ));
        }

        if i > 0 {
            let prev_r = sections[i - 1].major_radius();
            if (prev_r - r).abs() > TOLERANCE {
                for side in [1.0, -1.0] {
                    out.push(Primitive::line(
                        frame.to_drawing(a0, side * prev_r),
                        frame.to_drawing(a0, side * r),
                        style,
                    ));
                }
            }
        }
    }

    let first = profile.end_section(ViewEnd::Left);
    let last = profile.end_section(ViewEnd::Right);
    for (axial, r) in [
        (0.0, first.major_radius()),
        (profile.total_length(), last.major_radius()),
    ] {
        out.push(Primitive::line(
            frame.to_drawing(axial, -r),
            frame.to_drawing(axial, r),
            style,
        ));
    }

    out
}

/// Concentric circles of an end-on view, largest first.
///
/// Only the diameter of the section facing the viewer is visible; every other
/// step lies behind it and is drawn hidden.
pub fn end_view(profile: &PartProfile, frame: &ViewFrame, end: ViewEnd) -> Vec<Primitive> {
    let facing = profile.end_section(end).major_diameter;

    profile
        .distinct_diameters()
        .into_iter()
        .map(|d| {
            let style = if (d - facing).abs() <= TOLERANCE {
                Style::outline()
            } else {
                Style::hidden()
            };
            Primitive::Circle {
                center: frame.origin,
                radius: d / 2.0 * frame.scale,
                style,
            }
        })
        .collect()
}

/// Axis line of a profile view, or the crosshair of an end view
pub fn centerlines(profile: &PartProfile, frame: &ViewFrame) -> Vec<Primitive> {
    let style = Style::center();
    match frame.orientation {
        Orientation::Horizontal | Orientation::Vertical => vec![Primitive::Centerline {
            from: frame.to_drawing(0.0, 0.0),
            to: frame.to_drawing(profile.total_length(), 0.0),
            style,
        }],
        Orientation::EndOn => {
            let r = profile.max_radius();
            vec![
                Primitive::Centerline {
                    from: frame.to_drawing(-r, 0.0),
                    to: frame.to_drawing(r, 0.0),
                    style,
                },
                Primitive::Centerline {
                    from: frame.to_drawing(0.0, -r),
                    to: frame.to_drawing(0.0, r),
                    style,
                },
            ]
        }
    }
}

/// Axial position of the thread runout marker
pub fn termination_offset(section: &SectionDescriptor, config: &LayoutConfig) -> f64 {
    section.end_offset() - config.termination_fraction * section.length
}

/// Text of a thread callout, e.g. `M10x1.25 L=7.5` or `M8x1.0 L=7.0`
pub fn thread_callout_text(section: &SectionDescriptor) -> String {
    let designation = section
        .thread_label
        .clone()
        .unwrap_or_else(|| format!("M{}", format_length(section.major_diameter)));
    let length = if section.length.fract() == 0.0 {
        format!("{:.1}", section.length)
    } else {
        section.length.to_string()
    };
    format!("{designation} L={length}")
}

/// Drafting convention for one threaded section in a profile view.
///
/// `index` is the section's position in the profile and staggers callouts
/// vertically; `annotate` adds the callout above the outline.
pub fn thread_convention(
    section: &SectionDescriptor,
    index: usize,
    profile: &PartProfile,
    frame: &ViewFrame,
    config: &LayoutConfig,
    variant: &DrawingVariant,
    annotate: bool,
) -> Vec<Primitive> {
    if !section.is_threaded || !frame.is_profile() {
        return Vec::new();
    }

    let thin = Style::thin();
    let r = section.major_radius();
    let (a0, a1) = (section.start_offset, section.end_offset());
    let mut out = Vec::new();

    if variant.thread_render.draws_minor_diameter() {
        let rm = section.minor_radius();
        for side in [1.0, -1.0] {
            out.push(Primitive::line(
                frame.to_drawing(a0, side * rm),
                frame.to_drawing(a1, side * rm),
                thin,
            ));
        }
    }

    if variant.thread_render.draws_hatch() {
        out.push(Primitive::Hatch {
            segments: hatch_segments(section, frame, config.hatch_pitch, variant.hatch_style),
            style: thin,
        });
    }

    let t = termination_offset(section, config);
    out.push(Primitive::line(
        frame.to_drawing(t, -r),
        frame.to_drawing(t, r),
        thin,
    ));

    if annotate {
        let base = profile.max_radius();
        let offset = config.dim_offset * (1.0 + index as f64 * config.callout_stagger);
        out.push(dimension(
            frame.to_drawing(a0, base),
            frame.to_drawing(a1, base),
            thread_callout_text(section),
            offset,
            dimension_orientation(frame),
            config,
        ));
    }

    out
}

/// Dimension orientation for lengths measured along a profile view's axis
pub fn dimension_orientation(frame: &ViewFrame) -> DimensionOrientation {
    match frame.orientation {
        Orientation::Vertical => DimensionOrientation::Vertical,
        Orientation::Horizontal | Orientation::EndOn => DimensionOrientation::Horizontal,
    }
}

fn hatch_segments(
    section: &SectionDescriptor,
    frame: &ViewFrame,
    pitch: f64,
    style: HatchStyle,
) -> Vec<Segment> {
    let r = section.major_radius();
    let (a0, a1) = (section.start_offset, section.end_offset());
    let count = (section.length / pitch + TOLERANCE).floor() as usize;

    (0..=count)
        .map(|j| {
            let z = (a0 + j as f64 * pitch).min(a1);
            match style {
                HatchStyle::Perpendicular => [frame.to_drawing(z, -r), frame.to_drawing(z, r)],
                HatchStyle::Diagonal => {
                    let lo = (z - pitch / 2.0).clamp(a0, a1);
                    let hi = (z + pitch / 2.0).clamp(a0, a1);
                    [frame.to_drawing(lo, -r), frame.to_drawing(hi, r)]
                }
            }
        })
        .collect()
}
