/// Built-in parts and the drawings rendered from them
use crate::config::{DrawingVariant, HatchStyle, LayoutConfig, ThreadRenderMode, ViewOrder};
use crate::error::ValidationError;
use crate::profile::{PartProfile, SectionDescriptor};

/// A part together with the layout and variant it is drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub profile: PartProfile,
    pub layout: LayoutConfig,
    pub variant: DrawingVariant,
}

/// Plain cylinder, L=100 D=10
pub fn simple_cylinder_profile() -> Result<PartProfile, ValidationError> {
    PartProfile::new(vec![SectionDescriptor::plain(100.0, 10.0)])
}

/// Section table of the stepped threaded shaft, offsets as tabulated
pub fn stepped_shaft_sections() -> Vec<SectionDescriptor> {
    vec![
        SectionDescriptor::plain(3.0, 8.4).at(0.0),
        SectionDescriptor::threaded(7.5, 10.0, 8.475, "M10x1.25").at(3.0),
        SectionDescriptor::plain(54.4, 10.05).at(10.5),
        SectionDescriptor::plain(9.6, 8.0).at(64.9),
        SectionDescriptor::threaded(7.0, 8.0, 6.78, "M8x1.0").at(74.5),
    ]
}

pub fn stepped_shaft_profile() -> Result<PartProfile, ValidationError> {
    PartProfile::new(stepped_shaft_sections())
}

/// Cylinder with the circle as the front view and projection lines
pub fn simple_cylinder() -> Result<Preset, ValidationError> {
    Ok(Preset {
        profile: simple_cylinder_profile()?,
        layout: LayoutConfig {
            view_spacing: 20.0,
            ..LayoutConfig::default()
        },
        variant: DrawingVariant {
            title: Some("Three-View Orthographic Drawing of a Cylinder, L=100 R=5".to_string()),
            projection_lines: true,
            ..DrawingVariant::named("cylinder_three_view_drawing_circle_front")
        },
    })
}

/// Fully dimensioned stepped shaft with hatched threads
pub fn stepped_shaft() -> Result<Preset, ValidationError> {
    Ok(Preset {
        profile: stepped_shaft_profile()?,
        layout: LayoutConfig::default(),
        variant: DrawingVariant {
            title: Some("Complete Dimensioned Drawing of Stepped Threaded Cylinder".to_string()),
            thread_render: ThreadRenderMode::Hatch,
            hatch_style: HatchStyle::Diagonal,
            ..DrawingVariant::named("stepped_threaded_cylinder_final_dim_complete")
        },
    })
}

/// Stepped shaft with the profile as the front view
pub fn stepped_shaft_profile_front() -> Result<Preset, ValidationError> {
    Ok(Preset {
        profile: stepped_shaft_profile()?,
        layout: LayoutConfig {
            view_spacing: 25.0,
            ..LayoutConfig::default()
        },
        variant: DrawingVariant {
            view_order: ViewOrder::ProfileFront,
            ..DrawingVariant::named("stepped_cylinder_three_view")
        },
    })
}

pub fn all() -> Result<Vec<Preset>, ValidationError> {
    Ok(vec![
        simple_cylinder()?,
        stepped_shaft()?,
        stepped_shaft_profile_front()?,
    ])
}
