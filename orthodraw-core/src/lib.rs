/// Orthodraw core library: part profiles, view layout and drawing primitives
///
/// Turns a validated table of cylindrical sections into a three-view
/// orthographic drawing, independent of any rendering backend.
pub mod config;
pub mod dimension;
pub mod drawing;
pub mod engine;
pub mod error;
pub mod frame;
pub mod job;
pub mod layout;
pub mod presets;
pub mod primitive;
pub mod profile;
pub mod surface;
pub mod thread;

// Re-export commonly used types
pub use config::{DrawingVariant, HatchStyle, LayoutConfig, ThreadRenderMode, ViewOrder};
pub use drawing::{compose, Drawing};
pub use error::{ConfigError, RenderError, ThreadError, ValidationError};
pub use frame::{Orientation, ViewFrame, ViewRole};
pub use job::{load_job, DrawingJob, SectionRow};
pub use layout::{layout_views, ViewLayout};
pub use primitive::{Bounds, Color, DashPattern, Label, Primitive, Style};
pub use profile::{PartProfile, SectionDescriptor, ViewEnd};
pub use surface::{render, OutputFormat, RasterOptions, Surface};
pub use thread::ThreadDesignation;
