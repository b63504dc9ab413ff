/// Orthodraw raster output - PNG rendering of composed drawings
///
/// Drawings are recorded in drawing units and replayed onto a `plotters`
/// bitmap only when saved, so the output size is chosen at save time.

pub mod font;
pub mod png;
pub mod viewport;

pub use png::PngSurface;
pub use viewport::Viewport;
