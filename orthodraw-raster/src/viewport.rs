/// Mapping from drawing units to bitmap pixels
use nalgebra::{Matrix3, Point2};
use orthodraw_core::{Bounds, RenderError};

/// Affine map from a drawing's bounds onto a pixel canvas.
///
/// Drawing y points up, pixel y points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    transform: Matrix3<f64>,
    /// Pixels per drawing unit along x and y
    pub scale: (f64, f64),
}

impl Viewport {
    /// Fit `bounds` into `size`; with `aspect_equal` both axes share the
    /// smaller scale and the drawing is centered.
    pub fn fit(bounds: &Bounds, size: (u32, u32), aspect_equal: bool) -> Result<Self, RenderError> {
        let (w, h) = (size.0 as f64, size.1 as f64);
        let degenerate = bounds.is_empty() || bounds.width() <= 0.0 || bounds.height() <= 0.0;
        if size.0 == 0 || size.1 == 0 || degenerate {
            return Err(RenderError::EmptyCanvas);
        }

        let (mut sx, mut sy) = (w / bounds.width(), h / bounds.height());
        if aspect_equal {
            let s = sx.min(sy);
            sx = s;
            sy = s;
        }
        let ox = (w - bounds.width() * sx) / 2.0;
        let oy = (h - bounds.height() * sy) / 2.0;

        #[rustfmt::skip]
        let transform = Matrix3::new(
            sx, 0.0, ox - bounds.min.x * sx,
            0.0, -sy, oy + bounds.max.y * sy,
            0.0, 0.0, 1.0,
        );

        Ok(Self {
            transform,
            scale: (sx, sy),
        })
    }

    pub fn to_pixel(&self, p: &Point2<f64>) -> (i32, i32) {
        let q = self.transform.transform_point(p);
        (q.x.round() as i32, q.y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aspect_equal_centers_drawing() {
        let bounds = Bounds::new(0.0, 100.0, 0.0, 50.0);
        let viewport = Viewport::fit(&bounds, (200, 200), true).unwrap();
        assert_relative_eq!(viewport.scale.0, 2.0);
        assert_relative_eq!(viewport.scale.1, 2.0);
        assert_eq!(viewport.to_pixel(&Point2::new(0.0, 50.0)), (0, 50));
        assert_eq!(viewport.to_pixel(&Point2::new(100.0, 0.0)), (200, 150));
    }

    #[test]
    fn test_stretch_without_aspect_equal() {
        let bounds = Bounds::new(0.0, 100.0, 0.0, 50.0);
        let viewport = Viewport::fit(&bounds, (200, 200), false).unwrap();
        assert_relative_eq!(viewport.scale.0, 2.0);
        assert_relative_eq!(viewport.scale.1, 4.0);
        assert_eq!(viewport.to_pixel(&Point2::new(50.0, 25.0)), (100, 100));
    }

    #[test]
    fn test_fractional_scale() {
        let bounds = Bounds::new(-1.5, 1.5, 0.0, 3.0);
        let viewport = Viewport::fit(&bounds, (200, 100), true).unwrap();
        assert_relative_eq!(viewport.scale.0, 100.0 / 3.0, epsilon = 1e-12);
        assert_eq!(viewport.to_pixel(&Point2::new(0.0, 1.5)), (100, 50));
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(matches!(
            Viewport::fit(&Bounds::empty(), (100, 100), true),
            Err(RenderError::EmptyCanvas)
        ));
        let bounds = Bounds::new(0.0, 1.0, 0.0, 1.0);
        assert!(Viewport::fit(&bounds, (0, 100), true).is_err());
    }
}
