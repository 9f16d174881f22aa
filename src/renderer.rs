use crate::params::DrawingParams;
use crate::point::PointStore;
use crate::surface::{RasterSurface, stroke_style};

/// Repaints the raster surface from the recorded points.
///
/// The renderer holds no drawing state of its own. Everything it paints comes
/// from the point store and the parameter snapshot passed to [`Renderer::repaint`],
/// so repeating a call with the same inputs produces the same pixels.
#[derive(Debug, Default)]
pub struct Renderer {
    frames: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repaints performed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Erases the surface and strokes every point's segment with `params`.
    pub fn repaint(
        &mut self,
        points: &PointStore,
        params: &DrawingParams,
        surface: &mut RasterSurface,
    ) {
        surface.fill_background();

        let (paint, stroke) = stroke_style(params.stroke_color().rgba(), params.stroke_width());
        for segment in points.segments() {
            surface.stroke_segment(segment, &paint, &stroke);
        }

        self.frames += 1;
        log::debug!(
            "Repainted {} points (frame {}, width {}, color {})",
            points.len(),
            self.frames,
            params.stroke_width(),
            params.stroke_color().as_str()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::surface::DEFAULT_BACKGROUND;
    use egui::pos2;

    fn surface() -> RasterSurface {
        RasterSurface::new(64, 48, DEFAULT_BACKGROUND).unwrap()
    }

    #[test]
    fn test_empty_store_paints_background() {
        let mut renderer = Renderer::new();
        let mut drawn = surface();
        drawn.clear();
        renderer.repaint(&PointStore::new(), &DrawingParams::default(), &mut drawn);

        assert_eq!(drawn, surface());
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_repaint_is_idempotent() {
        let mut store = PointStore::new();
        store.push(Point::new(pos2(10.0, 10.0), false));
        store.push(Point::new(pos2(30.0, 20.0), true));
        let params = DrawingParams::default().with_color("#c03").unwrap();

        let mut renderer = Renderer::new();
        let mut target = surface();
        renderer.repaint(&store, &params, &mut target);
        let first = target.clone();
        renderer.repaint(&store, &params, &mut target);

        assert_eq!(first, target);
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn test_tap_leaves_dot() {
        let mut store = PointStore::new();
        store.push(Point::new(pos2(10.0, 10.0), false));

        let mut target = surface();
        Renderer::new().repaint(&store, &DrawingParams::default(), &mut target);

        assert_eq!(target.pixel(9, 9), Some([0, 0, 0, 255]));
        assert_eq!(target.pixel(40, 40), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_width_changes_output() {
        let mut store = PointStore::new();
        store.push(Point::new(pos2(10.0, 20.0), false));
        store.push(Point::new(pos2(50.0, 20.0), true));

        let thin = DrawingParams::default().with_width_input("2").unwrap();
        let thick = DrawingParams::default().with_width_input("12").unwrap();

        let mut renderer = Renderer::new();
        let mut thin_surface = surface();
        renderer.repaint(&store, &thin, &mut thin_surface);
        let mut thick_surface = surface();
        renderer.repaint(&store, &thick, &mut thick_surface);

        // 5 units above the line is only covered by the thick stroke
        assert_eq!(thin_surface.pixel(30, 15), Some([255, 255, 255, 255]));
        assert_eq!(thick_surface.pixel(30, 15), Some([0, 0, 0, 255]));
    }
}
