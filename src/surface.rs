use std::cell::Cell;
use std::rc::Rc;

use egui::Pos2;
use tiny_skia::{Color, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::{SketchError, SketchResult};
use crate::point::Segment;

/// Solid color used to erase the surface before every repaint.
pub const DEFAULT_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// CPU pixel buffer the drawing is painted onto and exported from.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    pixmap: Pixmap,
    background: [u8; 4],
}

impl RasterSurface {
    /// Creates a surface already filled with `background`
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> SketchResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SketchError::InvalidSurface { width, height })?;
        let mut surface = Self { pixmap, background };
        surface.fill_background();
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn background(&self) -> [u8; 4] {
        self.background
    }

    /// Paints the whole surface with the background color
    pub fn fill_background(&mut self) {
        let [r, g, b, a] = self.background;
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));
    }

    /// Resets every pixel to fully transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Strokes `segment` as its own closed path.
    pub fn stroke_segment(&mut self, segment: Segment, paint: &Paint<'_>, stroke: &Stroke) {
        let mut pb = PathBuilder::new();
        pb.move_to(segment.from.x, segment.from.y);
        pb.line_to(segment.to.x, segment.to.y);
        pb.close();
        match pb.finish() {
            Some(path) => {
                self.pixmap
                    .stroke_path(&path, paint, stroke, Transform::identity(), None);
            }
            None => log::trace!("Skipping degenerate segment {:?}", segment),
        }
    }

    /// Straight (non-premultiplied) RGBA of the pixel at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Premultiplied RGBA bytes, row major
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Copies the surface into an `image` buffer with straight alpha.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        // `from_fn` only visits coordinates inside the pixmap.
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.pixel(x, y).unwrap_or_default())
        })
    }

    /// Builds the texture image the app displays.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }
}

/// Stroke settings derived from the current color and width.
pub fn stroke_style(rgba: [u8; 4], width: u32) -> (Paint<'static>, Stroke) {
    let [r, g, b, a] = rgba;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: width as f32,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    (paint, stroke)
}

/// Reports where the drawing surface's top-left corner currently is, in
/// viewport coordinates.
pub trait SurfaceBounds {
    fn top_left(&self) -> Pos2;
}

/// Bounds that never move
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBounds(pub Pos2);

impl SurfaceBounds for FixedBounds {
    fn top_left(&self) -> Pos2 {
        self.0
    }
}

/// Bounds shared with whoever lays the surface out.
///
/// The app keeps one clone and updates it every frame; the session queries
/// the other clone on every recorded point.
#[derive(Debug, Clone, Default)]
pub struct SharedBounds(Rc<Cell<Pos2>>);

impl SharedBounds {
    pub fn new(top_left: Pos2) -> Self {
        Self(Rc::new(Cell::new(top_left)))
    }

    pub fn set(&self, top_left: Pos2) {
        self.0.set(top_left);
    }
}

impl SurfaceBounds for SharedBounds {
    fn top_left(&self) -> Pos2 {
        self.0.get()
    }
}
