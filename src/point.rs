use egui::{Pos2, pos2};

/// A single recorded pointer sample in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pos: Pos2,
    continues_stroke: bool,
}

impl Point {
    pub fn new(pos: Pos2, continues_stroke: bool) -> Self {
        Self {
            pos,
            continues_stroke,
        }
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    /// False for the first point of a gesture, true for every point after it
    pub fn continues_stroke(&self) -> bool {
        self.continues_stroke
    }
}

/// One straight line the renderer strokes as its own path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Pos2,
    pub to: Pos2,
}

/// Ordered list of every point recorded since the last clear.
///
/// Points from all gestures are flattened into one list; insertion order is
/// render order. The only way to remove points is [`PointStore::clear`].
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Drops every point at once
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// The segment drawn for each point, in render order.
    ///
    /// A point continuing a stroke connects to its predecessor. A stroke start
    /// (or the very first point) becomes a one unit dash ending at the point,
    /// so a single tap still leaves a visible dot.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.iter().enumerate().map(|(i, point)| {
            let to = point.pos();
            let from = if point.continues_stroke() && i > 0 {
                self.points[i - 1].pos()
            } else {
                pos2(to.x - 1.0, to.y)
            };
            Segment { from, to }
        })
    }
}
