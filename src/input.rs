use egui::Pos2;

use crate::point::{Point, PointStore};
use crate::surface::SurfaceBounds;

/// Pointer events delivered by the host, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button was pressed over the surface
    Down(Pos2),
    /// Pointer moved over the surface (button state is not reported)
    Move(Pos2),
    /// Primary button was released
    Up,
    /// Pointer left the surface
    Leave,
}

/// Where the current gesture is at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

/// Turns pointer events into point store mutations.
///
/// Moves only record points between a press and the next release or leave.
#[derive(Debug, Default)]
pub struct InputCapture {
    state: GestureState,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn can_draw(&self) -> bool {
        self.state == GestureState::Drawing
    }

    /// Routes `event` to the matching handler. Returns true when the points
    /// changed and the surface needs a repaint.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        bounds: &dyn SurfaceBounds,
        points: &mut PointStore,
    ) -> bool {
        match event {
            PointerEvent::Down(pos) => self.on_press(pos, bounds, points),
            PointerEvent::Move(pos) => self.on_move(pos, bounds, points),
            PointerEvent::Up => {
                self.on_release();
                false
            }
            PointerEvent::Leave => {
                self.on_leave();
                false
            }
        }
    }

    /// Starts a gesture and records its first point
    pub fn on_press(
        &mut self,
        pos: Pos2,
        bounds: &dyn SurfaceBounds,
        points: &mut PointStore,
    ) -> bool {
        self.state = GestureState::Drawing;
        Self::record(pos, false, bounds, points);
        true
    }

    pub fn on_move(
        &mut self,
        pos: Pos2,
        bounds: &dyn SurfaceBounds,
        points: &mut PointStore,
    ) -> bool {
        if !self.can_draw() {
            return false;
        }
        Self::record(pos, true, bounds, points);
        true
    }

    pub fn on_release(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn on_leave(&mut self) {
        self.state = GestureState::Idle;
    }

    // The offset is looked up per point since the surface may move between events.
    fn record(
        pos: Pos2,
        continues_stroke: bool,
        bounds: &dyn SurfaceBounds,
        points: &mut PointStore,
    ) {
        let local = pos - bounds.top_left().to_vec2();
        log::trace!("Recording point {:?} (continues: {})", local, continues_stroke);
        points.push(Point::new(local, continues_stroke));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{FixedBounds, SharedBounds};
    use egui::pos2;

    #[test]
    fn test_press_move_release_records_gesture() {
        let bounds = FixedBounds(pos2(0.0, 0.0));
        let mut points = PointStore::new();
        let mut capture = InputCapture::new();

        assert!(capture.handle(PointerEvent::Down(pos2(10.0, 10.0)), &bounds, &mut points));
        assert_eq!(capture.state(), GestureState::Drawing);
        for x in [11.0, 12.0, 13.0] {
            assert!(capture.handle(PointerEvent::Move(pos2(x, 10.0)), &bounds, &mut points));
        }
        assert!(!capture.handle(PointerEvent::Up, &bounds, &mut points));
        assert_eq!(capture.state(), GestureState::Idle);

        assert_eq!(points.len(), 4);
        assert!(!points.as_slice()[0].continues_stroke());
        assert!(points.iter().skip(1).all(|p| p.continues_stroke()));
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let bounds = FixedBounds::default();
        let mut points = PointStore::new();
        let mut capture = InputCapture::new();

        assert!(!capture.handle(PointerEvent::Move(pos2(5.0, 5.0)), &bounds, &mut points));
        capture.on_press(pos2(1.0, 1.0), &bounds, &mut points);
        capture.on_leave();
        assert!(!capture.on_move(pos2(2.0, 2.0), &bounds, &mut points));
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_offset_is_subtracted_per_point() {
        let bounds = SharedBounds::new(pos2(100.0, 50.0));
        let mut points = PointStore::new();
        let mut capture = InputCapture::new();

        capture.on_press(pos2(110.0, 60.0), &bounds, &mut points);
        bounds.set(pos2(200.0, 50.0));
        capture.on_move(pos2(220.0, 60.0), &bounds, &mut points);

        assert_eq!(points.as_slice()[0].pos(), pos2(10.0, 10.0));
        assert_eq!(points.as_slice()[1].pos(), pos2(20.0, 10.0));
    }

    #[test]
    fn test_release_does_not_touch_points() {
        let points = PointStore::new();
        let mut capture = InputCapture::new();

        capture.on_release();
        capture.on_leave();
        assert!(points.is_empty());
        assert!(!capture.can_draw());
    }
}
