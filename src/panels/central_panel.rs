use crate::SketchApp;
use crate::input::PointerEvent;

/// Shows the raster surface and turns egui pointer input over it into
/// pointer events for the session.
pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(texture) = app.texture(ctx) else {
            ui.label("Nothing to draw on.");
            return;
        };

        let (rect, response) = ui.allocate_exact_size(texture.size_vec2(), egui::Sense::drag());
        // Recorded points are measured from wherever the surface is laid out this frame.
        app.bounds().set(rect.min);

        let (pos, pressed, released, moved) = ui.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
            )
        });

        let inside = response.contains_pointer();
        let was_inside = app.set_pointer_inside(inside);
        if was_inside && !inside {
            app.send_pointer(PointerEvent::Leave);
        }

        if inside {
            if let Some(pos) = pos {
                if pressed {
                    app.send_pointer(PointerEvent::Down(pos));
                } else if moved {
                    app.send_pointer(PointerEvent::Move(pos));
                }
            }
        }
        if released {
            app.send_pointer(PointerEvent::Up);
        }

        // Pick up whatever the events above painted before drawing the frame.
        if let Some(texture) = app.texture(ctx) {
            ui.painter().image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    });
}
