use crate::SketchApp;
use crate::controls::{ControlEvent, ControlId};

/// Side panel holding the save, delete, color and width controls.
///
/// Only controls bound to the session are shown.
pub fn controls_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Sketch");
            ui.separator();

            if let Some(err) = app.startup_error() {
                ui.colored_label(egui::Color32::RED, format!("Drawing disabled: {err}"));
                return;
            }

            if app.is_bound(ControlId::Color) {
                color_control(app, ui);
            }
            if app.is_bound(ControlId::Width) {
                width_control(app, ui);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if app.is_bound(ControlId::Save) && ui.button("💾 Save").clicked() {
                    log::info!("Save clicked");
                    app.send_control(ControlId::Save, ControlEvent::Click);
                }
                if app.is_bound(ControlId::Delete) && ui.button("🗑 Delete").clicked() {
                    log::info!("Delete clicked");
                    app.send_control(ControlId::Delete, ControlEvent::Click);
                }
            });

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

fn color_control(app: &mut SketchApp, ui: &mut egui::Ui) {
    let Some([r, g, b, a]) = app
        .session()
        .map(|session| session.params().stroke_color().rgba())
    else {
        return;
    };

    ui.horizontal(|ui| {
        ui.label("Color:");

        let mut picked = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut picked,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            let hex = format!("#{:02x}{:02x}{:02x}", picked.r(), picked.g(), picked.b());
            app.send_control(ControlId::Color, ControlEvent::Change(hex));
        }

        let response = ui.add(
            egui::TextEdit::singleline(&mut app.inputs_mut().color).desired_width(90.0),
        );
        if response.lost_focus() {
            let value = app.inputs().color.clone();
            app.send_control(ControlId::Color, ControlEvent::Change(value));
        }
    });
}

fn width_control(app: &mut SketchApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label("Width:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.inputs_mut().width).desired_width(50.0),
        );
        // Committing on focus loss mirrors a change event: typing alone does nothing.
        if response.lost_focus() {
            let value = app.inputs().width.clone();
            app.send_control(ControlId::Width, ControlEvent::Change(value));
        }
    });
}
