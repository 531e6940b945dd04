use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::FigureApp;
use crate::components::ToolButton;
use crate::figure::FigureKind;

pub fn tools_panel(app: &mut FigureApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.config().active_tool();
            ui.horizontal_wrapped(|ui| {
                for kind in FigureKind::ALL {
                    if ToolButton::new(kind, active == Some(kind)).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind);
                        if let Err(err) = app.config().set_active_tool_by_name(kind.name()) {
                            app.set_notice(err.to_string());
                        }
                    }
                }
            });
            ui.separator();

            let config = app.config().clone();
            let mut style = config.style();
            ui.horizontal(|ui| {
                ui.label("Pen:");
                if color_edit_button_srgba(ui, &mut style.pen_color, Alpha::Opaque).changed() {
                    config.set_pen_color(style.pen_color);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Brush:");
                if color_edit_button_srgba(ui, &mut style.brush_color, Alpha::OnlyBlend).changed() {
                    config.set_brush_color(style.brush_color);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Width:");
                if ui.add(egui::Slider::new(&mut style.pen_width, 1..=50)).changed() {
                    config.set_pen_width(style.pen_width);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Radius:");
                if ui.add(egui::Slider::new(&mut style.radius, 1..=50)).changed() {
                    config.set_radius(style.radius);
                }
            });
            ui.separator();

            let (count, selected) = {
                let storage = app.storage().borrow();
                (storage.len(), storage.get_selected().len())
            };
            ui.label(format!("Figures: {count}, selected: {selected}"));
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(selected > 0, egui::Button::new("Delete"))
                    .clicked()
                {
                    app.storage().borrow_mut().delete_selected();
                }
                if ui
                    .add_enabled(selected > 0, egui::Button::new("Deselect"))
                    .clicked()
                {
                    app.storage().borrow_mut().deselect_all();
                }
                if ui.add_enabled(count > 0, egui::Button::new("Clear")).clicked() {
                    app.storage().borrow_mut().clear_all();
                }
            });
            ui.small("Del: delete  +/-: size  Esc: deselect");
            ui.separator();

            ui.checkbox(app.show_triple_mut(), "Bounded values");

            if let Some(notice) = app.notice() {
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(ui.visuals().warn_fg_color, notice);
                    if ui.small_button("✖").clicked() {
                        app.clear_notice();
                    }
                });
            }
        });
}
