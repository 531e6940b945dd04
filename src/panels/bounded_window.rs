use crate::FigureApp;
use crate::bounded::{Field, MAX, MIN};

pub fn bounded_window(app: &mut FigureApp, ctx: &egui::Context) {
    let mut open = *app.show_triple_mut();
    if !open {
        return;
    }

    egui::Window::new("Bounded values")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            let (triple, drafts) = app.triple_mut();
            let values = triple.values();
            egui::Grid::new("bounded_values_grid")
                .num_columns(3)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (field, name) in [(Field::A, "a"), (Field::B, "b"), (Field::C, "c")] {
                        ui.label(name);

                        // Enter or focus loss commits the typed text
                        let mut text = drafts.text(field, values);
                        let response =
                            ui.add(egui::TextEdit::singleline(&mut text).desired_width(40.0));
                        if response.changed() {
                            drafts.edit(field, text);
                        }
                        if response.lost_focus() {
                            drafts.commit(field, triple);
                        }

                        let mut slider_value = values.get(field);
                        if ui
                            .add(egui::Slider::new(&mut slider_value, MIN..=MAX))
                            .changed()
                        {
                            triple.set(field, slider_value);
                        }
                        ui.end_row();
                    }
                });
        });

    *app.show_triple_mut() = open;
}
