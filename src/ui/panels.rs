use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – figure list
// ---------------------------------------------------------------------------

/// Render the left panel listing every figure of the run.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Figures");
    ui.separator();

    if state.figures.is_empty() {
        ui.label("Nothing to show.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, figure) in state.figures.iter().enumerate() {
                let response = ui.selectable_label(state.selected == idx, figure.title.as_str());
                let response = response.on_hover_text(figure.file_name.display().to_string());
                if response.clicked() {
                    clicked = Some(idx);
                }
            }
        });

    if let Some(idx) = clicked {
        state.select(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_save = state.selected_figure().is_some();
            if ui.add_enabled(can_save, egui::Button::new("Save image…")).clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} figures written to {}",
            state.figures.len(),
            state.output_dir.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut ViewerState) {
    let Some(figure) = state.selected_figure() else {
        return;
    };
    let suggested = figure
        .file_name
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "figure.png".to_string());

    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .set_directory(&state.output_dir)
        .set_file_name(suggested)
        .add_filter("Supported images", &["png", "svg"])
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .save_file();

    if let Some(path) = file {
        state.save_selected_to(&path);
    }
}
