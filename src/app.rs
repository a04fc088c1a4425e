use std::path::Path;

use eframe::egui;

use crate::figure::Figure;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PlotViewerApp {
    pub state: ViewerState,
}

impl PlotViewerApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (next, previous) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::PageDown),
                i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::PageUp),
            )
        });
        if next {
            self.state.select_next();
        }
        if previous {
            self.state.select_previous();
        }
    }
}

impl eframe::App for PlotViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: figure list ----
        egui::SidePanel::left("figure_list")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_plot(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Open the viewer on `figures` and block until the window is closed.
pub fn show(figures: Vec<Figure>, output_dir: &Path) -> anyhow::Result<()> {
    if figures.is_empty() {
        log::info!("No figures to show");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = ViewerState::new(figures, output_dir.to_path_buf());
    eframe::run_native(
        "Coursework Plots",
        options,
        Box::new(move |_cc| Ok(Box::new(PlotViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
