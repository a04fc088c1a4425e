use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotUi, Points, Polygon};

use crate::figure::{Figure, Series, category_at};
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Figure plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected figure in the central panel.
pub fn figure_plot(ui: &mut Ui, state: &ViewerState) {
    let figure = match state.selected_figure() {
        Some(fig) => fig,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No figures were produced by this run");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());
        if figure.is_3d() {
            ui.weak("x–y projection; the saved image shows the full 3D path");
        }
    });

    let mut plot = Plot::new(("figure_plot", state.selected))
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .show_grid(figure.grid)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if figure.legend {
        plot = plot.legend(Legend::default());
    }
    if !figure.categories.is_empty() {
        let categories = figure.categories.clone();
        plot = plot.x_axis_formatter(move |mark, _range| category_at(&categories, mark.value));
    }

    plot.show(ui, |plot_ui| draw_series(plot_ui, figure));
}

fn to_points(points: impl Iterator<Item = (f64, f64)>) -> Vec<[f64; 2]> {
    points.map(|(x, y)| [x, y]).collect()
}

fn draw_series(plot_ui: &mut PlotUi, figure: &Figure) {
    let colors = figure.series_colors();
    let mut bar_group = 0;

    for (series, color) in figure.series.iter().zip(colors) {
        let color: Color32 = color.to_egui();
        let label = series.name().map(|n| figure.legend_label(n)).unwrap_or_default();

        match series {
            Series::Line { points, markers, .. } => {
                plot_ui.line(
                    Line::new(to_points(points.iter().copied()))
                        .name(&label)
                        .color(color)
                        .width(2.0),
                );
                if *markers {
                    plot_ui.points(
                        Points::new(to_points(points.iter().copied()))
                            .name(&label)
                            .color(color)
                            .radius(3.0),
                    );
                }
            }
            Series::Band { x, lower, upper, opacity, .. } => {
                // One quad per segment keeps every polygon convex.
                let fill = color.gamma_multiply(*opacity as f32);
                for i in 1..x.len() {
                    let quad = vec![
                        [x[i - 1], lower[i - 1]],
                        [x[i], lower[i]],
                        [x[i], upper[i]],
                        [x[i - 1], upper[i - 1]],
                    ];
                    plot_ui.polygon(
                        Polygon::new(quad)
                            .name(&label)
                            .fill_color(fill)
                            .stroke(Stroke::NONE),
                    );
                }
            }
            Series::Histogram { histogram, .. } => {
                let bars = histogram
                    .bins()
                    .map(|(l, r, c)| Bar::new((l + r) / 2.0, c as f64).width(r - l))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&label).color(color));
            }
            Series::Bars { values, .. } => {
                let offset = figure.bar_offset(bar_group);
                let width = figure.bar_width();
                bar_group += 1;
                let bars = values
                    .iter()
                    .map(|&(i, v)| Bar::new(i as f64 + offset, v).width(width))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&label).color(color));
            }
            Series::Line3d { points, .. } => {
                plot_ui.line(
                    Line::new(to_points(points.iter().map(|&(x, y, _)| (x, y))))
                        .name(&label)
                        .color(color)
                        .width(2.0),
                );
            }
        }
    }
}
