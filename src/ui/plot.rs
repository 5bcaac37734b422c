use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoint, PlotPoints,
    Points,
};

use crate::charts::{self, ChartData, SCATTER_Y};
use crate::state::AppState;

const CHART_SPACING: f32 = 8.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the four charts for the current selection.
///
/// Layout: time series across the top, histogram and box plot side by side,
/// scatter across the bottom.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(data) = state.charts() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The dataset has no rows.");
        });
        return;
    };

    let color = state.colors.color_for(data.channel);
    let row_height = ((ui.available_height() - 3.0 * CHART_SPACING) / 3.0).max(120.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            time_series(ui, data, color, row_height);
            ui.add_space(CHART_SPACING);

            ui.columns(2, |cols: &mut [Ui]| {
                histogram(&mut cols[0], data, color, row_height);
                box_plot(&mut cols[1], data, color, row_height);
            });
            ui.add_space(CHART_SPACING);

            scatter(ui, data, color, row_height);
        });
}

/// Chart title, plus a note when the selected year has no readings.
fn chart_header(ui: &mut Ui, title: &str, data: &ChartData) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(title);
        if data.is_empty() {
            ui.label(RichText::new(format!("No data for {}", data.year)).color(Color32::GRAY));
        }
    });
}

fn date_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    charts::x_to_date(mark.value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// The four charts
// ---------------------------------------------------------------------------

/// Line chart of (date, reading).
fn time_series(ui: &mut Ui, data: &ChartData, color: Color32, height: f32) {
    chart_header(ui, &data.time_series_title(), data);

    let channel = data.channel.to_string();
    Plot::new("time_series")
        .height(height)
        .x_axis_label("Date")
        .y_axis_label(&channel)
        .x_axis_formatter(date_axis)
        .label_formatter(move |_name: &str, p: &PlotPoint| {
            let date = charts::x_to_date(p.x)
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default();
            format!("{date}\n{channel}: {:.3}", p.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points = PlotPoints::from(data.time_series.clone());
            plot_ui.line(Line::new(points).color(color).width(1.0));
        });
}

/// Distribution of readings.
fn histogram(ui: &mut Ui, data: &ChartData, color: Color32, height: f32) {
    chart_header(ui, &data.histogram_title(), data);

    let bars: Vec<Bar> = data
        .histogram
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.3} – {:.3}", bin.start, bin.end))
        })
        .collect();

    Plot::new("histogram")
        .height(height)
        .x_axis_label(data.channel.to_string())
        .y_axis_label("count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(color)
                    .name(data.channel.to_string()),
            );
        });
}

/// Quartiles, whiskers and outliers of the readings.
fn box_plot(ui: &mut Ui, data: &ChartData, color: Color32, height: f32) {
    chart_header(ui, &data.box_plot_title(), data);

    Plot::new("box_plot")
        .height(height)
        .y_axis_label(data.channel.to_string())
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let Some(summary) = &data.box_summary else {
                return;
            };
            let elem = BoxElem::new(
                0.0,
                BoxSpread::new(
                    summary.lower_whisker,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.upper_whisker,
                ),
            )
            .box_width(0.5)
            .fill(color.gamma_multiply(0.3))
            .stroke(egui::Stroke::new(1.5, color));
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(data.channel.to_string()));

            if !summary.outliers.is_empty() {
                let outliers: PlotPoints = summary.outliers.iter().map(|&v| [0.0, v]).collect();
                plot_ui.points(
                    Points::new(outliers)
                        .radius(2.5)
                        .color(color.gamma_multiply(0.7))
                        .name("outliers"),
                );
            }
        });
}

/// Selected channel against temperature.
fn scatter(ui: &mut Ui, data: &ChartData, color: Color32, height: f32) {
    chart_header(ui, &data.scatter_title(), data);

    Plot::new("scatter")
        .height(height)
        .x_axis_label(data.channel.to_string())
        .y_axis_label(SCATTER_Y.to_string())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            let points = PlotPoints::from(data.scatter.clone());
            plot_ui.points(Points::new(points).radius(2.0).color(color));
        });
}
