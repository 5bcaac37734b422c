use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Channel;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors and summary
// ---------------------------------------------------------------------------

/// Render the sensor selector, the year slider and the summary table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Air Quality");
    ui.separator();

    // ---- Sensor selector ----
    ui.strong("Sensor");
    let current = state.channel();
    let mut selected = current;
    egui::ComboBox::from_id_salt("sensor")
        .selected_text(current.column_name())
        .show_ui(ui, |ui: &mut Ui| {
            for ch in Channel::SELECTOR_ORDER {
                let text = RichText::new(ch.column_name()).color(state.colors.color_for(ch));
                ui.selectable_value(&mut selected, ch, text);
            }
        });
    state.set_channel(selected);
    ui.add_space(8.0);

    // ---- Year slider ----
    ui.strong("Year");
    match (state.dataset().year_range(), state.year()) {
        (Some((first, last)), Some(year)) => {
            let mut year = year;
            ui.add(egui::Slider::new(&mut year, first..=last).step_by(1.0));
            state.set_year(year);
        }
        _ => {
            ui.label("No years available.");
        }
    }
    ui.separator();

    summary_table(ui, state);
}

fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(data) = state.charts() else {
        return;
    };
    let fmt = |v: Option<f64>| v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "–".into());
    let box_summary = data.box_summary.as_ref();

    let rows: Vec<(&str, String)> = vec![
        ("Rows", data.rows.to_string()),
        ("Readings", data.summary.count.to_string()),
        ("Missing", (data.rows - data.summary.count).to_string()),
        ("Mean", fmt(data.summary.mean)),
        ("Min", fmt(data.summary.min)),
        ("Q1", fmt(box_summary.map(|b| b.q1))),
        ("Median", fmt(box_summary.map(|b| b.median))),
        ("Q3", fmt(box_summary.map(|b| b.q3))),
        ("Max", fmt(data.summary.max)),
        (
            "Outliers",
            box_summary.map_or(0, |b| b.outliers.len()).to_string(),
        ),
    ];

    ui.strong(format!("{} in {}", data.channel, data.year));
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::remainder())
        .body(|mut body| {
            for (label, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(label);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(value);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: source file and row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let name = state
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| state.source.display().to_string());
        ui.label(RichText::new(name).strong());

        ui.separator();

        ui.label(format!("{} records loaded", state.dataset().len()));
        if let Some(data) = state.charts() {
            ui.separator();
            ui.label(format!("{} rows in {}", data.rows, data.year));
        }
    });
}
