use eframe::egui::{self, Color32, RichText, Ui};

use crate::callbacks::{GraphId, WidgetEvent};
use crate::data::columns::Dataset;
use crate::layout::{Control, Dropdown, Section, Slider};
use crate::state::DashboardState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

/// Render one section: its controls, its graph, then the notes below it.
/// Widget changes are pushed to `events`; the caller dispatches them.
pub fn section(
    ui: &mut Ui,
    state: &DashboardState,
    section: &Section,
    events: &mut Vec<WidgetEvent>,
) {
    for control in &section.controls {
        match control {
            Control::Dropdown(d) => dropdown(ui, state, d, events),
            Control::Slider(s) => slider(ui, state, s, events),
        }
        ui.add_space(4.0);
    }

    match state.figure(section.graph) {
        Some(figure) => {
            plot::figure_plot(ui, section.graph, figure, state.revision(section.graph))
        }
        None => {
            ui.label(RichText::new(format!("{:?} has not been drawn", section.graph)).weak());
        }
    }

    ui.add_space(8.0);
    notes(ui, section.notes);
}

fn dropdown(ui: &mut Ui, state: &DashboardState, d: &Dropdown, events: &mut Vec<WidgetEvent>) {
    let current = state.widgets.text(d.id).unwrap_or_default();

    ui.label(d.prompt);
    egui::ComboBox::from_id_salt(d.id)
        .selected_text(current)
        .width(ui.available_width().min(360.0))
        .show_ui(ui, |ui: &mut Ui| {
            for option in &d.options {
                if ui
                    .selectable_label(current == option.as_str(), option.as_str())
                    .clicked()
                {
                    events.push(WidgetEvent::text(d.id, option));
                }
            }
        });
}

fn slider(ui: &mut Ui, state: &DashboardState, s: &Slider, events: &mut Vec<WidgetEvent>) {
    let mut value = state.widgets.review_score;

    ui.label(s.prompt);
    let response = ui.add(
        egui::Slider::new(&mut value, s.min..=s.max)
            .step_by(1.0)
            .integer(),
    );
    if response.changed() {
        events.push(WidgetEvent::integer(s.id, value));
    }

    let mut marks = s.marks.clone();
    marks.sort_unstable();
    ui.horizontal(|ui: &mut Ui| {
        for mark in marks {
            let text = RichText::new(mark.to_string()).small();
            ui.label(if mark == value { text.strong() } else { text.weak() });
        }
    });
}

fn notes(ui: &mut Ui, text: &str) {
    let mut lines = text.lines();
    if let Some(heading) = lines.next() {
        ui.strong(heading);
    }
    for line in lines {
        ui.label(line);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} listings from {}",
            state.dataset.table.len(),
            state.source.display()
        ));

        let empty = [GraphId::Map, GraphId::Scatter, GraphId::Histogram]
            .into_iter()
            .filter(|g| state.figure(*g).is_some_and(|f| f.is_empty()))
            .count();
        if empty > 0 {
            ui.separator();
            ui.label(RichText::new(format!("{empty} empty graph(s)")).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} listings with columns {:?}",
                    table.len(),
                    table.column_names
                );
                state.set_dataset(Dataset::new(table), &path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
