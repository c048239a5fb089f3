use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::DataSource;
use crate::export;
use crate::state::{AppState, FilterColumn, ViewMode};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let years = state.dataset.years.clone();
    let categories = state.dataset.categories.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_section(ui, state, FilterColumn::Year, "Anno", &years);
            filter_section(ui, state, FilterColumn::Category, "Tipo di lavoro", &categories);

            ui.add_space(8.0);
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

fn filter_section(
    ui: &mut Ui,
    state: &mut AppState,
    column: FilterColumn,
    title: &str,
    values: &[String],
) {
    let n_selected = values
        .iter()
        .filter(|v| selected_in(state, column, v))
        .count();
    let header_text = format!("{title}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            for value in values {
                let mut text = RichText::new(value);
                if column == FilterColumn::Category {
                    text = text.color(state.color_map.color_for(value));
                }
                let mut checked = selected_in(state, column, value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(column, value);
                }
            }
        });
}

fn selected_in(state: &AppState, column: FilterColumn, value: &str) -> bool {
    match column {
        FilterColumn::Year => state.selection.years.contains(value),
        FilterColumn::Category => state.selection.categories.contains(value),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if let DataSource::File(path) = &state.dataset.source {
                if ui.button("Reload").clicked() {
                    let path = path.clone();
                    state.reload_from(&path);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("Print…").clicked() {
                print_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                export_csv_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart series…").clicked() {
                export_series_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let mut show_charts = state.view_mode == ViewMode::Charts;
        if ui.toggle_value(&mut show_charts, "Charts").changed() {
            state.toggle_view();
        }

        ui.separator();

        ui.label(format!(
            "{} tasks loaded, {} visible",
            state.dataset.len(),
            state.filtered.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open work plan")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.reload_from(&path);
    }
}

fn save_dialog(title: &str, filter: &str, ext: &str, file_name: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(filter, &[ext])
        .set_file_name(file_name)
        .save_file()
}

fn report(state: &mut AppState, result: anyhow::Result<()>) {
    if let Err(e) = result {
        log::error!("{e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}

fn print_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(path) = save_dialog("Save print view", "HTML", "html", "piano_di_lavoro.html") else {
        return;
    };
    let result = export::write_print_view(&path, &state.filtered)
        .and_then(|()| export::file_url(&path))
        .map(|url| {
            // The page calls window.print() once loaded.
            ctx.open_url(egui::OpenUrl::new_tab(url));
        });
    report(state, result);
}

fn export_csv_dialog(state: &mut AppState) {
    if let Some(path) = save_dialog("Export filtered rows", "CSV", "csv", "piano_filtrato.csv") {
        let result = export::export_csv(&path, &state.filtered);
        report(state, result);
    }
}

fn export_series_dialog(state: &mut AppState) {
    if let Some(path) = save_dialog("Export chart series", "JSON", "json", "serie.json") {
        let result = export::export_series(
            &path,
            &state.category_counts(),
            &state.year_category_matrix(),
        );
        report(state, result);
    }
}
