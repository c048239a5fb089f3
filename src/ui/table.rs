use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::year_row_tint;
use crate::data::model::{CATEGORY_COLUMN, TASK_COLUMN, YEAR_COLUMN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Work plan table (central panel, table view)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 24.0;

/// Render the filtered records as a table, rows tinted by year.
pub fn work_plan_table(ui: &mut Ui, state: &AppState) {
    if state.filtered.is_empty() {
        let message = if state.dataset.is_empty() {
            "The work plan has no tasks"
        } else {
            "No tasks match the current filters"
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(message);
        });
        return;
    }

    TableBuilder::new(ui)
        .striped(false)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder().at_least(240.0).clip(true))
        .column(Column::auto().at_least(160.0))
        .header(ROW_HEIGHT, |mut header| {
            for title in [YEAR_COLUMN, TASK_COLUMN, CATEGORY_COLUMN] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.filtered.len(), |mut row| {
                let record = &state.filtered[row.index()];
                let tint = year_row_tint(&record.year);
                let category_color = state.color_map.color_for(&record.category);

                for (i, text) in [&record.year, &record.task, &record.category]
                    .into_iter()
                    .enumerate()
                {
                    row.col(|ui: &mut Ui| {
                        if let Some(tint) = tint {
                            ui.painter().rect_filled(ui.max_rect(), 0.0, tint);
                        }
                        match i {
                            0 => ui.strong(text.as_str()),
                            2 => ui.colored_label(category_color, text.as_str()),
                            _ => ui.label(text.as_str()),
                        };
                    });
                }
            });
        });
}
