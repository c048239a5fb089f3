use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, FontId, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::{CategoryCounts, YearCategoryMatrix};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart view (central panel)
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 320.0;

/// Render the category doughnut and the year × category bar chart.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let counts = state.category_counts();
    let matrix = state.year_category_matrix();

    ui.columns(2, |columns| {
        category_pie(&mut columns[0], &counts, &state.color_map);
        year_bars(&mut columns[1], &matrix, &state.color_map);
    });
}

// ---------------------------------------------------------------------------
// Pie (doughnut) by category
// ---------------------------------------------------------------------------

/// Inner radius as a fraction of the outer one.
const CUTOUT: f32 = 0.6;
/// Max arc per tessellated segment, radians.
const SEGMENT_ANGLE: f32 = 0.05;

fn category_pie(ui: &mut Ui, counts: &CategoryCounts, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Distribuzione per Tipo di Lavoro");
    });

    let (response, painter) =
        ui.allocate_painter(Vec2::new(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = (rect.width().min(rect.height()) / 2.0 - 8.0).max(1.0);
    let inner = outer * CUTOUT;

    let total = counts.total();
    if total == 0 {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "No data",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
    } else {
        let mut start = -FRAC_PI_2;
        for (category, n) in counts.entries.iter().filter(|(_, n)| *n > 0) {
            let sweep = TAU * *n as f32 / total as f32;
            let color = colors.color_for(category);
            let segments = ((sweep / SEGMENT_ANGLE).ceil() as usize).max(1);
            let step = sweep / segments as f32;

            for i in 0..segments {
                let a0 = start + step * i as f32;
                let a1 = a0 + step;
                let quad = vec![
                    center + Vec2::angled(a0) * inner,
                    center + Vec2::angled(a0) * outer,
                    center + Vec2::angled(a1) * outer,
                    center + Vec2::angled(a1) * inner,
                ];
                painter.add(Shape::convex_polygon(quad, color, Stroke::NONE));
            }
            start += sweep;
        }
        painter.text(
            center,
            Align2::CENTER_CENTER,
            total.to_string(),
            FontId::proportional(22.0),
            ui.visuals().strong_text_color(),
        );
    }

    ui.add_space(6.0);
    for (category, color) in colors.legend_entries() {
        let n = counts.get(category).unwrap_or(0);
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(*color));
            ui.label(format!("{category} ({n})"));
        });
    }
}

// ---------------------------------------------------------------------------
// Grouped bars by year and category
// ---------------------------------------------------------------------------

/// Fraction of each year slot covered by its bar group.
const GROUP_WIDTH: f64 = 0.8;

fn year_bars(ui: &mut Ui, matrix: &YearCategoryMatrix, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Attività per Anno e Tipo");
    });

    let n_categories = matrix.categories.len().max(1) as f64;
    let bar_width = GROUP_WIDTH / n_categories;

    let years = matrix.years.clone();
    Plot::new("year_category_bars")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .y_axis_label("Attività")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                years.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (c, category) in matrix.categories.iter().enumerate() {
                let offset = (c as f64 - (n_categories - 1.0) / 2.0) * bar_width;
                let bars: Vec<Bar> = matrix
                    .category_series(c)
                    .into_iter()
                    .enumerate()
                    .map(|(y, count)| {
                        Bar::new(y as f64 + offset, count as f64)
                            .width(bar_width * 0.9)
                            .name(format!("{}: {category}", matrix.years[y]))
                    })
                    .collect();

                let chart = BarChart::new(bars)
                    .name(category)
                    .color(colors.color_for(category));
                plot_ui.bar_chart(chart);
            }
        });
}
