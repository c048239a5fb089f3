use std::path::Path;

use crate::color::ColorMap;
use crate::data::aggregate::{self, CategoryCounts, YearCategoryMatrix};
use crate::data::filter;
use crate::data::loader::{self, LoadError};
use crate::data::model::{Dataset, FilterSelection, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which central view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Charts,
}

/// Which filter column a selection command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Year,
    Category,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Original records of the current load. Never mutated.
    pub dataset: Dataset,

    /// Checked years and categories.
    pub selection: FilterSelection,

    /// Records passing `selection`, recomputed on every change.
    pub filtered: Vec<Record>,

    pub color_map: ColorMap,

    pub view_mode: ViewMode,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            color_map: ColorMap::new(&dataset.categories),
            selection: FilterSelection::all(&dataset),
            filtered: dataset.records.clone(),
            dataset,
            view_mode: ViewMode::default(),
            status_message: None,
        }
    }

    /// Load `path`, substituting the fallback dataset on failure.
    pub fn load(path: &Path) -> Self {
        let (dataset, err) = loader::load_or_fallback(path);
        let mut state = Self::new(dataset);
        state.report_load_error(err);
        state
    }

    /// Replace the dataset with the contents of `path` (File → Open, Reload).
    pub fn reload_from(&mut self, path: &Path) {
        let (dataset, err) = loader::load_or_fallback(path);
        self.set_dataset(dataset);
        self.report_load_error(err);
    }

    /// Ingest a newly loaded dataset, select everything and rebuild colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.color_map = ColorMap::new(&dataset.categories);
        self.selection = FilterSelection::all(&dataset);
        self.filtered = dataset.records.clone();
        self.dataset = dataset;
        self.status_message = None;
    }

    fn report_load_error(&mut self, err: Option<LoadError>) {
        if let Some(e) = err {
            self.status_message = Some(format!("{e} (showing fallback data)"));
        }
    }

    /// Install a new selection and recompute the filtered view.
    pub fn on_filter_changed(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.filtered = filter::apply(&self.dataset.records, &self.selection);
        log::debug!(
            "filter changed: {}/{} records visible",
            self.filtered.len(),
            self.dataset.len()
        );
    }

    /// Toggle a single value in one filter column.
    pub fn toggle(&mut self, column: FilterColumn, value: &str) {
        let mut selection = self.selection.clone();
        let values = match column {
            FilterColumn::Year => &mut selection.years,
            FilterColumn::Category => &mut selection.categories,
        };
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        self.on_filter_changed(selection);
    }

    /// Select every known value in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        let all = FilterSelection::all(&self.dataset);
        let mut selection = self.selection.clone();
        match column {
            FilterColumn::Year => selection.years = all.years,
            FilterColumn::Category => selection.categories = all.categories,
        }
        self.on_filter_changed(selection);
    }

    /// Deselect every value in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        let mut selection = self.selection.clone();
        match column {
            FilterColumn::Year => selection.years.clear(),
            FilterColumn::Category => selection.categories.clear(),
        }
        self.on_filter_changed(selection);
    }

    /// Back to the pass-through filter.
    pub fn reset_filters(&mut self) {
        self.on_filter_changed(FilterSelection::all(&self.dataset));
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Table => ViewMode::Charts,
            ViewMode::Charts => ViewMode::Table,
        };
    }

    pub fn category_counts(&self) -> CategoryCounts {
        aggregate::aggregate_by_category(&self.filtered, &self.dataset.categories)
    }

    pub fn year_category_matrix(&self) -> YearCategoryMatrix {
        aggregate::aggregate_by_year_and_category(
            &self.filtered,
            &self.dataset.years,
            &self.dataset.categories,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DataSource;
    use crate::data::parser;

    fn state() -> AppState {
        let records = parser::parse(
            "Anno,lavoro,tipo di lavoro\n\
             Primo anno,Task A,Raccolta dati\n\
             Primo anno,Task B,Analisi dati\n\
             Secondo anno,Task C,Raccolta dati\n",
        );
        AppState::new(Dataset::from_records(records, DataSource::Fallback))
    }

    fn assert_consistent(state: &AppState) {
        assert_eq!(
            state.filtered,
            filter::apply(&state.dataset.records, &state.selection)
        );
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.filtered.len(), 3);
        assert_eq!(s.view_mode, ViewMode::Table);
        assert_consistent(&s);
    }

    #[test]
    fn toggling_values_refilters() {
        let mut s = state();
        s.toggle(FilterColumn::Year, "Secondo anno");
        assert_eq!(s.filtered.len(), 2);
        assert_consistent(&s);

        s.toggle(FilterColumn::Category, "Analisi dati");
        assert_eq!(s.filtered.len(), 1);
        assert_eq!(s.category_counts().get("Analisi dati"), Some(0));
        assert_consistent(&s);

        s.toggle(FilterColumn::Year, "Secondo anno");
        assert_eq!(s.filtered.len(), 2);
        assert_consistent(&s);
    }

    #[test]
    fn select_none_then_reset() {
        let mut s = state();
        s.select_none(FilterColumn::Category);
        assert!(s.filtered.is_empty());
        assert_eq!(s.year_category_matrix().total(), 0);
        assert_eq!(s.year_category_matrix().years.len(), 2);

        s.select_all(FilterColumn::Category);
        assert_eq!(s.filtered.len(), 3);

        s.select_none(FilterColumn::Year);
        s.reset_filters();
        assert_eq!(s.filtered, s.dataset.records);
        assert_eq!(s.selection, FilterSelection::all(&s.dataset));
    }

    #[test]
    fn view_toggle_flips() {
        let mut s = state();
        s.toggle_view();
        assert_eq!(s.view_mode, ViewMode::Charts);
        s.toggle_view();
        assert_eq!(s.view_mode, ViewMode::Table);
    }

    #[test]
    fn failed_load_shows_fallback_with_status() {
        let dir = tempfile::tempdir().unwrap();
        let s = AppState::load(&dir.path().join("nope.csv"));
        assert_eq!(s.dataset.source, DataSource::Fallback);
        assert_eq!(s.filtered.len(), 1);
        assert!(s.status_message.is_some());
    }
}
