use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header of the year column (primary grouping key).
pub const YEAR_COLUMN: &str = "Anno";
/// Header of the free-text task description column.
pub const TASK_COLUMN: &str = "lavoro";
/// Header of the classification column.
pub const CATEGORY_COLUMN: &str = "tipo di lavoro";

// ---------------------------------------------------------------------------
// Record – one row of the work plan
// ---------------------------------------------------------------------------

/// A single parsed CSV data row. All fields stay text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub year: String,
    pub task: String,
    pub category: String,
    /// Columns other than the three known ones, in header order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl Record {
    pub fn new(year: &str, task: &str, category: &str) -> Self {
        Record {
            year: year.to_string(),
            task: task.to_string(),
            category: category.to_string(),
            extra: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded work plan
// ---------------------------------------------------------------------------

/// Where a [`Dataset`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Fallback,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Fallback => write!(f, "<built-in fallback>"),
        }
    }
}

/// The original record set with its key sets, built once per load.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records in CSV row order.
    pub records: Vec<Record>,
    /// Distinct years, first-seen order. Drives the bar chart x axis.
    pub years: Vec<String>,
    /// Distinct categories, first-seen order. Drives filters and colours.
    pub categories: Vec<String>,
    pub source: DataSource,
}

impl Dataset {
    /// Build the year and category indices from the loaded records.
    pub fn from_records(records: Vec<Record>, source: DataSource) -> Self {
        let years = first_seen(records.iter().map(|r| r.year.as_str()));
        let categories = first_seen(records.iter().map(|r| r.category.as_str()));
        Dataset {
            records,
            years,
            categories,
            source,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// FilterSelection – checked values in the filter panel
// ---------------------------------------------------------------------------

/// The currently checked years and categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    /// Every known year and category selected (the reset state).
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection {
            years: dataset.years.iter().cloned().collect(),
            categories: dataset.categories.iter().cloned().collect(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.years.contains(&record.year) && self.categories.contains(&record.category)
    }
}
