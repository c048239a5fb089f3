use std::collections::HashMap;

use serde::Serialize;

use super::model::Record;

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Record counts per category, in the dataset's category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub entries: Vec<(String, u32)>,
}

impl CategoryCounts {
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn get(&self, category: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
    }
}

/// Record counts for every (year, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCategoryMatrix {
    pub years: Vec<String>,
    pub categories: Vec<String>,
    /// `counts[year_idx][category_idx]`
    pub counts: Vec<Vec<u32>>,
}

impl YearCategoryMatrix {
    #[cfg(test)]
    pub fn get(&self, year: &str, category: &str) -> Option<u32> {
        let y = self.years.iter().position(|v| v == year)?;
        let c = self.categories.iter().position(|v| v == category)?;
        Some(self.counts[y][c])
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }

    /// One bar series per category: its count in each year, x-axis order.
    pub fn category_series(&self, category_idx: usize) -> Vec<u32> {
        self.counts.iter().map(|row| row[category_idx]).collect()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Count records per category.
///
/// `categories` is the full category set of the original dataset, so the
/// keys (and their colours) stay put when a filter empties some of them.
pub fn aggregate_by_category(records: &[Record], categories: &[String]) -> CategoryCounts {
    let index = index_of(categories);
    let mut counts = vec![0u32; categories.len()];
    for r in records {
        if let Some(&i) = index.get(r.category.as_str()) {
            counts[i] += 1;
        }
    }
    CategoryCounts {
        entries: categories.iter().cloned().zip(counts).collect(),
    }
}

/// Count records per (year, category) over the full year × category grid.
pub fn aggregate_by_year_and_category(
    records: &[Record],
    years: &[String],
    categories: &[String],
) -> YearCategoryMatrix {
    let year_index = index_of(years);
    let category_index = index_of(categories);
    let mut counts = vec![vec![0u32; categories.len()]; years.len()];

    for r in records {
        let cell = year_index
            .get(r.year.as_str())
            .zip(category_index.get(r.category.as_str()));
        match cell {
            Some((&y, &c)) => counts[y][c] += 1,
            None => log::debug!("skipping record outside the key grid: {:?}", r),
        }
    }

    YearCategoryMatrix {
        years: years.to_vec(),
        categories: categories.to_vec(),
        counts,
    }
}

fn index_of(keys: &[String]) -> HashMap<&str, usize> {
    keys.iter()
        .enumerate()
        .map(|(i, k)| (k.as_str(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter;
    use crate::data::model::{DataSource, Dataset, FilterSelection};
    use crate::data::parser;

    const PLAN: &str = "Anno,lavoro,tipo di lavoro\n\
                        Primo anno,Task A,Raccolta dati\n\
                        Primo anno,Task B,Analisi dati\n\
                        ,,\n\
                        Secondo anno,Task C,Raccolta dati\n";

    fn dataset() -> Dataset {
        Dataset::from_records(parser::parse(PLAN), DataSource::Fallback)
    }

    #[test]
    fn counts_by_category_in_first_seen_order() {
        let ds = dataset();
        let counts = aggregate_by_category(&ds.records, &ds.categories);
        assert_eq!(
            counts.entries,
            vec![("Raccolta dati".to_string(), 2), ("Analisi dati".to_string(), 1)]
        );
        assert_eq!(counts.total() as usize, ds.len());
    }

    #[test]
    fn filtered_counts_keep_zero_categories() {
        let ds = dataset();
        let sel = FilterSelection {
            years: FilterSelection::all(&ds).years,
            categories: BTreeSet::from(["Analisi dati".to_string()]),
        };
        let filtered = filter::apply(&ds.records, &sel);
        let counts = aggregate_by_category(&filtered, &ds.categories);
        assert_eq!(counts.get("Raccolta dati"), Some(0));
        assert_eq!(counts.get("Analisi dati"), Some(1));
        assert_eq!(counts.total() as usize, filtered.len());
    }

    #[test]
    fn matrix_covers_full_grid() {
        let ds = dataset();
        let m = aggregate_by_year_and_category(&ds.records, &ds.years, &ds.categories);
        assert_eq!(m.years, vec!["Primo anno", "Secondo anno"]);
        assert_eq!(m.counts, vec![vec![1, 1], vec![1, 0]]);
        assert_eq!(m.get("Secondo anno", "Analisi dati"), Some(0));
        assert_eq!(m.get("Terzo anno", "Analisi dati"), None);
        assert_eq!(m.category_series(0), vec![1, 1]);
        assert_eq!(m.total() as usize, ds.len());
    }

    #[test]
    fn keys_are_stable_under_filtering() {
        let ds = dataset();
        let full = aggregate_by_year_and_category(&ds.records, &ds.years, &ds.categories);
        let empty = aggregate_by_year_and_category(&[], &ds.years, &ds.categories);
        assert_eq!(full.years, empty.years);
        assert_eq!(full.categories, empty.categories);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.counts.len(), 2);
        assert!(empty.counts.iter().all(|row| row.len() == 2));

        let narrow = filter::apply(&ds.records, &FilterSelection {
            years: BTreeSet::from(["Secondo anno".to_string()]),
            categories: FilterSelection::all(&ds).categories,
        });
        let counts = aggregate_by_category(&narrow, &ds.categories);
        let keys: Vec<_> = counts.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Raccolta dati", "Analisi dati"]);
    }

    #[test]
    fn records_outside_keys_are_not_counted() {
        let ds = dataset();
        let stray = vec![Record::new("Quarto anno", "x", "Raccolta dati")];
        assert_eq!(
            aggregate_by_year_and_category(&stray, &ds.years, &ds.categories).total(),
            0
        );
    }
}
