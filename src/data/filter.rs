use super::model::{FilterSelection, Record};

// ---------------------------------------------------------------------------
// Filter: selected years ∩ selected categories
// ---------------------------------------------------------------------------

/// Return the records whose year and category are both selected, keeping
/// their relative order.
///
/// There is no implicit "select all": an empty year or category set yields
/// an empty result. Values not present in the data simply match nothing.
pub fn apply(records: &[Record], selection: &FilterSelection) -> Vec<Record> {
    if selection.years.is_empty() || selection.categories.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::{DataSource, Dataset};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec![
                Record::new("Primo anno", "Task A", "Raccolta dati"),
                Record::new("Primo anno", "Task B", "Analisi dati"),
                Record::new("Secondo anno", "Task C", "Raccolta dati"),
            ],
            DataSource::Fallback,
        )
    }

    #[test]
    fn selecting_everything_returns_input() {
        let ds = dataset();
        assert_eq!(apply(&ds.records, &FilterSelection::all(&ds)), ds.records);
    }

    #[test]
    fn intersects_years_and_categories() {
        let ds = dataset();
        let sel = FilterSelection {
            years: set(&["Primo anno"]),
            categories: set(&["Raccolta dati", "Analisi dati"]),
        };
        let out = apply(&ds.records, &sel);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.year == "Primo anno"));
        assert_eq!(out[0].task, "Task A");
        assert_eq!(out[1].task, "Task B");

        let sel = FilterSelection {
            years: set(&["Primo anno", "Secondo anno"]),
            categories: set(&["Raccolta dati"]),
        };
        let tasks: Vec<_> = apply(&ds.records, &sel).into_iter().map(|r| r.task).collect();
        assert_eq!(tasks, vec!["Task A", "Task C"]);
    }

    #[test]
    fn empty_side_yields_nothing() {
        let ds = dataset();
        let no_years = FilterSelection {
            years: BTreeSet::new(),
            categories: set(&["Raccolta dati"]),
        };
        let no_categories = FilterSelection {
            years: set(&["Primo anno"]),
            categories: BTreeSet::new(),
        };
        assert!(apply(&ds.records, &no_years).is_empty());
        assert!(apply(&ds.records, &no_categories).is_empty());
    }

    #[test]
    fn unknown_values_match_nothing() {
        let ds = dataset();
        let sel = FilterSelection {
            years: set(&["Quarto anno"]),
            categories: set(&["raccolta dati"]),
        };
        assert!(apply(&ds.records, &sel).is_empty());
    }
}
