use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{DataSource, Dataset, Record};
use super::parser;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} contains no work plan rows", path.display())]
    Empty { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse a work plan CSV file.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parser::parse(&text);
    if records.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    log::info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(Dataset::from_records(
        records,
        DataSource::File(path.to_path_buf()),
    ))
}

/// Load the file, or fall back to the built-in dataset.
///
/// Returns the error alongside the fallback so the caller can surface a
/// non-blocking status message.
pub fn load_or_fallback(path: &Path) -> (Dataset, Option<LoadError>) {
    match load_file(path) {
        Ok(dataset) => (dataset, None),
        Err(e) => {
            log::error!("Error loading CSV: {e}; using fallback data");
            (fallback_dataset(), Some(e))
        }
    }
}

/// The fixed dataset shown when the CSV cannot be read.
pub fn fallback_dataset() -> Dataset {
    Dataset::from_records(fallback_records(), DataSource::Fallback)
}

fn fallback_records() -> Vec<Record> {
    vec![Record::new(
        "Primo anno",
        "Revisione dei dati esistenti e valutazione dello stato di digitalizzazione",
        "Raccolta dati",
    )]
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_csv_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Anno,lavoro,tipo di lavoro\nPrimo anno,Task A,Raccolta dati\nSecondo anno,Task B,Analisi dati\n"
        )
        .unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.source, DataSource::File(file.path().to_path_buf()));
        assert_eq!(ds.categories, vec!["Raccolta dati", "Analisi dati"]);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        assert!(matches!(load_file(&path), Err(LoadError::Io { .. })));

        let (ds, err) = load_or_fallback(&path);
        assert!(err.is_some());
        assert_eq!(ds.source, DataSource::Fallback);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].category, "Raccolta dati");
    }

    #[test]
    fn file_without_rows_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Anno,lavoro,tipo di lavoro").unwrap();

        assert!(matches!(load_file(file.path()), Err(LoadError::Empty { .. })));
        let (ds, err) = load_or_fallback(file.path());
        assert!(matches!(err, Some(LoadError::Empty { .. })));
        assert_eq!(ds.source, DataSource::Fallback);
    }

    #[test]
    fn bundled_plan_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/cronoprogramma.csv");
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.years, vec!["Primo anno", "Secondo anno", "Terzo anno"]);
        assert_eq!(ds.categories.len(), 6);
    }
}
