use csv::{ReaderBuilder, StringRecord, Terminator, Trim};

use super::model::{Record, CATEGORY_COLUMN, TASK_COLUMN, YEAR_COLUMN};

// ---------------------------------------------------------------------------
// Work plan CSV parser
// ---------------------------------------------------------------------------

/// Parse work plan CSV text into records, in row order.
///
/// The first line is the header. Fields are split on `,` with no quoting
/// support, so a comma inside a task description shifts the columns after it.
/// Missing trailing fields become empty strings and rows with an empty year
/// are skipped. When a header repeats, the last column with that name wins.
/// This never fails.
pub fn parse(text: &str) -> Vec<Record> {
    let mut reader = ReaderBuilder::new()
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(str::to_string).collect(),
        Err(e) => {
            log::warn!("unreadable CSV header: {e}");
            return Vec::new();
        }
    };

    let year_idx = position(&headers, YEAR_COLUMN);
    let task_idx = position(&headers, TASK_COLUMN);
    let category_idx = position(&headers, CATEGORY_COLUMN);

    reader
        .records()
        .enumerate()
        .filter_map(|(row_no, result)| match result {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!("skipping CSV row {row_no}: {e}");
                None
            }
        })
        .filter_map(|row| {
            let year = field(&row, year_idx);
            if year.is_empty() {
                return None;
            }
            Some(Record {
                year,
                task: field(&row, task_idx),
                category: field(&row, category_idx),
                extra: extra_fields(&headers, &row),
            })
        })
        .collect()
}

fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().rposition(|h| h == name)
}

fn field(row: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).unwrap_or("").to_string()
}

/// Unknown columns in header order, one entry per name (last value wins).
fn extra_fields(headers: &[String], row: &StringRecord) -> Vec<(String, String)> {
    let mut extra: Vec<(String, String)> = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if [YEAR_COLUMN, TASK_COLUMN, CATEGORY_COLUMN].contains(&name.as_str()) {
            continue;
        }
        let value = field(row, Some(i));
        match extra.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => extra.push((name.clone(), value)),
        }
    }
    extra
}
