//! CSV encoding and decoding for job transfers.
//!
//! A field is quoted, with interior quotes doubled, iff it contains a comma,
//! a double quote or a newline; everything else is emitted verbatim. The
//! scanner applies the inverse rule in a single pass over the whole document,
//! so quoted fields may span physical lines.

use std::borrow::Cow;

use crate::prelude::{Error, Result};

pub const EXPECTED_HEADERS: [&str; 6] =
    ["ID", "CreateDate", "Company", "JobPosition", "Link", "Status"];

/// One data row, cells mapped by header name and trimmed. All values are
/// still raw text; typing happens during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub id: String,
    pub create_date: String,
    pub company: String,
    pub job_position: String,
    pub link: String,
    pub status: String,
}

pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Split a document into records of unescaped fields. Quotes toggle a span
/// state; `,` separates fields and `\n` / `\r\n` ends a record only outside
/// a quoted span. Blank records are dropped.
pub fn scan_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.trim_start_matches('\u{feff}').chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                if record.iter().any(|f| !f.trim().is_empty()) {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        if record.iter().any(|f| !f.trim().is_empty()) {
            records.push(record);
        }
    }
    records
}

/// Parse a whole CSV document into rows ready for reconciliation.
///
/// The header row must contain every expected column name; order does not
/// matter and extra columns are tolerated, values are mapped by header
/// position. Rows with a mismatched field count or an empty `Company` /
/// `JobPosition` are dropped with a warning.
pub fn parse(text: &str) -> Result<Vec<CsvRow>> {
    let records = scan_records(text);
    let Some((header, data)) = records.split_first() else {
        return Err(Error::InvalidCsv("CSV file is empty".into()));
    };

    let header: Vec<&str> = header.iter().map(|h| h.trim()).collect();
    let mut columns = [0usize; 6];
    for (slot, name) in columns.iter_mut().zip(EXPECTED_HEADERS) {
        *slot = header.iter().position(|h| *h == name).ok_or_else(|| {
            Error::InvalidCsv(format!(
                "invalid CSV format, expected headers: {}",
                EXPECTED_HEADERS.join(", ")
            ))
        })?;
    }

    let mut rows = Vec::new();
    for record in data {
        if record.len() != header.len() {
            tracing::warn!(
                "skipping row with {} fields, expected {}",
                record.len(),
                header.len()
            );
            continue;
        }
        let cell = |i: usize| record[columns[i]].trim().to_string();
        let row = CsvRow {
            id: cell(0),
            create_date: cell(1),
            company: cell(2),
            job_position: cell(3),
            link: cell(4),
            status: cell(5),
        };
        if row.company.is_empty() || row.job_position.is_empty() {
            tracing::warn!("skipping row without company or job position");
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}
