//! CSV export rendering and import reconciliation.
//!
//! Import runs against the single transaction the calling flow opened, so
//! the batch lands all-or-nothing; the returned count is the number of rows
//! actually written inside that transaction.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::SqliteConnection;

use crate::pkg::internal::adaptors::jobs::{
    mutators::{CreateJobData, JobMutator},
    selectors::JobSelector,
    spec::JobEntry,
};
use crate::pkg::internal::csv::{self, CsvRow, EXPECTED_HEADERS};
use crate::pkg::internal::status::{self, JobStatus, DEFAULT_STATUS};
use crate::prelude::Result;

pub fn export_filename(today: NaiveDate) -> String {
    format!("job_search_{}.csv", today.format("%Y-%m-%d"))
}

fn render_line(job: &JobEntry) -> String {
    [
        job.id.to_string(),
        job.create_date.to_rfc3339(),
        job.company.clone(),
        job.job_position.clone(),
        job.link.clone(),
        status::label_for(job.status).to_string(),
    ]
    .iter()
    .map(|field| csv::escape_field(field).into_owned())
    .collect::<Vec<_>>()
    .join(",")
}

/// Render the whole job collection as a CSV document, status column resolved
/// to its label. Read-only.
pub async fn export_csv(conn: &mut SqliteConnection) -> Result<String> {
    let jobs = JobSelector::new(conn).get_all().await?;
    let mut lines = vec![EXPECTED_HEADERS.join(",")];
    lines.extend(jobs.iter().map(render_line));
    Ok(lines.join("\n"))
}

fn parse_create_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

fn row_to_job(row: &CsvRow) -> CreateJobData {
    let create_date = if row.create_date.is_empty() {
        Utc::now()
    } else {
        parse_create_date(&row.create_date).unwrap_or_else(|| {
            tracing::warn!("unparseable CreateDate {:?}, using current time", row.create_date);
            Utc::now()
        })
    };
    let status = JobStatus::from_label(&row.status)
        .unwrap_or(DEFAULT_STATUS)
        .id();
    CreateJobData {
        create_date,
        company: row.company.clone(),
        job_position: row.job_position.clone(),
        link: row.link.clone(),
        status,
    }
}

/// Reconcile a CSV document into the job collection: rows with an id that
/// resolves to an existing record overwrite it wholesale, everything else is
/// inserted with a store-assigned id. Returns the number of rows written.
pub async fn import_csv(conn: &mut SqliteConnection, text: &str) -> Result<usize> {
    let rows = csv::parse(text)?;
    let mut imported = 0;
    for row in &rows {
        let data = row_to_job(row);
        let mut mutator = JobMutator::new(&mut *conn);
        match row.id.parse::<i64>() {
            Ok(id) => {
                if mutator.replace(id, data.clone()).await?.is_none() {
                    // unknown id: insert, the supplied id is ignored
                    mutator.create(data).await?;
                }
            }
            Err(_) => {
                mutator.create(data).await?;
            }
        }
        imported += 1;
    }
    Ok(imported)
}
