use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{pkg::internal::adaptors::jobs::spec::JobEntry, prelude::Result};

pub struct JobSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, create_date, company, job_position, link, status
             FROM jobs WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, create_date, company, job_position, link, status
             FROM jobs ORDER BY create_date DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }

    /// Creation-date range scan over the indexed column, both bounds
    /// inclusive, newest first. Absent bounds fall back to a full scan.
    pub async fn get_filtered(
        &mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobEntry>> {
        let mut builder = QueryBuilder::new(
            "SELECT id, create_date, company, job_position, link, status FROM jobs",
        );
        match (from, to) {
            (Some(from), Some(to)) => {
                builder.push(" WHERE create_date >= ");
                builder.push_bind(from);
                builder.push(" AND create_date <= ");
                builder.push_bind(to);
            }
            (Some(from), None) => {
                builder.push(" WHERE create_date >= ");
                builder.push_bind(from);
            }
            (None, Some(to)) => {
                builder.push(" WHERE create_date <= ");
                builder.push_bind(to);
            }
            (None, None) => {}
        }
        builder.push(" ORDER BY create_date DESC, id DESC");

        let rows = builder
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    /// Case-insensitive substring match on company or link, newest first.
    /// The term is expected lowercased; an empty term matches everything.
    pub async fn search(&mut self, term: &str, limit: i64) -> Result<Vec<JobEntry>> {
        if term.is_empty() {
            let rows = sqlx::query_as::<_, JobEntry>(
                "SELECT id, create_date, company, job_position, link, status
                 FROM jobs ORDER BY create_date DESC, id DESC LIMIT ?1",
            )
            .bind(limit)
            .fetch_all(&mut *self.pool)
            .await?;
            return Ok(rows);
        }
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, create_date, company, job_position, link, status
             FROM jobs
             WHERE instr(lower(company), ?1) > 0 OR instr(lower(link), ?1) > 0
             ORDER BY create_date DESC, id DESC LIMIT ?2",
        )
        .bind(term)
        .bind(limit)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
