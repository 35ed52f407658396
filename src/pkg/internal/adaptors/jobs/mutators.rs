use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct CreateJobData {
    pub create_date: DateTime<Utc>,
    pub company: String,
    pub job_position: String,
    pub link: String,
    pub status: i64,
}

pub struct JobMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        JobMutator { pool }
    }

    /// Insert a new record; the store assigns the identifier.
    pub async fn create(&mut self, job: CreateJobData) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (create_date, company, job_position, link, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, create_date, company, job_position, link, status
            "#,
        )
        .bind(job.create_date)
        .bind(&job.company)
        .bind(&job.job_position)
        .bind(&job.link)
        .bind(job.status)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Put semantics for reconciliation: overwrite every field except the
    /// identifier. Returns None when no record carries that id.
    pub async fn replace(&mut self, id: i64, job: CreateJobData) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs
            SET create_date = ?2, company = ?3, job_position = ?4, link = ?5, status = ?6
            WHERE id = ?1
            RETURNING id, create_date, company, job_position, link, status
            "#,
        )
        .bind(id)
        .bind(job.create_date)
        .bind(&job.company)
        .bind(&job.job_position)
        .bind(&job.link)
        .bind(job.status)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_status(&mut self, id: i64, status: i64) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs SET status = ?2 WHERE id = ?1
            RETURNING id, create_date, company, job_position, link, status
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jobs")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
