use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::jobs_meta::spec::JobMetaEntry, prelude::Result};

pub struct JobMetaMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> JobMetaMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        JobMetaMutator { pool }
    }

    pub async fn create(&mut self, job_id: i64, name: &str, value: &str) -> Result<JobMetaEntry> {
        let row = sqlx::query_as::<_, JobMetaEntry>(
            r#"
            INSERT INTO jobs_meta (job_id, name, value)
            VALUES (?1, ?2, ?3)
            RETURNING id, job_id, name, value
            "#,
        )
        .bind(job_id)
        .bind(name)
        .bind(value)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Cascade step for job deletion: drop every entry owned by the job.
    pub async fn delete_for_job(&mut self, job_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jobs_meta WHERE job_id = ?1")
            .bind(job_id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jobs_meta")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
