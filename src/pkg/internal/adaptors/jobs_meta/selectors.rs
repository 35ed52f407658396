use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::jobs_meta::spec::JobMetaEntry, prelude::Result};

pub struct JobMetaSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> JobMetaSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        JobMetaSelector { pool }
    }

    pub async fn get_for_job(&mut self, job_id: i64) -> Result<Vec<JobMetaEntry>> {
        let rows = sqlx::query_as::<_, JobMetaEntry>(
            "SELECT id, job_id, name, value FROM jobs_meta WHERE job_id = ?1 ORDER BY id",
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
