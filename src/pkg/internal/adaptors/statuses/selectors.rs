use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::statuses::spec::StatusEntry, prelude::Result};

pub struct StatusSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> StatusSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        StatusSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<StatusEntry>> {
        let rows =
            sqlx::query_as::<_, StatusEntry>("SELECT id, label FROM status ORDER BY id")
                .fetch_all(&mut *self.pool)
                .await?;
        Ok(rows)
    }
}
