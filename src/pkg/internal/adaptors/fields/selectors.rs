use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::fields::spec::FieldEntry, prelude::Result};

pub struct FieldSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> FieldSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        FieldSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<FieldEntry>> {
        let rows = sqlx::query_as::<_, FieldEntry>(
            "SELECT name, value FROM field_memory ORDER BY name",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
