use sqlx::SqliteConnection;

use crate::prelude::Result;

pub struct FieldMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> FieldMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        FieldMutator { pool }
    }

    pub async fn upsert(&mut self, name: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO field_memory (name, value) VALUES (?1, ?2)
            ON CONFLICT (name) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(name)
        .bind(value)
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM field_memory")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
