use std::sync::Arc;

use sqlx::{Pool, Sqlite, SqlitePool, Transaction, sqlite::SqlitePoolOptions};

use crate::{conf::settings, prelude::Result};

pub fn db_pool() -> Result<Pool<Sqlite>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

/// One transaction per user action: every mutating flow opens a scope here
/// and commits it at the flow boundary.
pub trait GetTxn {
    fn begin_txn(
        &self,
    ) -> impl std::future::Future<Output = Result<Transaction<'static, Sqlite>>> + Send;
}

impl GetTxn for SqlitePool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.begin().await?)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<SqlitePool>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        Ok(AppState {
            db_pool: Arc::new(db_pool()?),
        })
    }
}
