use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobMetaEntry {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    pub value: String,
}
