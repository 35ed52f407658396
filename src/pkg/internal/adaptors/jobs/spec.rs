use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i64,
    pub create_date: DateTime<Utc>,
    pub company: String,
    pub job_position: String,
    pub link: String,
    pub status: i64,
}
