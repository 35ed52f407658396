use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A remembered UI field value, keyed by field name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
}
