use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    pkg::{
        internal::adaptors::fields::{mutators::FieldMutator, selectors::FieldSelector},
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct SaveFieldInput {
    pub value: String,
}

/// All remembered field values, keyed by field name, for pre-filling the
/// capture form on open.
pub async fn list(State(state): State<AppState>) -> Result<Json<HashMap<String, String>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let fields = FieldSelector::new(&mut tx).get_all().await?;
    Ok(Json(fields.into_iter().map(|f| (f.name, f.value)).collect()))
}

pub async fn save(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<SaveFieldInput>,
) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    FieldMutator::new(&mut tx).upsert(&name, &input.value).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn clear(State(state): State<AppState>) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    FieldMutator::new(&mut tx).clear().await?;
    tx.commit().await?;
    Ok(())
}
