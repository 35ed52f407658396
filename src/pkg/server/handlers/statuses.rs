use axum::{Json, extract::State};

use crate::{
    pkg::{
        internal::adaptors::statuses::{selectors::StatusSelector, spec::StatusEntry},
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StatusEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let statuses = StatusSelector::new(&mut tx).get_all().await?;
    Ok(Json(statuses))
}
