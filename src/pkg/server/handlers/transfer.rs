use axum::{
    Json,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    pkg::{
        internal::transfer,
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Serialize)]
pub struct ImportReport {
    pub imported: usize,
}

/// Offer the whole collection as a dated CSV download. Read-only.
pub async fn export(State(state): State<AppState>) -> Result<Response> {
    let mut tx = state.db_pool.begin_txn().await?;
    let body = transfer::export_csv(&mut tx).await?;
    let filename = transfer::export_filename(Utc::now().date_naive());
    tracing::info!("exporting jobs as {}", &filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// Reconcile an uploaded CSV file into the job collection. The whole batch
/// runs in one transaction, so the reported count is what actually landed.
pub async fn import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>> {
    let mut text = None;
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("");
        match field_name {
            "file" => text = Some(field.text().await?),
            _ => {
                let _ = field.bytes().await?;
            }
        }
    }
    let text = text.ok_or_else(|| Error::Validation("no CSV file supplied".into()))?;

    let mut tx = state.db_pool.begin_txn().await?;
    let imported = transfer::import_csv(&mut tx, &text).await?;
    if imported == 0 {
        return Err(Error::Validation("no valid data found in CSV file".into()));
    }
    tx.commit().await?;
    tracing::info!("imported {} records", imported);
    Ok(Json(ImportReport { imported }))
}
