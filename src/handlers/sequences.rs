use super::AppState;
use crate::{
    Error, Result,
    types::{ContigSummary, SequenceQuery},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use std::fs::File;

/// Return `[start, end)` of one contig as plain text
pub async fn get_sequence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SequenceQuery>,
) -> Result<impl IntoResponse> {
    let contig = query
        .reference_name
        .ok_or_else(|| Error::InvalidInput("referenceName is required".to_string()))?;

    if !state.storage.exists(&id).await? {
        return Err(Error::NotFound(id));
    }

    let index = state.storage.load_index(&id).await?;
    let record = index.get(&contig)?;
    let start = query.start.unwrap_or(0);
    let end = query
        .end
        .unwrap_or_else(|| i64::try_from(record.total_length).unwrap_or(i64::MAX));
    record.clamp(start, end)?;

    // Seek + read are blocking; each request gets its own handle
    let path = state.storage.sequence_path(&id)?;
    let sequence = tokio::task::spawn_blocking(move || -> Result<String> {
        let mut handle = File::open(&path)?;
        index.get_sequence(&mut handle, &contig, start, end)
    })
    .await
    .map_err(|e| Error::Internal(format!("sequence read task failed: {}", e)))??;

    Ok(([(header::CONTENT_TYPE, "text/plain")], sequence))
}

/// List the contigs of a dataset in index order
pub async fn list_contigs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ContigSummary>>> {
    if !state.storage.exists(&id).await? {
        return Err(Error::NotFound(id));
    }

    let index = state.storage.load_index(&id).await?;
    let contigs = index
        .iter()
        .map(|(name, record)| ContigSummary {
            name: name.to_string(),
            length: record.total_length,
        })
        .collect();

    Ok(Json(contigs))
}
