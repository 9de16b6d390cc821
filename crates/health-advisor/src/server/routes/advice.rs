//! Health advice endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AdviceResult, Attachment};

/// Answer a health question with an optional PDF report
///
/// Multipart fields: `query` (required text) and `file` (optional). A
/// well-formed request always gets `200` with a result envelope; only a
/// malformed body is rejected.
pub async fn health_advice(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<AdviceResult>> {
    let mut multipart =
        multipart.map_err(|e| Error::invalid_request(format!("Expected multipart form: {}", e)))?;

    let mut query: Option<String> = None;
    let mut file: Option<Attachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        Error::invalid_request(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "query" => {
                let text = field.text().await.map_err(|e| {
                    Error::invalid_request(format!("Failed to read query: {}", e))
                })?;
                query = Some(text);
            }
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| {
                    Error::invalid_request(format!("Failed to read file {}: {}", filename, e))
                })?;
                file = Some(Attachment::new(filename, data));
            }
            other => {
                tracing::debug!("Ignoring unexpected multipart field '{}'", other);
            }
        }
    }

    let query = query.ok_or_else(|| Error::invalid_request("missing field 'query'"))?;

    Ok(Json(state.processor().handle(&query, file).await))
}
