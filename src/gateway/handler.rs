use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::{info, instrument};

use crate::comparator::FaceComparator;
use crate::corpus::{ObjectStore, fetch_with_retry};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{CompareByIdRequest, CompareResponse};
use crate::gateway::state::HandlerState;
use crate::identity::{EnrichedMatch, MetadataStore, enrich, exclude_identity};
use crate::matcher::find_matches;

/// File extensions accepted for uploaded query images.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Returns `true` if `filename` carries an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Runs the full pipeline for one query image: corpus scan, threshold
/// matching, identity enrichment.
async fn run_pipeline<S, C, M>(
    state: &HandlerState<S, C, M>,
    query: &[u8],
    threshold: f64,
) -> Result<Vec<EnrichedMatch>, GatewayError>
where
    S: ObjectStore,
    C: FaceComparator,
    M: MetadataStore,
{
    let matches = find_matches(
        state.corpus.as_ref(),
        state.comparator.as_ref(),
        query,
        &state.corpus_prefix,
        threshold,
        state.scan,
    )
    .await?;

    if matches.is_empty() {
        return Ok(Vec::new());
    }

    let enriched = enrich(state.metadata.as_ref(), &matches).await?;
    Ok(enriched)
}

/// `POST /compare`: match an uploaded image against the corpus.
///
/// Multipart form with an `image` file field and an optional `threshold`
/// text field.
#[instrument(skip(state, multipart))]
pub async fn compare_handler<S, C, M>(
    State(state): State<HandlerState<S, C, M>>,
    mut multipart: Multipart,
) -> Result<Json<CompareResponse>, GatewayError>
where
    S: ObjectStore + Send + Sync + 'static,
    C: FaceComparator + Send + Sync + 'static,
    M: MetadataStore + Send + Sync + 'static,
{
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut threshold: Option<f64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("failed to read image field: {e}"))
                })?;
                image = Some((filename, bytes.to_vec()));
            }
            Some("threshold") => {
                let text = field.text().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("failed to read threshold field: {e}"))
                })?;
                let parsed = text.trim().parse().map_err(|_| {
                    GatewayError::InvalidRequest(format!("invalid threshold '{text}'"))
                })?;
                threshold = Some(parsed);
            }
            _ => {}
        }
    }

    let (filename, query) =
        image.ok_or_else(|| GatewayError::InvalidRequest("no image was sent".to_string()))?;

    if filename.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "empty filename".to_string(),
        ));
    }
    if !allowed_file(&filename) {
        return Err(GatewayError::InvalidRequest(format!(
            "file type not allowed; use: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    if query.is_empty() {
        return Err(GatewayError::InvalidRequest("empty image".to_string()));
    }
    if query.len() > state.max_upload_bytes {
        return Err(GatewayError::PayloadTooLarge {
            size: query.len(),
            limit: state.max_upload_bytes,
        });
    }

    let threshold = threshold.unwrap_or(state.default_threshold);
    info!(filename, threshold, "searching corpus for matches");

    let enriched = run_pipeline(&state, &query, threshold).await?;
    Ok(Json(CompareResponse::from_matches(enriched, None)))
}

/// `POST /compare-by-id`: match an identity's own reference photo against
/// the corpus, excluding the identity from its results.
#[instrument(skip(state, request), fields(identity_id = request.identity_id))]
pub async fn compare_by_identity_handler<S, C, M>(
    State(state): State<HandlerState<S, C, M>>,
    Json(request): Json<CompareByIdRequest>,
) -> Result<Json<CompareResponse>, GatewayError>
where
    S: ObjectStore + Send + Sync + 'static,
    C: FaceComparator + Send + Sync + 'static,
    M: MetadataStore + Send + Sync + 'static,
{
    let threshold = request.threshold.unwrap_or(state.default_threshold);

    let photo_path = state
        .metadata
        .reference_photo(request.identity_id)
        .await?
        .ok_or(GatewayError::IdentityNotFound(request.identity_id))?;

    // The identity's own photo becomes the query image.
    let query =
        fetch_with_retry(state.corpus.as_ref(), &photo_path, state.scan.fetch_retries).await?;

    info!(photo_path, threshold, "searching corpus for matches");

    let enriched = run_pipeline(&state, &query, threshold).await?;
    let enriched = exclude_identity(enriched, request.identity_id);

    Ok(Json(CompareResponse::from_matches(
        enriched,
        Some(request.identity_id),
    )))
}
