use serde::{Deserialize, Serialize};

use crate::identity::EnrichedMatch;

/// Response body for both match operations.
#[derive(Serialize, Debug)]
pub struct CompareResponse {
    pub success: bool,
    /// Echoed back only for the compare-by-identity operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<i64>,
    pub matches_count: usize,
    pub matches: Vec<EnrichedMatch>,
    pub message: String,
}

impl CompareResponse {
    pub fn from_matches(matches: Vec<EnrichedMatch>, identity_id: Option<i64>) -> Self {
        let message = if matches.is_empty() {
            "no matches found".to_string()
        } else {
            format!("found {} match(es)", matches.len())
        };

        Self {
            success: true,
            identity_id,
            matches_count: matches.len(),
            matches,
            message,
        }
    }
}

/// Request body for `POST /compare-by-id`.
#[derive(Deserialize, Debug)]
pub struct CompareByIdRequest {
    pub identity_id: i64,
    pub threshold: Option<f64>,
}
