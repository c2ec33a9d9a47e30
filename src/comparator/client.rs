use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use super::error::ComparatorError;
use super::{FaceComparator, Verification};

#[derive(Clone)]
/// HTTP client for a DeepFace-compatible verification service.
///
/// Posts both images to `{base_url}/verify` and receives a verified flag
/// plus a distance score. Face detection is not enforced, so photos where
/// no face is found still produce a (poor) distance rather than an error.
pub struct HttpComparator {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    img1_path: String,
    img2_path: String,
    model_name: &'a str,
    enforce_detection: bool,
}

#[derive(Deserialize)]
struct VerifyResponse {
    verified: bool,
    distance: f64,
}

impl HttpComparator {
    /// Creates a comparator client for `base_url` using `model`.
    pub fn new(http: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn verify_url(&self) -> String {
        format!("{}/verify", self.base_url)
    }

    fn data_uri(bytes: &[u8]) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
    }
}

impl FaceComparator for HttpComparator {
    async fn verify(
        &self,
        query: &[u8],
        candidate: &[u8],
    ) -> Result<Verification, ComparatorError> {
        let url = self.verify_url();
        let request = VerifyRequest {
            img1_path: Self::data_uri(query),
            img2_path: Self::data_uri(candidate),
            model_name: &self.model,
            enforce_detection: false,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ComparatorError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ComparatorError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let body: VerifyResponse =
            response
                .json()
                .await
                .map_err(|e| ComparatorError::InvalidResponse {
                    message: e.to_string(),
                })?;

        Ok(Verification {
            verified: body.verified,
            distance: body.distance,
        })
    }
}
