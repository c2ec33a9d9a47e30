use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

use super::ObjectStore;
use super::error::CorpusError;

#[derive(Clone)]
/// S3-compatible object store client (MinIO in the reference deployment).
pub struct S3CorpusStore {
    client: Client,
    bucket: String,
}

impl S3CorpusStore {
    /// Creates a client for an S3-compatible `endpoint` and `bucket`.
    ///
    /// Uses path-style addressing, which MinIO requires.
    pub fn connect(endpoint: &str, access_key: &str, secret_key: &str, bucket: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "facematch");

        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .region(Region::new("us-east-1"))
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            bucket: bucket.to_string(),
        }
    }

    /// Returns the configured bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ObjectStore for S3CorpusStore {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, CorpusError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| CorpusError::ListFailed {
                bucket: self.bucket.clone(),
                prefix: prefix.to_string(),
                message: e.to_string(),
            })?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }
        }

        Ok(keys)
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>, CorpusError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CorpusError::FetchFailed {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| CorpusError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(data.into_bytes().to_vec())
    }
}
