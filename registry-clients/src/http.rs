//! Shared request plumbing

use crate::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Body of a successful response; 404 becomes `NotFound(what)`
pub(crate) async fn success_body(api: &'static str, what: &str, response: Response) -> Result<Bytes> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(what.to_string()));
    }
    if !status.is_success() {
        return Err(Error::Status {
            api,
            status: status.as_u16(),
        });
    }

    Ok(response.bytes().await?)
}

pub(crate) fn decode<T: DeserializeOwned>(api: &'static str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Schema {
        api,
        detail: e.to_string(),
    })
}
