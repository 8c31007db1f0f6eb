use crate::types::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Connection failed: {message}")]
    Connect { message: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Sends requests to the API under test.
///
/// Any HTTP status is a successful send; only transport and decoding
/// faults are errors.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse>;

    /// Confirms the base URL answers at all.
    async fn probe(&self) -> ClientResult<()> {
        self.send(&ApiRequest::get("")).await.map(|_| ())
    }

    fn base_url(&self) -> &str;
}
