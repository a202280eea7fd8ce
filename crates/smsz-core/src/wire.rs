//! JSON bodies exchanged with the compression gateway.

use serde::{Deserialize, Serialize};

/// `POST /compress` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressRequest {
    pub text: String,
}

/// `POST /compress` response body. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressResponse {
    #[serde(default)]
    pub compressed_b64: Option<String>,
    #[serde(default)]
    pub original_size: Option<u64>,
    #[serde(default)]
    pub compressed_size: Option<u64>,
    #[serde(default)]
    pub compression_time_ms: Option<f64>,
}

impl CompressResponse {
    pub fn new(payload: impl Into<String>, original_size: u64, compressed_size: u64, elapsed_ms: f64) -> Self {
        Self {
            compressed_b64: Some(payload.into()),
            original_size: Some(original_size),
            compressed_size: Some(compressed_size),
            compression_time_ms: Some(elapsed_ms),
        }
    }
}

/// `POST /decompress` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompressRequest {
    pub compressed_b64: String,
}

/// `POST /decompress` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompressResponse {
    pub decompressed_text: String,
}

/// Error body the gateway sends with 4xx/5xx answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
