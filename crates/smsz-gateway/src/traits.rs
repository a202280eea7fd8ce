use async_trait::async_trait;
use smsz_core::{CompressResponse, Result};

/// Remote compress/decompress operations. Both are fallible and may take a
/// while; callers must not assume either completes promptly.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Compress `text`, returning the raw answer.
    async fn compress(&self, text: &str) -> Result<CompressResponse>;

    /// Turn a payload from [`Gateway::compress`] back into plaintext.
    async fn decompress(&self, payload: &str) -> Result<String>;
}
