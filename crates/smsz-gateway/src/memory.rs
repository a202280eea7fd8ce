//! In-process gateway. Payloads are base64 of the UTF-8 input, so a
//! compress/decompress round trip is exact.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

use smsz_core::{round2, CompressResponse, Result, SmszError};

use crate::traits::Gateway;

#[derive(Debug, Default)]
pub struct MemoryGateway {
    compress_latency: Duration,
    decompress_latency: Duration,
    /// Reported compressed size; defaults to the raw payload length.
    compressed_size: Option<u64>,
    fail_compress: AtomicBool,
    fail_decompress: AtomicBool,
    compress_calls: AtomicUsize,
    decompress_calls: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compress_latency(mut self, latency: Duration) -> Self {
        self.compress_latency = latency;
        self
    }

    pub fn with_decompress_latency(mut self, latency: Duration) -> Self {
        self.decompress_latency = latency;
        self
    }

    pub fn with_compressed_size(mut self, size: u64) -> Self {
        self.compressed_size = Some(size);
        self
    }

    /// Make every subsequent compress call fail with a transport error.
    pub fn set_compress_failure(&self, fail: bool) {
        self.fail_compress.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent decompress call fail with a server error.
    pub fn set_decompress_failure(&self, fail: bool) {
        self.fail_decompress.store(fail, Ordering::SeqCst);
    }

    pub fn compress_calls(&self) -> usize {
        self.compress_calls.load(Ordering::SeqCst)
    }

    pub fn decompress_calls(&self) -> usize {
        self.decompress_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn compress(&self, text: &str) -> Result<CompressResponse> {
        self.compress_calls.fetch_add(1, Ordering::SeqCst);
        let started = tokio::time::Instant::now();
        if !self.compress_latency.is_zero() {
            tokio::time::sleep(self.compress_latency).await;
        }
        if self.fail_compress.load(Ordering::SeqCst) {
            return Err(SmszError::Transport("connection refused".into()));
        }
        if text.is_empty() {
            return Err(SmszError::Status {
                status: 400,
                message: "No text provided for compression".into(),
            });
        }

        let raw = text.as_bytes();
        let payload = STANDARD.encode(raw);
        let compressed_size = self.compressed_size.unwrap_or(raw.len() as u64);
        let elapsed_ms = round2(started.elapsed().as_secs_f64() * 1000.0);
        debug!(original_size = raw.len(), compressed_size, "Memory gateway compress");
        Ok(CompressResponse::new(payload, raw.len() as u64, compressed_size, elapsed_ms))
    }

    async fn decompress(&self, payload: &str) -> Result<String> {
        self.decompress_calls.fetch_add(1, Ordering::SeqCst);
        if !self.decompress_latency.is_zero() {
            tokio::time::sleep(self.decompress_latency).await;
        }
        let corrupted = || SmszError::Status {
            status: 500,
            message: "Invalid compressed data format or corrupted data".into(),
        };
        if self.fail_decompress.load(Ordering::SeqCst) {
            return Err(corrupted());
        }
        if payload.is_empty() {
            return Err(SmszError::Status {
                status: 400,
                message: "No compressed data provided".into(),
            });
        }
        let bytes = STANDARD.decode(payload).map_err(|_| corrupted())?;
        String::from_utf8(bytes).map_err(|_| corrupted())
    }
}
