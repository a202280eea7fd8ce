//! Compression outcomes and the ratio they carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SmszError};
use crate::wire::CompressResponse;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage reduction from `original_size` to `compressed_size`, rounded
/// to two decimals. Zero when the original is empty.
pub fn compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    round2((1.0 - compressed_size as f64 / original_size as f64) * 100.0)
}

/// Size and timing figures reported by the gateway for one compress call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
    pub elapsed_ms: f64,
}

impl CompressionStats {
    pub fn ratio(&self) -> f64 {
        compression_ratio(self.original_size, self.compressed_size)
    }
}

/// Why a compress attempt produced no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input was empty or whitespace only; the gateway was not contacted.
    InputRequired,
    /// The gateway call failed or answered with something unusable.
    CompressionFailed,
}

impl FailureKind {
    /// Short error label.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::InputRequired => "Input required.",
            FailureKind::CompressionFailed => "Compression failed.",
        }
    }

    /// Message shown in place of the compressed payload.
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::InputRequired => "Input required. Please enter text.",
            FailureKind::CompressionFailed => "Error: Compression failed. Check backend server status.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of the most recent compress attempt. Replaced, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompressionOutcome {
    Success {
        original_text: String,
        payload: String,
        stats: CompressionStats,
        ratio: f64,
        completed_at: DateTime<Utc>,
    },
    Failure {
        kind: FailureKind,
    },
}

impl CompressionOutcome {
    /// Build a success outcome from a gateway answer.
    ///
    /// Missing size fields count as zero; a missing payload is malformed.
    pub fn from_response(original_text: impl Into<String>, response: CompressResponse) -> Result<Self> {
        let payload = match response.compressed_b64 {
            Some(p) if !p.trim().is_empty() => p,
            Some(_) => {
                return Err(SmszError::MalformedResponse(
                    "empty compressed_b64".into(),
                ))
            }
            None => {
                return Err(SmszError::MalformedResponse(
                    "missing compressed_b64".into(),
                ))
            }
        };
        if response.original_size.is_none() || response.compressed_size.is_none() {
            tracing::warn!(
                original_size = ?response.original_size,
                compressed_size = ?response.compressed_size,
                "Gateway omitted size fields, defaulting to 0"
            );
        }
        let stats = CompressionStats {
            original_size: response.original_size.unwrap_or_default(),
            compressed_size: response.compressed_size.unwrap_or_default(),
            elapsed_ms: response.compression_time_ms.unwrap_or_default().max(0.0),
        };
        Ok(CompressionOutcome::Success {
            original_text: original_text.into(),
            payload,
            ratio: stats.ratio(),
            stats,
            completed_at: Utc::now(),
        })
    }

    pub fn failure(kind: FailureKind) -> Self {
        CompressionOutcome::Failure { kind }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompressionOutcome::Success { .. })
    }

    /// Error label, present only for failures.
    pub fn error(&self) -> Option<&'static str> {
        match self {
            CompressionOutcome::Success { .. } => None,
            CompressionOutcome::Failure { kind } => Some(kind.label()),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CompressionOutcome::Success { .. } => None,
            CompressionOutcome::Failure { kind } => Some(*kind),
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            CompressionOutcome::Success { ratio, .. } => Some(*ratio),
            CompressionOutcome::Failure { .. } => None,
        }
    }

    pub fn stats(&self) -> Option<&CompressionStats> {
        match self {
            CompressionOutcome::Success { stats, .. } => Some(stats),
            CompressionOutcome::Failure { .. } => None,
        }
    }

    /// Compressed payload, only available on success.
    pub fn payload(&self) -> Option<&str> {
        match self {
            CompressionOutcome::Success { payload, .. } => Some(payload),
            CompressionOutcome::Failure { .. } => None,
        }
    }

    pub fn original_text(&self) -> Option<&str> {
        match self {
            CompressionOutcome::Success { original_text, .. } => Some(original_text),
            CompressionOutcome::Failure { .. } => None,
        }
    }

    /// What goes in the compressed-output area: the payload, or the failure message.
    pub fn display_text(&self) -> &str {
        match self {
            CompressionOutcome::Success { payload, .. } => payload,
            CompressionOutcome::Failure { kind } => kind.message(),
        }
    }
}

impl fmt::Display for CompressionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionOutcome::Success { stats, ratio, .. } => write!(
                f,
                "Outcome(ok, {} -> {} bytes, {:.2}%)",
                stats.original_size, stats.compressed_size, ratio
            ),
            CompressionOutcome::Failure { kind } => write!(f, "Outcome(failed, {})", kind),
        }
    }
}
