//! Core data model for the SMS compression client: outcomes, ratio math,
//! gateway wire types, errors and configuration.

pub mod config;
pub mod error;
pub mod outcome;
pub mod wire;

pub use config::{AnimationConfig, ClientConfig, GatewayConfig};
pub use error::{Result, SmszError};
pub use outcome::{compression_ratio, round2, CompressionOutcome, CompressionStats, FailureKind};
pub use wire::{CompressRequest, CompressResponse, DecompressRequest, DecompressResponse, ErrorBody};
