//! Structured error types for certificate generation.
//!
//! Two conditions are fatal by contract: a mandatory font weight that
//! cannot be loaded, and a configured logo/signature image that cannot be
//! read or decoded. Both are detected before any drawing starts, so a
//! failed generation never leaves a half-drawn artifact behind.

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::ImageKind;
use crate::font::FontRole;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum Error {
    /// A mandatory font weight could not be read or parsed.
    #[error("missing {role} font asset '{}': {reason}", .path.display())]
    MissingFontAsset {
        role: FontRole,
        path: PathBuf,
        reason: String,
    },

    /// A configured logo or signature image could not be read or decoded.
    /// Unlike the background, these are expected to be present once named.
    #[error("failed to load {kind} image '{source_key}': {reason}")]
    AssetLoad {
        kind: ImageKind,
        source_key: String,
        reason: String,
    },

    /// A JSON request failed to parse.
    #[error("failed to parse certificate request: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing the output artifact failed.
    #[error("failed to write certificate artifact: {0}")]
    Io(#[from] std::io::Error),
}
