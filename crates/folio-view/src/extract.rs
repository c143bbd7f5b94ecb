//! Upstream extraction service contract.
//!
//! The excluded file-upload collaborator answers a single request with a
//! structured result: the document filename, the total extracted character
//! count, the document text, and an ordered set of extracted images.
//! Image locators are relative and resolved by prefixing the configured
//! service base address.

use serde::{Deserialize, Serialize};

/// One image extracted from the source document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Stable identifier assigned by the extraction service.
    pub id: String,
    /// Human-readable label (e.g., "Figure 3").
    pub label: String,
    /// Relative resource locator on the extraction service.
    pub path: String,
}

impl ExtractedImage {
    /// Resolve the relative locator against the service base address.
    #[must_use]
    pub fn resolve_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Result of a document extraction request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractResult {
    /// Source document filename.
    pub filename: String,
    /// Total extracted character count.
    pub char_count: usize,
    /// Extracted document text, ready for normalization.
    pub text: String,
    /// Extracted images, in document order.
    #[serde(default)]
    pub images: Vec<ExtractedImage>,
}

/// Document-level error from the extraction service.
///
/// Carries the human-readable message from the service response when one
/// is available, otherwise a generic fallback. Surfacing the error keeps
/// the user on the input state; the transition to the rendered view is
/// aborted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Message supplied by the service response.
    #[error("{0}")]
    Service(String),
    /// Generic fallback when the service gave no usable detail.
    #[error("failed to process the document")]
    Unavailable,
}

impl ExtractError {
    /// Build an error from an optional service-supplied detail message.
    #[must_use]
    pub fn from_service_detail(detail: Option<String>) -> Self {
        match detail {
            Some(msg) if !msg.trim().is_empty() => Self::Service(msg),
            _ => Self::Unavailable,
        }
    }
}
