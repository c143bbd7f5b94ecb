//! External diagram engine boundary.
//!
//! Diagram rendering is the only suspending operation in the system. Each
//! diagram instance issues an independent asynchronous request and, on
//! completion, mutates only its own [`RenderTarget`], so completions may
//! arrive in any order. There is no cancellation primitive: a superseding
//! render is distinguished solely by the id comparison in
//! [`RenderTarget::complete`].

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::id::RenderId;
use crate::target::RenderTarget;

/// A render target shared with the task driving its render.
pub type SharedRenderTarget = Arc<Mutex<RenderTarget>>;

/// Error from the external diagram engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Transport-level failure reaching the engine.
    #[error("HTTP error: {0}")]
    Http(String),
    /// The engine rejected the diagram source.
    #[error("engine rejected diagram: {0}")]
    Rejected(String),
}

/// External engine that renders diagram source text to vector markup.
///
/// The render id is forwarded so engines that keep an internal cache can
/// key it per render instead of per source, avoiding stale entries when
/// two diagrams share identical source.
#[async_trait]
pub trait DiagramEngine: Send + Sync {
    /// Render `source` to SVG markup.
    async fn render(&self, id: &RenderId, source: &str) -> Result<String, EngineError>;
}

/// Kroki-backed diagram engine.
///
/// Posts diagram source to `{base}/{endpoint}/svg` and returns the SVG
/// body. HTTP error statuses are surfaced with the response body, which
/// carries the engine's diagnostic for malformed diagrams.
pub struct KrokiEngine {
    base_url: String,
    endpoint: String,
    client: reqwest::Client,
}

impl KrokiEngine {
    /// Create an engine for the given Kroki server URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: folio_renderer::DIAGRAM_LANGUAGE.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the engine endpoint (defaults to the diagram language).
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl DiagramEngine for KrokiEngine {
    async fn render(&self, id: &RenderId, source: &str) -> Result<String, EngineError> {
        let url = format!(
            "{}/{}/svg",
            self.base_url.trim_end_matches('/'),
            self.endpoint
        );
        tracing::debug!(id = id.as_str(), url, "rendering diagram");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "text/plain")
            .body(source.to_owned())
            .send()
            .await
            .map_err(|e| EngineError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EngineError::Http(e.to_string()))?;

        if status.is_client_error() || status.is_server_error() {
            return Err(EngineError::Rejected(format!(
                "HTTP {}: {body}",
                status.as_u16()
            )));
        }

        Ok(body)
    }
}

/// Drive one render of `source` into `target` via `engine`.
///
/// Implements the render protocol: generate a fresh [`RenderId`], clear
/// the target, invoke the engine, and apply the completion through the
/// stale guard. Returns whether the completion was applied (a superseding
/// render may have replaced the id while the engine call was in flight).
pub async fn render_into(
    engine: &dyn DiagramEngine,
    target: &SharedRenderTarget,
    source: &str,
) -> bool {
    let id = RenderId::fresh();
    target
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .begin(id.clone());

    let outcome = engine.render(&id, source).await;

    target
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .complete(&id, outcome)
}
