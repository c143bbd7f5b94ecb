//! Per-diagram render targets.
//!
//! A [`RenderTarget`] is the exclusively-owned output slot for one diagram
//! instance. Its lifecycle is explicit: [`begin`](RenderTarget::begin)
//! clears the slot and installs the issued [`RenderId`];
//! [`complete`](RenderTarget::complete) populates it on success or marks a
//! local error on failure, and discards the completion entirely when the
//! issued id no longer matches the slot's current id (a superseding render
//! replaced it while the engine call was in flight).

use folio_renderer::escape_html;

use crate::engine::EngineError;
use crate::id::RenderId;

/// Current contents of a render target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetState {
    /// Cleared; a render may be in flight.
    Empty,
    /// Vector markup produced by the engine.
    Rendered(String),
    /// Local render failure message.
    Failed(String),
}

/// Exclusively-owned output slot for one diagram instance.
#[derive(Debug)]
pub struct RenderTarget {
    current: Option<RenderId>,
    state: TargetState,
}

impl RenderTarget {
    /// Create an empty target with no issued render.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: None,
            state: TargetState::Empty,
        }
    }

    /// Begin a render: clear the slot and install the issued id.
    pub fn begin(&mut self, id: RenderId) {
        self.state = TargetState::Empty;
        self.current = Some(id);
    }

    /// Apply a render completion.
    ///
    /// The completion is applied only when `id` matches the slot's current
    /// id; otherwise it is stale (a newer render superseded it) and is
    /// discarded. Returns whether the completion was applied.
    pub fn complete(&mut self, id: &RenderId, outcome: Result<String, EngineError>) -> bool {
        if self.current.as_ref() != Some(id) {
            tracing::debug!(id = id.as_str(), "discarding stale diagram completion");
            return false;
        }
        match outcome {
            Ok(svg) => self.state = TargetState::Rendered(svg),
            Err(e) => {
                tracing::warn!(id = id.as_str(), "diagram rendering failed: {e}");
                self.state = TargetState::Failed(e.to_string());
            }
        }
        true
    }

    /// The id of the most recently issued render, if any.
    #[must_use]
    pub fn current_id(&self) -> Option<&RenderId> {
        self.current.as_ref()
    }

    /// Current slot contents.
    #[must_use]
    pub fn state(&self) -> &TargetState {
        &self.state
    }

    /// The rendered vector markup, if the slot holds one.
    #[must_use]
    pub fn svg(&self) -> Option<&str> {
        match &self.state {
            TargetState::Rendered(svg) => Some(svg),
            TargetState::Empty | TargetState::Failed(_) => None,
        }
    }

    /// Render the slot as an HTML figure.
    ///
    /// A failure is scoped to this figure only; the rest of the document
    /// is unaffected.
    #[must_use]
    pub fn html(&self) -> String {
        match &self.state {
            TargetState::Empty => {
                r#"<figure class="diagram diagram-loading"><p>Loading diagram...</p></figure>"#
                    .to_owned()
            }
            TargetState::Rendered(svg) => {
                format!(r#"<figure class="diagram">{svg}</figure>"#)
            }
            TargetState::Failed(msg) => format!(
                r#"<figure class="diagram diagram-error"><pre>Diagram rendering failed: {}</pre></figure>"#,
                escape_html(msg)
            ),
        }
    }
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_completion_populates_target() {
        let mut target = RenderTarget::new();
        let id = RenderId::fresh();
        target.begin(id.clone());

        assert!(target.complete(&id, Ok("<svg>chart</svg>".to_owned())));
        assert_eq!(target.svg(), Some("<svg>chart</svg>"));
        assert_eq!(target.html(), r#"<figure class="diagram"><svg>chart</svg></figure>"#);
    }

    #[test]
    fn test_failed_completion_marks_error() {
        let mut target = RenderTarget::new();
        let id = RenderId::fresh();
        target.begin(id.clone());

        assert!(target.complete(&id, Err(EngineError::Rejected("parse error".to_owned()))));
        assert_eq!(target.svg(), None);
        assert!(target.html().contains("diagram-error"));
        assert!(target.html().contains("parse error"));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut target = RenderTarget::new();
        let first = RenderId::fresh();
        target.begin(first.clone());

        // A superseding render replaces the issued id before the first
        // completion arrives
        let second = RenderId::fresh();
        target.begin(second.clone());

        assert!(!target.complete(&first, Ok("<svg>old</svg>".to_owned())));
        assert_eq!(target.state(), &TargetState::Empty);

        assert!(target.complete(&second, Ok("<svg>new</svg>".to_owned())));
        assert_eq!(target.svg(), Some("<svg>new</svg>"));
    }

    #[test]
    fn test_begin_clears_previous_content() {
        let mut target = RenderTarget::new();
        let id = RenderId::fresh();
        target.begin(id.clone());
        target.complete(&id, Ok("<svg>old</svg>".to_owned()));

        target.begin(RenderId::fresh());
        assert_eq!(target.state(), &TargetState::Empty);
        assert!(target.html().contains("diagram-loading"));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let mut target = RenderTarget::new();
        let id = RenderId::fresh();
        target.begin(id.clone());
        target.complete(&id, Err(EngineError::Rejected("<script>".to_owned())));
        assert!(target.html().contains("&lt;script&gt;"));
        assert!(!target.html().contains("<script>"));
    }
}
