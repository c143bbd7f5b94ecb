//! Document view assembly.
//!
//! [`DocumentView`] owns the full path from raw extractor text to the
//! rendered HTML view: normalization, the markdown pipeline, and one
//! render target per diagram block. Pipeline recomputation is keyed to
//! content identity so progressively streamed text stays cheap: setting
//! identical content is a no-op.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use folio_diagrams::{
    DiagramEngine, RenderTarget, Replacements, SharedRenderTarget, render_into,
};
use folio_renderer::{HtmlBackend, MarkdownRenderer};

/// One diagram instance in the document: its source and its owned target.
///
/// Slots never share rendering state, so their asynchronous completions
/// may arrive in any order without cross-contamination.
#[derive(Debug)]
pub struct DiagramSlot {
    /// Diagram source from the fenced block.
    pub source: String,
    /// Output slot for this diagram only.
    pub target: SharedRenderTarget,
}

/// A markdown export of the document content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownExport {
    /// Download filename: the source filename with a markup extension.
    pub filename: String,
    /// Full document content.
    pub content: String,
}

/// Rendered view of one extracted document.
pub struct DocumentView {
    engine: Arc<dyn DiagramEngine>,
    content: String,
    pipeline_html: String,
    slots: Vec<DiagramSlot>,
}

impl DocumentView {
    /// Create an empty view that renders diagrams through `engine`.
    #[must_use]
    pub fn new(engine: Arc<dyn DiagramEngine>) -> Self {
        Self {
            engine,
            content: String::new(),
            pipeline_html: String::new(),
            slots: Vec::new(),
        }
    }

    /// Replace the document content.
    ///
    /// The pipeline re-runs only when the text actually changed; setting
    /// identical content returns `false` and leaves the rendered state
    /// (including in-flight diagram targets) untouched. Changed content
    /// rebuilds the view and replaces every diagram slot, releasing the
    /// previous targets.
    pub fn set_content(&mut self, text: &str) -> bool {
        if self.content == text {
            tracing::debug!("content unchanged, render skipped");
            return false;
        }
        self.content = text.to_owned();
        self.rebuild();
        true
    }

    /// Run normalization and the markdown pipeline, rebuilding slots.
    fn rebuild(&mut self) {
        let normalized = folio_preprocess::normalize(&self.content);
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
        let result = renderer.render_markdown(&normalized);

        self.pipeline_html = result.html;
        self.slots = result
            .diagrams
            .into_iter()
            .map(|block| DiagramSlot {
                source: block.source,
                target: Arc::new(Mutex::new(RenderTarget::new())),
            })
            .collect();
    }

    /// The current document content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Diagram slots for the current content, in document order.
    #[must_use]
    pub fn diagram_slots(&self) -> &[DiagramSlot] {
        &self.slots
    }

    /// Issue an independent asynchronous render for every diagram slot.
    ///
    /// Each slot's task mutates only its own target; completions are
    /// stale-guarded, so a view rebuilt mid-flight simply discards the
    /// superseded results. Returns once every issued render has settled.
    pub async fn render_diagrams(&self) {
        let mut tasks = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let engine = Arc::clone(&self.engine);
            let target = Arc::clone(&slot.target);
            let source = slot.source.clone();
            tasks.push(tokio::spawn(async move {
                render_into(engine.as_ref(), &target, &source).await;
            }));
        }
        for task in tasks {
            let _ = task.await;
        }
    }

    /// Assemble the current view HTML.
    ///
    /// Placeholders are replaced with each slot's current figure state, so
    /// the view is valid at any time: slots still rendering show their
    /// loading figure, failed slots their local error figure.
    #[must_use]
    pub fn html(&self) -> String {
        let mut html = self.pipeline_html.clone();
        let mut replacements = Replacements::with_capacity(self.slots.len());
        for (index, slot) in self.slots.iter().enumerate() {
            let fragment = slot
                .target
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .html();
            replacements.add(index, fragment);
        }
        replacements.apply(&mut html);
        html
    }

    /// Export the full document content as a markdown download.
    #[must_use]
    pub fn export_markdown(&self, source_filename: &str) -> MarkdownExport {
        MarkdownExport {
            filename: markdown_download_name(source_filename),
            content: self.content.clone(),
        }
    }
}

/// Download name for the document export: source stem plus `.md`.
#[must_use]
pub fn markdown_download_name(source_filename: &str) -> String {
    let stem = Path::new(source_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    format!("{stem}.md")
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use folio_diagrams::{EngineError, RenderId};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Engine returning a canned SVG without touching the network.
    struct StaticEngine {
        svg: Result<String, String>,
    }

    impl StaticEngine {
        fn ok(svg: &str) -> Arc<dyn DiagramEngine> {
            Arc::new(Self {
                svg: Ok(svg.to_owned()),
            })
        }

        fn failing(message: &str) -> Arc<dyn DiagramEngine> {
            Arc::new(Self {
                svg: Err(message.to_owned()),
            })
        }
    }

    #[async_trait]
    impl DiagramEngine for StaticEngine {
        async fn render(&self, _id: &RenderId, _source: &str) -> Result<String, EngineError> {
            self.svg.clone().map_err(EngineError::Rejected)
        }
    }

    #[test]
    fn test_set_content_skips_identical_text() {
        let mut view = DocumentView::new(StaticEngine::ok("<svg></svg>"));
        assert!(view.set_content("hello"));
        assert!(!view.set_content("hello"));
        assert!(view.set_content("hello world"));
    }

    #[test]
    fn test_content_change_replaces_diagram_slots() {
        let mut view = DocumentView::new(StaticEngine::ok("<svg></svg>"));
        view.set_content("```mermaid\ngraph TD\n```");
        assert_eq!(view.diagram_slots().len(), 1);

        view.set_content("no diagrams here");
        assert!(view.diagram_slots().is_empty());
    }

    #[test]
    fn test_pending_diagram_shows_loading_figure() {
        let mut view = DocumentView::new(StaticEngine::ok("<svg></svg>"));
        view.set_content("```mermaid\ngraph TD\n```");
        assert!(view.html().contains("diagram-loading"));
    }

    #[tokio::test]
    async fn test_render_diagrams_injects_svg() {
        let mut view = DocumentView::new(StaticEngine::ok(r#"<svg viewBox="0 0 10 10"></svg>"#));
        view.set_content("```mermaid\ngraph TD\n  A --> B\n```");

        view.render_diagrams().await;

        let html = view.html();
        assert!(html.contains(r#"<figure class="diagram"><svg viewBox="0 0 10 10"></svg></figure>"#));
        assert!(!html.contains("{{DIAGRAM_"));
    }

    #[tokio::test]
    async fn test_failed_diagram_is_isolated() {
        let mut view = DocumentView::new(StaticEngine::failing("unexpected token"));
        view.set_content("before\n\n```mermaid\nbad source\n```\n\nafter");

        view.render_diagrams().await;

        let html = view.html();
        assert!(html.contains("diagram-error"));
        assert!(html.contains("unexpected token"));
        // Sibling content is unaffected
        assert!(html.contains("<p>before</p>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[tokio::test]
    async fn test_two_identical_diagrams_get_distinct_render_ids() {
        let mut view = DocumentView::new(StaticEngine::ok("<svg></svg>"));
        view.set_content("```mermaid\ngraph TD\n```\n\n```mermaid\ngraph TD\n```");
        view.render_diagrams().await;

        let slots = view.diagram_slots();
        assert_eq!(slots.len(), 2);
        let first = slots[0].target.lock().unwrap().current_id().cloned();
        let second = slots[1].target.lock().unwrap().current_id().cloned();
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn test_markdown_download_name() {
        assert_eq!(markdown_download_name("paper.pdf"), "paper.md");
        assert_eq!(markdown_download_name("archive.tar.gz"), "archive.tar.md");
        assert_eq!(markdown_download_name(""), "document.md");
    }

    #[test]
    fn test_export_markdown() {
        let mut view = DocumentView::new(StaticEngine::ok("<svg></svg>"));
        view.set_content("# Title");
        let export = view.export_markdown("attention.pdf");
        assert_eq!(export.filename, "attention.md");
        assert_eq!(export.content, "# Title");
    }

    #[tokio::test]
    async fn test_end_to_end_combined_defects() {
        // Bracket math plus a fence glued to prose, as the extractor emits
        let raw = "The loss is \\[L = a &= b\\] as shown```mermaid\ngraph TD\n  A --> B\n```";
        let mut view =
            DocumentView::new(StaticEngine::ok(r#"<svg viewBox="0 0 100 50"></svg>"#));
        assert!(view.set_content(raw));

        let html = view.html();
        // One display-math node, typeset or isolated as a math fragment
        assert!(html.contains("math"));
        // The fence was separated from the prose and classified as a diagram
        assert_eq!(view.diagram_slots().len(), 1);
        assert_eq!(view.diagram_slots()[0].source, "graph TD\n  A --> B\n");

        view.render_diagrams().await;
        assert!(view.html().contains(r#"<figure class="diagram">"#));
    }

    #[tokio::test]
    async fn test_malformed_math_does_not_block_diagrams() {
        let raw = "$$\\frac{a}{$$\n\n```mermaid\ngraph TD\n```";
        let mut view = DocumentView::new(StaticEngine::ok("<svg></svg>"));
        view.set_content(raw);
        view.render_diagrams().await;

        let html = view.html();
        assert!(html.contains(r#"<figure class="diagram">"#));
    }
}
