//! Document view for extracted academic documents.
//!
//! Ties the pipeline together: raw extractor text is normalized by
//! `folio-preprocess`, parsed and rendered by `folio-renderer`, and
//! diagram blocks are resolved asynchronously through `folio-diagrams`.
//! The view re-renders only when its content actually changes, which
//! keeps progressively streamed updates cheap.
//!
//! Also defines the boundary types for the excluded collaborators: the
//! extraction service contract ([`ExtractResult`], [`ExtractError`]) and
//! the view configuration ([`ViewConfig`]).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use folio_diagrams::KrokiEngine;
//! use folio_view::DocumentView;
//!
//! # async fn run() {
//! let engine = Arc::new(KrokiEngine::new("https://kroki.io"));
//! let mut view = DocumentView::new(engine);
//! view.set_content("# Paper\n\nThe famous $E=mc^2$.");
//! view.render_diagrams().await;
//! let html = view.html();
//! # }
//! ```

mod config;
mod extract;
mod view;

pub use config::ViewConfig;
pub use extract::{ExtractError, ExtractResult, ExtractedImage};
pub use view::{DiagramSlot, DocumentView, MarkdownExport, markdown_download_name};
