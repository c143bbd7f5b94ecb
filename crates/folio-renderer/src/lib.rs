//! Markdown rendering pipeline for extracted academic documents.
//!
//! This crate turns normalized extractor text into HTML view fragments:
//!
//! - [`pipeline`]: the fixed, enumerated stage order for syntax extensions
//! - [`MarkdownRenderer`]: event-driven renderer over pulldown-cmark with
//!   a pluggable [`RenderBackend`]
//! - [`classify`]: closed-set classification of code nodes into
//!   inline / diagram / highlighted / plain
//! - [`MathTypesetter`]: LaTeX → MathML typesetting with per-node error
//!   isolation
//!
//! Diagram blocks are not rendered here: they are extracted as
//! [`DiagramBlock`] values and replaced with positional placeholders for
//! the diagram renderer to resolve after its asynchronous renders
//! complete.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
//! let result = renderer.render_markdown("# Hello\n\n**Bold** text");
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

mod backend;
mod code;
mod html;
mod math;
pub mod pipeline;
mod renderer;
mod state;

pub use backend::{AlertKind, RenderBackend};
pub use code::{CodeKind, DIAGRAM_LANGUAGE, DiagramBlock, classify};
pub use html::HtmlBackend;
pub use math::{MathDisplay, MathTypesetter};
pub use pipeline::{PipelineStage, parser_options};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::escape_html;
