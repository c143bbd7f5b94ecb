//! Asynchronous diagram rendering for the document view.
//!
//! This crate owns the diagram side of the pipeline:
//! - [`RenderId`]: per-render unique token preventing stale-cache reuse
//! - [`RenderTarget`]: exclusively-owned output slot with an explicit
//!   lifecycle and a stale-completion guard
//! - [`DiagramEngine`]: asynchronous boundary to the external rendering
//!   engine, with a Kroki-backed implementation
//! - [`Replacements`]: single-pass `{{DIAGRAM_n}}` placeholder embedding
//! - [`export_png`]: 2x-upscaled PNG export of a rendered diagram
//!
//! # Render protocol
//!
//! On every change of diagram source: generate a fresh [`RenderId`],
//! clear the owning [`RenderTarget`], invoke the engine asynchronously,
//! and apply the completion through [`RenderTarget::complete`], which
//! discards it if a superseding render replaced the id in the meantime.
//! Failures are scoped to the owning target and logged; the rest of the
//! document is unaffected.

mod embed;
mod engine;
mod export;
mod id;
mod target;

pub use embed::Replacements;
pub use engine::{DiagramEngine, EngineError, KrokiEngine, SharedRenderTarget, render_into};
pub use export::{EXPORT_SCALE, ExportError, RasterExport, export_png, raster_dimensions};
pub use id::RenderId;
pub use target::{RenderTarget, TargetState};
