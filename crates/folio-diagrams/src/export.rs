//! Raster export for rendered diagrams.
//!
//! Serializes the SVG held by a [`RenderTarget`] to a PNG suitable for
//! download. Target pixel dimensions come from the SVG's declared
//! `viewBox` width/height, falling back to its `width`/`height`
//! attributes, multiplied by a fixed 2x upscale for export resolution.
//! The raster is painted on a white background and named with a creation
//! timestamp. Export failures are returned to the caller; the live target
//! is never affected.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use resvg::{tiny_skia, usvg};

use crate::target::RenderTarget;

/// Fixed upscale factor applied to export dimensions.
pub const EXPORT_SCALE: f64 = 2.0;

/// `viewBox` attribute on the root `<svg>` element.
static VIEWBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<svg[^>]*\sviewBox="([^"]+)""#).unwrap());

/// `width` attribute with an optional `px` suffix.
static SVG_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<svg[^>]*\swidth="([0-9.]+)(?:px)?""#).unwrap());

/// `height` attribute with an optional `px` suffix.
static SVG_HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<svg[^>]*\sheight="([0-9.]+)(?:px)?""#).unwrap());

/// Error from a raster export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The target holds no rendered diagram.
    #[error("no rendered diagram to export")]
    NoDiagram,
    /// Raster dimensions could not be determined from the SVG.
    #[error("could not determine raster dimensions")]
    Dimensions,
    /// The SVG could not be parsed for rasterization.
    #[error("invalid SVG: {0}")]
    InvalidSvg(String),
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// A completed raster export.
#[derive(Debug)]
pub struct RasterExport {
    /// Download filename, `chart-<timestamp>.png`.
    pub filename: String,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

/// Base (unscaled) dimensions declared by the SVG.
fn svg_base_dimensions(svg: &str) -> Option<(f64, f64)> {
    // viewBox = "min-x min-y width height"
    if let Some(caps) = VIEWBOX_RE.captures(svg) {
        let parts: Vec<f64> = caps[1]
            .split_whitespace()
            .filter_map(|p| p.parse().ok())
            .collect();
        if parts.len() == 4 && parts[2] > 0.0 && parts[3] > 0.0 {
            return Some((parts[2], parts[3]));
        }
    }

    // Fallback: explicit width/height attributes
    let width: f64 = SVG_WIDTH_RE.captures(svg)?[1].parse().ok()?;
    let height: f64 = SVG_HEIGHT_RE.captures(svg)?[1].parse().ok()?;
    (width > 0.0 && height > 0.0).then_some((width, height))
}

/// Export pixel dimensions for the SVG: declared size times [`EXPORT_SCALE`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn raster_dimensions(svg: &str) -> Option<(u32, u32)> {
    let (width, height) = svg_base_dimensions(svg)?;
    Some((
        (width * EXPORT_SCALE).round() as u32,
        (height * EXPORT_SCALE).round() as u32,
    ))
}

/// Export the target's rendered diagram as a downloadable PNG.
#[allow(clippy::cast_precision_loss)]
pub fn export_png(target: &RenderTarget) -> Result<RasterExport, ExportError> {
    let svg = target.svg().ok_or(ExportError::NoDiagram)?;
    let (width, height) = raster_dimensions(svg).ok_or(ExportError::Dimensions)?;

    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| ExportError::InvalidSvg(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Dimensions)?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(RasterExport {
        filename: format!("chart-{}.png", Utc::now().timestamp_millis()),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RenderId;

    /// Extract width and height from PNG image data.
    ///
    /// PNG format: 8-byte signature, then IHDR chunk with width/height at
    /// bytes 16-24 (big-endian).
    fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
        if data.len() < 24 || &data[0..8] != b"\x89PNG\r\n\x1a\n" {
            return None;
        }
        let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
        let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
        Some((width, height))
    }

    fn rendered_target(svg: &str) -> RenderTarget {
        let mut target = RenderTarget::new();
        let id = RenderId::fresh();
        target.begin(id.clone());
        target.complete(&id, Ok(svg.to_owned()));
        target
    }

    #[test]
    fn test_raster_dimensions_from_viewbox() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"></svg>"#;
        assert_eq!(raster_dimensions(svg), Some((200, 100)));
    }

    #[test]
    fn test_raster_dimensions_viewbox_wins_over_attributes() {
        let svg = r#"<svg width="400" height="300" viewBox="0 0 100 50"></svg>"#;
        assert_eq!(raster_dimensions(svg), Some((200, 100)));
    }

    #[test]
    fn test_raster_dimensions_attribute_fallback() {
        let svg = r#"<svg width="40" height="30"></svg>"#;
        assert_eq!(raster_dimensions(svg), Some((80, 60)));

        let svg_px = r#"<svg width="40px" height="30px"></svg>"#;
        assert_eq!(raster_dimensions(svg_px), Some((80, 60)));
    }

    #[test]
    fn test_raster_dimensions_undeclared() {
        assert_eq!(raster_dimensions("<svg></svg>"), None);
        assert_eq!(raster_dimensions("not svg at all"), None);
    }

    #[test]
    fn test_export_png_dimensions_and_name() {
        let target = rendered_target(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><rect width="100" height="50" fill="#336699"/></svg>"##,
        );

        let export = export_png(&target).unwrap();
        assert!(export.filename.starts_with("chart-"));
        assert!(export.filename.ends_with(".png"));
        assert_eq!(png_dimensions(&export.png), Some((200, 100)));
    }

    #[test]
    fn test_export_empty_target_fails() {
        let target = RenderTarget::new();
        assert!(matches!(export_png(&target), Err(ExportError::NoDiagram)));
    }

    #[test]
    fn test_export_undeclared_dimensions_fails() {
        let target = rendered_target(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#);
        assert!(matches!(export_png(&target), Err(ExportError::Dimensions)));
    }

    #[test]
    fn test_export_failure_leaves_target_untouched() {
        let target = RenderTarget::new();
        let _ = export_png(&target);
        assert!(target.svg().is_none());
        assert!(target.html().contains("diagram-loading"));
    }
}
