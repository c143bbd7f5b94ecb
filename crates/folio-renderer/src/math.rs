//! Math typesetting for inline and display math spans.
//!
//! Converts LaTeX math source into MathML presentation markup. A malformed
//! expression never aborts the document render: the affected node becomes
//! an isolated error fragment while sibling nodes render normally.

use std::fmt::Write;

use latex2mathml::{DisplayStyle, latex_to_mathml};

use crate::state::escape_html;

/// Display mode for a math span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    /// Inline math, flowing with the surrounding text.
    Inline,
    /// Display math, set off as its own block.
    Display,
}

/// Typesets math spans into MathML fragments.
#[derive(Debug, Default)]
pub struct MathTypesetter;

impl MathTypesetter {
    /// Create a new typesetter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Typeset `source` and append the resulting fragment to `out`.
    ///
    /// On success the MathML is wrapped in a `math-inline` span or a
    /// `math-display` div. On failure an error fragment carrying the
    /// message is emitted instead and the failure is logged; the caller
    /// continues with the rest of the document.
    pub fn render(&self, source: &str, display: MathDisplay, out: &mut String) {
        let style = match display {
            MathDisplay::Inline => DisplayStyle::Inline,
            MathDisplay::Display => DisplayStyle::Block,
        };

        match latex_to_mathml(source, style) {
            Ok(mathml) => match display {
                MathDisplay::Inline => {
                    write!(out, r#"<span class="math math-inline">{mathml}</span>"#).unwrap();
                }
                MathDisplay::Display => {
                    write!(out, r#"<div class="math math-display">{mathml}</div>"#).unwrap();
                }
            },
            Err(e) => {
                tracing::warn!("math typesetting failed: {e}");
                write!(
                    out,
                    r#"<span class="math math-error" title="{}">{}</span>"#,
                    escape_html(&e.to_string()),
                    escape_html(source)
                )
                .unwrap();
            }
        }
    }
}
