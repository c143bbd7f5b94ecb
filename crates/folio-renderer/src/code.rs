//! Code node classification.
//!
//! The document tree does not unambiguously mark a code node as inline,
//! diagram, highlighted, or plain; this module computes that decision once
//! per node from the inline marker, the language tag, and the literal
//! content shape.

/// Language tag that routes a fenced block to the diagram renderer.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Closed set of code node renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Running-text inline code.
    Inline,
    /// Diagram source, delegated to the diagram renderer.
    Diagram,
    /// Code block with a language header, copy affordance, and highlighted body.
    Highlighted,
    /// Bordered preformatted block without highlighting.
    Plain,
}

/// Classify a code node.
///
/// Rules, in order:
/// 1. An explicit inline marker wins.
/// 2. No language tag and no line break in the literal: inline.
/// 3. Language tag equals [`DIAGRAM_LANGUAGE`]: diagram, regardless of
///    content shape.
/// 4. Any other language tag: highlighted block.
/// 5. Otherwise (multi-line, untagged): plain block.
#[must_use]
pub fn classify(explicit_inline: bool, language: Option<&str>, text: &str) -> CodeKind {
    if explicit_inline {
        return CodeKind::Inline;
    }
    match language {
        None | Some("") => {
            if text.trim_end_matches('\n').contains('\n') {
                CodeKind::Plain
            } else {
                CodeKind::Inline
            }
        }
        Some(lang) if lang == DIAGRAM_LANGUAGE => CodeKind::Diagram,
        Some(_) => CodeKind::Highlighted,
    }
}

/// A diagram source block extracted during rendering.
///
/// The renderer replaces the block with a positional placeholder; the
/// diagram renderer resolves placeholders once its asynchronous renders
/// complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramBlock {
    /// Zero-based index of this diagram in the document.
    pub index: usize,
    /// Raw diagram source from the fence.
    pub source: String,
}

impl DiagramBlock {
    /// Placeholder emitted into the HTML in place of diagram `index`.
    #[must_use]
    pub fn placeholder(index: usize) -> String {
        format!("{{{{DIAGRAM_{index}}}}}")
    }
}
