//! Render backend trait for format-specific rendering.
//!
//! The main renderer handles structure (tables, lists, inline formatting)
//! generically and delegates the pieces whose markup varies by output
//! surface: code nodes, blockquotes, alerts, images, and links.

use pulldown_cmark::BlockQuoteKind;

/// Alert severity, matching the GitHub blockquote alert markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render inline code as running text.
    fn inline_code(code: &str, out: &mut String);

    /// Render a highlighted code block: a header carrying the language
    /// label and a copy affordance, followed by the code body.
    fn highlighted_block(lang: &str, content: &str, out: &mut String);

    /// Render a plain preformatted block (multi-line, no language tag).
    fn plain_block(content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render alert start markup for the given severity.
    fn alert_start(kind: AlertKind, out: &mut String);

    /// Render alert end markup.
    fn alert_end(kind: AlertKind, out: &mut String);

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a link opening tag.
    ///
    /// Implementations enforce the navigation contract: anything that is
    /// not a same-document fragment opens in a new browsing context.
    fn link_start(href: &str, out: &mut String);

    /// Render a link closing tag.
    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kind_from_blockquote_kind() {
        assert_eq!(AlertKind::from(BlockQuoteKind::Note), AlertKind::Note);
        assert_eq!(AlertKind::from(BlockQuoteKind::Tip), AlertKind::Tip);
        assert_eq!(
            AlertKind::from(BlockQuoteKind::Important),
            AlertKind::Important
        );
        assert_eq!(AlertKind::from(BlockQuoteKind::Warning), AlertKind::Warning);
        assert_eq!(AlertKind::from(BlockQuoteKind::Caution), AlertKind::Caution);
    }
}
