//! HTML backend for markdown rendering.
//!
//! Produces semantic HTML5 output suitable for the document view.

use std::fmt::Write;

use crate::backend::{AlertKind, RenderBackend};
use crate::state::escape_html;

// SVG icons for alerts (GitHub Octicons-style, 16x16)
const SVG_INFO: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;
const SVG_LIGHTBULB: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M8 1.5c-2.363 0-4 1.69-4 3.75 0 .984.424 1.625.984 2.304l.214.253c.223.264.47.556.673.848.284.411.537.896.621 1.49a.75.75 0 0 1-1.484.211c-.04-.282-.163-.547-.37-.847a8.456 8.456 0 0 0-.542-.68c-.084-.1-.173-.205-.268-.32C3.201 7.75 2.5 6.766 2.5 5.25 2.5 2.31 4.863 0 8 0s5.5 2.31 5.5 5.25c0 1.516-.701 2.5-1.328 3.259-.095.115-.184.22-.268.319-.207.245-.383.453-.541.681-.208.3-.33.565-.37.847a.751.751 0 0 1-1.485-.212c.084-.593.337-1.078.621-1.489.203-.292.45-.584.673-.848.075-.088.147-.173.213-.253.561-.679.985-1.32.985-2.304 0-2.06-1.637-3.75-4-3.75ZM5.75 12h4.5a.75.75 0 0 1 0 1.5h-4.5a.75.75 0 0 1 0-1.5ZM6 15.25a.75.75 0 0 1 .75-.75h2.5a.75.75 0 0 1 0 1.5h-2.5a.75.75 0 0 1-.75-.75Z"></path></svg>"#;
const SVG_REPORT: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 1.75C0 .784.784 0 1.75 0h12.5C15.216 0 16 .784 16 1.75v9.5A1.75 1.75 0 0 1 14.25 13H8.06l-2.573 2.573A1.458 1.458 0 0 1 3 14.543V13H1.75A1.75 1.75 0 0 1 0 11.25Zm1.75-.25a.25.25 0 0 0-.25.25v9.5c0 .138.112.25.25.25h2a.75.75 0 0 1 .75.75v2.19l2.72-2.72a.749.749 0 0 1 .53-.22h6.5a.25.25 0 0 0 .25-.25v-9.5a.25.25 0 0 0-.25-.25Zm7 2.25v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 9a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
const SVG_ALERT: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
const SVG_STOP: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M4.47.22A.749.749 0 0 1 5 0h6c.199 0 .389.079.53.22l4.25 4.25c.141.14.22.331.22.53v6a.749.749 0 0 1-.22.53l-4.25 4.25A.749.749 0 0 1 11 16H5a.749.749 0 0 1-.53-.22L.22 11.53A.749.749 0 0 1 0 11V5c0-.199.079-.389.22-.53Zm.84 1.28L1.5 5.31v5.38l3.81 3.81h5.38l3.81-3.81V5.31L10.69 1.5ZM8 4a.75.75 0 0 1 .75.75v3.5a.75.75 0 0 1-1.5 0v-3.5A.75.75 0 0 1 8 4Zm0 8a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<code>` for inline code
/// - Headed, copyable blocks for highlighted code
/// - `<blockquote>` for blockquotes and styled panels for alerts
/// - New-context navigation for non-fragment links
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn inline_code(code: &str, out: &mut String) {
        write!(out, "<code>{}</code>", escape_html(code)).unwrap();
    }

    fn highlighted_block(lang: &str, content: &str, out: &mut String) {
        let escaped = escape_html(content);
        write!(
            out,
            concat!(
                r#"<div class="code-block">"#,
                r#"<div class="code-block-header">"#,
                r#"<span class="code-block-lang">{lang}</span>"#,
                r#"<button type="button" class="code-copy" data-code="{code}">Copy</button>"#,
                "</div>",
                r#"<pre><code class="language-{lang}">{code}</code></pre>"#,
                "</div>"
            ),
            lang = escape_html(lang),
            code = escaped
        )
        .unwrap();
    }

    fn plain_block(content: &str, out: &mut String) {
        write!(
            out,
            r#"<pre class="code-plain"><code>{}</code></pre>"#,
            escape_html(content)
        )
        .unwrap();
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        let (class, icon, title) = match kind {
            AlertKind::Note => ("note", SVG_INFO, "Note"),
            AlertKind::Tip => ("tip", SVG_LIGHTBULB, "Tip"),
            AlertKind::Important => ("important", SVG_REPORT, "Important"),
            AlertKind::Warning => ("warning", SVG_ALERT, "Warning"),
            AlertKind::Caution => ("caution", SVG_STOP, "Caution"),
        };
        write!(
            out,
            r#"<div class="alert alert-{class}"><div class="alert-title">{icon}{title}</div><div class="alert-content">"#
        )
        .unwrap();
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</div></div>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    fn link_start(href: &str, out: &mut String) {
        if href.starts_with('#') {
            write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
        } else {
            write!(
                out,
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
                escape_html(href)
            )
            .unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_code() {
        let mut out = String::new();
        HtmlBackend::inline_code("let x = 1;", &mut out);
        assert_eq!(out, "<code>let x = 1;</code>");
    }

    #[test]
    fn test_highlighted_block_has_header_and_copy() {
        let mut out = String::new();
        HtmlBackend::highlighted_block("rust", "fn main() {}", &mut out);
        assert!(out.contains(r#"<span class="code-block-lang">rust</span>"#));
        assert!(out.contains(r#"class="code-copy""#));
        assert!(out.contains(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#));
    }

    #[test]
    fn test_plain_block() {
        let mut out = String::new();
        HtmlBackend::plain_block("a\nb", &mut out);
        assert_eq!(out, r#"<pre class="code-plain"><code>a
b</code></pre>"#);
    }

    #[test]
    fn test_blockquote() {
        let mut out = String::new();
        HtmlBackend::blockquote_start(&mut out);
        out.push_str("content");
        HtmlBackend::blockquote_end(&mut out);
        assert_eq!(out, "<blockquote>content</blockquote>");
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        HtmlBackend::image("figure1.png", "Figure 1", "", &mut out);
        assert_eq!(out, r#"<img src="figure1.png" alt="Figure 1">"#);
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("figure1.png", "Figure 1", "Results", &mut out);
        assert_eq!(
            out,
            r#"<img src="figure1.png" title="Results" alt="Figure 1">"#
        );
    }

    #[test]
    fn test_external_link_opens_new_context() {
        let mut out = String::new();
        HtmlBackend::link_start("https://arxiv.org/abs/1706.03762", &mut out);
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_fragment_link_stays_in_document() {
        let mut out = String::new();
        HtmlBackend::link_start("#section-2", &mut out);
        assert_eq!(out, r##"<a href="#section-2">"##);
    }

    #[test]
    fn test_alert_markup() {
        for (kind, class) in [
            (AlertKind::Note, "alert-note"),
            (AlertKind::Tip, "alert-tip"),
            (AlertKind::Important, "alert-important"),
            (AlertKind::Warning, "alert-warning"),
            (AlertKind::Caution, "alert-caution"),
        ] {
            let mut out = String::new();
            HtmlBackend::alert_start(kind, &mut out);
            HtmlBackend::alert_end(kind, &mut out);
            assert!(out.contains(class), "missing {class}");
            assert!(out.contains(r#"<svg class="alert-icon""#));
        }
    }
}
