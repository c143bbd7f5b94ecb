//! Text repair for machine-extracted document text.
//!
//! PDF extraction services deliver markdown-ish text with recurring
//! structural defects: LaTeX bracket math delimiters that the markdown
//! pipeline cannot see, OCR letter-spacing garbage, multi-line equations
//! missing their alignment environment, and code fences glued to the end
//! of a prose line. This crate applies deterministic string repairs before
//! the text reaches the pipeline.
//!
//! ## Stage Order
//!
//! Stages run in a fixed order because later stages pattern-match on the
//! output of earlier ones: delimiter normalization runs first so the
//! alignment pass can anchor on `$$`, and fence normalization runs last so
//! it sees every fence the earlier rewrites may have exposed. Artifact
//! rules are literal substitutions and are order-insensitive among
//! themselves.
//!
//! Every stage is a pure `&str -> String` function that passes unmatched
//! input through unchanged, and every stage is idempotent: re-running
//! [`normalize`] on its own output produces no further change.

mod artifacts;

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub use artifacts::{ArtifactRule, BUILTIN_RULES, apply_rules};

/// Bracket-delimited display math: `\[ ... \]`.
static BRACKET_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").unwrap());

/// Parenthesis-delimited inline math: `\( ... \)`.
static PAREN_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\((.*?)\\\)").unwrap());

/// Dollar-delimited display math span.
static DOLLAR_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap());

/// A code fence marker glued to a preceding non-newline character.
static GLUED_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\n])```").unwrap());

/// Run all repair stages in their required order.
///
/// The output is plain text ready for the markdown pipeline. Empty input
/// yields empty output.
#[must_use]
pub fn normalize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let text = normalize_math_delimiters(input);
    let text = apply_rules(&text, BUILTIN_RULES);
    let text = wrap_alignment_blocks(&text);
    normalize_fence_breaks(&text)
}

/// Stage 1: convert LaTeX bracket/parenthesis math delimiters to dollars.
///
/// `\[ ... \]` becomes `$$...$$` and `\( ... \)` becomes `$...$`. Must run
/// before [`wrap_alignment_blocks`], which anchors on the dollar forms.
#[must_use]
pub fn normalize_math_delimiters(input: &str) -> String {
    let text = BRACKET_MATH_RE.replace_all(input, |caps: &Captures<'_>| {
        format!("$${}$$", &caps[1])
    });
    PAREN_MATH_RE
        .replace_all(&text, |caps: &Captures<'_>| format!("${}$", &caps[1]))
        .into_owned()
}

/// Stage 3: wrap alignment-marked display math in an `aligned` environment.
///
/// Math typesetters reject a bare `&` alignment tab outside an alignment
/// environment. For each `$$...$$` span: a span that already declares an
/// environment (`\begin`) is left byte-for-byte unchanged; a span
/// containing `&` is wrapped in `\begin{aligned}...\end{aligned}`, with
/// line breaks inside the delimiters so the span is still recognized as
/// display math. The inserted `\begin` keeps a second pass from wrapping
/// again.
#[must_use]
pub fn wrap_alignment_blocks(input: &str) -> String {
    DOLLAR_BLOCK_RE
        .replace_all(input, |caps: &Captures<'_>| {
            let equation = &caps[1];
            if equation.contains("\\begin") || !equation.contains('&') {
                caps[0].to_owned()
            } else {
                format!("$$\n\\begin{{aligned}}\n{equation}\n\\end{{aligned}}\n$$")
            }
        })
        .into_owned()
}

/// Stage 4: insert a line break before any fence glued to preceding text.
///
/// Fence detection in the parser requires the ``` marker to start a line.
#[must_use]
pub fn normalize_fence_breaks(input: &str) -> String {
    GLUED_FENCE_RE
        .replace_all(input, "${1}\n```")
        .into_owned()
}
