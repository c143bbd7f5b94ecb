//! Registry of known extractor artifacts.
//!
//! OCR-based extractors occasionally emit letter-spaced garbage for tokens
//! they fail to segment, e.g. `M u t i { H e a d }` where the source PDF
//! contained `MultiHead` inside a formula. Each rule is a literal
//! find/replace pair; rules never overlap, so their application order does
//! not matter.

/// A single literal substitution repairing a known extractor defect.
#[derive(Clone, Copy, Debug)]
pub struct ArtifactRule {
    /// Exact text emitted by the extractor.
    pub pattern: &'static str,
    /// Corrected replacement text.
    pub replacement: &'static str,
}

/// Built-in corrections for defects observed in real extractor output.
///
/// The replacement is wrapped in `\text{...}` so the token renders as
/// literal text when it appears inside a math span instead of being parsed
/// as a math command.
pub const BUILTIN_RULES: &[ArtifactRule] = &[ArtifactRule {
    pattern: "M u t i { H e a d }",
    replacement: "\\text{MultiHead}",
}];

/// Apply a set of artifact rules to `input`.
///
/// Rules that do not occur in the input leave it untouched. Callers with
/// document-specific defects can pass their own rule slice.
#[must_use]
pub fn apply_rules(input: &str, rules: &[ArtifactRule]) -> String {
    let mut output = input.to_owned();
    for rule in rules {
        if output.contains(rule.pattern) {
            output = output.replace(rule.pattern, rule.replacement);
        }
    }
    output
}
