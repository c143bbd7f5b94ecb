//! Placeholder replacement for rendered diagrams.
//!
//! The markdown renderer emits `{{DIAGRAM_n}}` placeholders for diagram
//! blocks. This module collects per-index replacement fragments and
//! applies them to the document HTML in a single pass.

use std::collections::HashMap;

/// Collects diagram replacements for single-pass application.
///
/// Instead of calling `html.replace()` for each diagram, replacements are
/// collected and applied in one scan over the document.
#[derive(Debug, Default)]
pub struct Replacements {
    map: HashMap<usize, String>,
}

impl Replacements {
    /// Create an empty replacement set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Create a replacement set with a known capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Add a replacement fragment for the diagram at `index`.
    pub fn add(&mut self, index: usize, content: String) {
        self.map.insert(index, content);
    }

    /// Apply all replacements in a single pass.
    ///
    /// Scans the HTML once, replacing every `{{DIAGRAM_N}}` placeholder
    /// with its fragment. Placeholders with no registered fragment are
    /// kept as-is.
    pub fn apply(self, html: &mut String) {
        if self.map.is_empty() {
            return;
        }

        let mut result = String::with_capacity(html.len());
        let mut remaining = html.as_str();

        while let Some(start) = remaining.find("{{DIAGRAM_") {
            result.push_str(&remaining[..start]);

            let after_prefix = &remaining[start + 10..]; // Skip "{{DIAGRAM_"
            if let Some(end_pos) = after_prefix.find("}}") {
                let index_str = &after_prefix[..end_pos];
                if let Ok(index) = index_str.parse::<usize>() {
                    if let Some(replacement) = self.map.get(&index) {
                        result.push_str(replacement);
                    } else {
                        result.push_str(&remaining[start..start + 10 + end_pos + 2]);
                    }
                } else {
                    result.push_str(&remaining[start..start + 10 + end_pos + 2]);
                }
                remaining = &after_prefix[end_pos + 2..];
            } else {
                result.push_str(&remaining[start..]);
                remaining = "";
            }
        }

        result.push_str(remaining);
        *html = result;
    }
}
