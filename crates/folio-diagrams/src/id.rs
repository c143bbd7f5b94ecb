//! Render identity tokens.

use std::fmt;

use uuid::Uuid;

/// Unique identifier for a single diagram render.
///
/// A fresh id is generated for every render, including re-renders of
/// identical source, so the external engine never serves a stale cached
/// result and a superseded completion can be recognized and discarded.
/// Ids are never reused for the lifetime of the view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderId(String);

impl RenderId {
    /// Generate a fresh, unique render id.
    #[must_use]
    pub fn fresh() -> Self {
        Self(format!("diagram-{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_distinct() {
        // Identical source still gets distinct ids per render
        let a = RenderId::fresh();
        let b = RenderId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_format() {
        let id = RenderId::fresh();
        assert!(id.as_str().starts_with("diagram-"));
        assert_eq!(id.to_string(), id.as_str());
    }
}
