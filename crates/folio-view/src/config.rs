//! Configuration for the document view.

use serde::Deserialize;

/// Application configuration.
///
/// All fields have defaults, so a partial configuration file (or none at
/// all) is valid.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Base address of the extraction service. Relative image locators
    /// from the extraction result are resolved against this address.
    pub service_base_url: String,
    /// Address of the external diagram rendering engine.
    pub engine_url: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:8000".to_owned(),
            engine_url: "https://kroki.io".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.service_base_url, "http://localhost:8000");
        assert_eq!(config.engine_url, "https://kroki.io");
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: ViewConfig =
            serde_json::from_str(r#"{"engine_url": "http://kroki.internal"}"#).unwrap();
        assert_eq!(config.engine_url, "http://kroki.internal");
        assert_eq!(config.service_base_url, "http://localhost:8000");
    }
}
