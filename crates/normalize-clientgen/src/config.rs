//! Per-run generation settings.
//!
//! Example `clientgen.toml`:
//! ```toml
//! language = "java"
//! uses_backing_store = true
//! client_class_name = "GraphClient"
//! client_namespace_name = "com.example.graph"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Error loading a [`GenerationConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown language `{0}` (expected csharp, java or typescript)")]
    UnknownLanguage(String),
}

/// Target language of a generation run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    CSharp,
    Java,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::CSharp, Language::Java, Language::TypeScript];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(Self::CSharp),
            "java" => Ok(Self::Java),
            "typescript" | "ts" => Ok(Self::TypeScript),
            _ => Err(ConfigError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Settings threaded through one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct GenerationConfig {
    /// Output language.
    pub language: Language,
    /// Client constructors switch the HTTP core into backing-store mode.
    pub uses_backing_store: bool,
    /// Name of the root client class.
    pub client_class_name: String,
    /// Namespace (or package) the client lives in.
    pub client_namespace_name: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            uses_backing_store: false,
            client_class_name: "ApiClient".to_string(),
            client_namespace_name: "ApiSdk".to_string(),
        }
    }
}

impl GenerationConfig {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn with_backing_store(mut self, enabled: bool) -> Self {
        self.uses_backing_store = enabled;
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml() {
        let config = GenerationConfig::from_toml_str(
            r#"
            language = "typescript"
            uses_backing_store = true
            "#,
        )
        .unwrap();
        assert_eq!(config.language, Language::TypeScript);
        assert!(config.uses_backing_store);
        assert_eq!(config.client_class_name, "ApiClient");
    }

    #[test]
    fn rejects_unknown_language_in_toml() {
        let err = GenerationConfig::from_toml_str("language = \"cobol\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn language_from_str() {
        assert_eq!("C#".parse::<Language>().unwrap(), Language::CSharp);
        assert_eq!("ts".parse::<Language>().unwrap(), Language::TypeScript);
        assert!("go".parse::<Language>().is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientgen.toml");
        std::fs::write(&path, "language = \"java\"\nclient_class_name = \"Graph\"\n").unwrap();
        let config = GenerationConfig::load(&path).unwrap();
        assert_eq!(config.language, Language::Java);
        assert_eq!(config.client_class_name, "Graph");

        let missing = GenerationConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
