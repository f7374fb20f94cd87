//! Source identifiers and the identifier → URL registry

use crate::error::{ConfigError, ValidationError};
use std::collections::HashSet;

/// The four number generators exposed upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Prime,
    Fibonacci,
    Even,
    Random,
}

impl SourceKind {
    pub fn all() -> [SourceKind; 4] {
        [
            SourceKind::Prime,
            SourceKind::Fibonacci,
            SourceKind::Even,
            SourceKind::Random,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Prime => "prime",
            SourceKind::Fibonacci => "fibonacci",
            SourceKind::Even => "even",
            SourceKind::Random => "random",
        }
    }

    /// Identifier clients use when no label override is configured
    pub fn default_label(&self) -> &'static str {
        match self {
            SourceKind::Prime => "p",
            SourceKind::Fibonacci => "f",
            SourceKind::Even => "e",
            SourceKind::Random => "r",
        }
    }

    /// Path appended to the base URL when no URL override is configured
    pub fn default_path(&self) -> &'static str {
        match self {
            SourceKind::Prime => "primes",
            SourceKind::Fibonacci => "fibo",
            SourceKind::Even => "even",
            SourceKind::Random => "rand",
        }
    }

    /// Suffix of the per-source environment variables (`NUMBERS_URL_PRIME`, ...)
    pub fn env_suffix(&self) -> &'static str {
        match self {
            SourceKind::Prime => "PRIME",
            SourceKind::Fibonacci => "FIBONACCI",
            SourceKind::Even => "EVEN",
            SourceKind::Random => "RANDOM",
        }
    }
}

/// One registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSource {
    pub kind: SourceKind,
    pub label: String,
    pub url: String,
}

/// Static identifier → endpoint mapping, read-only after startup
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<UpstreamSource>,
}

impl SourceRegistry {
    /// Build a registry, rejecting empty or duplicate labels and empty URLs.
    ///
    /// Every [`SourceKind`] must appear exactly once.
    pub fn new(sources: Vec<UpstreamSource>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut kinds = HashSet::new();

        for source in &sources {
            if source.label.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: "source label",
                    value: source.label.clone(),
                    reason: format!("label for {} source is empty", source.kind.as_str()),
                });
            }
            if source.url.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: "source url",
                    value: source.url.clone(),
                    reason: format!("url for {} source is empty", source.kind.as_str()),
                });
            }
            if !seen.insert(source.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(source.label.clone()));
            }
            if !kinds.insert(source.kind) {
                return Err(ConfigError::DuplicateSource(source.kind.as_str()));
            }
        }

        if let Some(missing) = SourceKind::all().into_iter().find(|kind| !kinds.contains(kind)) {
            return Err(ConfigError::MissingSource(missing.as_str()));
        }

        Ok(Self { sources })
    }

    /// Default labels, each source at `<base_url>/<default_path>`
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base = base_url.trim_end_matches('/');
        let sources = SourceKind::all()
            .into_iter()
            .map(|kind| UpstreamSource {
                kind,
                label: kind.default_label().to_string(),
                url: format!("{}/{}", base, kind.default_path()),
            })
            .collect();

        Self::new(sources)
    }

    /// Look up an identifier.
    ///
    /// Unknown identifiers produce the error returned to the caller.
    pub fn resolve(&self, label: &str) -> Result<&UpstreamSource, ValidationError> {
        self.sources
            .iter()
            .find(|source| source.label == label)
            .ok_or_else(|| ValidationError::InvalidSourceId {
                given: label.to_string(),
                expected: self.expected_labels(),
            })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn sources(&self) -> &[UpstreamSource] {
        &self.sources
    }

    fn expected_labels(&self) -> String {
        self.sources
            .iter()
            .map(|s| format!("{:?}", s.label))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = SourceRegistry::with_base_url("http://numbers.local/api/").unwrap();

        assert_eq!(registry.labels(), vec!["p", "f", "e", "r"]);
        let even = registry.resolve("e").unwrap();
        assert_eq!(even.kind, SourceKind::Even);
        assert_eq!(even.url, "http://numbers.local/api/even");
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let registry = SourceRegistry::with_base_url("http://numbers.local").unwrap();

        let err = registry.resolve("z").unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidSourceId {
                given: "z".to_string(),
                expected: "\"p\", \"f\", \"e\", \"r\"".to_string(),
            }
        );
        // Labels are case sensitive
        assert!(registry.resolve("P").is_err());
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let sources = vec![
            UpstreamSource {
                kind: SourceKind::Prime,
                label: "x".to_string(),
                url: "http://a".to_string(),
            },
            UpstreamSource {
                kind: SourceKind::Even,
                label: "x".to_string(),
                url: "http://b".to_string(),
            },
        ];

        assert!(matches!(
            SourceRegistry::new(sources),
            Err(ConfigError::DuplicateLabel(label)) if label == "x"
        ));
    }

    fn source(kind: SourceKind, label: &str) -> UpstreamSource {
        UpstreamSource {
            kind,
            label: label.to_string(),
            url: format!("http://numbers.local/{}", kind.default_path()),
        }
    }

    #[test]
    fn test_missing_kind_rejected() {
        let sources = vec![
            source(SourceKind::Prime, "p"),
            source(SourceKind::Fibonacci, "f"),
            source(SourceKind::Random, "r"),
        ];

        assert!(matches!(
            SourceRegistry::new(sources),
            Err(ConfigError::MissingSource("even"))
        ));
        assert!(matches!(
            SourceRegistry::new(Vec::new()),
            Err(ConfigError::MissingSource("prime"))
        ));
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let sources = vec![
            source(SourceKind::Prime, "p"),
            source(SourceKind::Fibonacci, "f"),
            source(SourceKind::Even, "e"),
            source(SourceKind::Even, "e2"),
            source(SourceKind::Random, "r"),
        ];

        assert!(matches!(
            SourceRegistry::new(sources),
            Err(ConfigError::DuplicateSource("even"))
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let sources = vec![UpstreamSource {
            kind: SourceKind::Random,
            label: String::new(),
            url: "http://a".to_string(),
        }];

        assert!(matches!(
            SourceRegistry::new(sources),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
