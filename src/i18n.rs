//! Translation lookup for zone labels.
//!
//! A [`Catalog`] holds nested JSON bundles addressed with dotted keys
//! (`panels.controls` → `{"panels": {"controls": "..."}}`). Lookup falls back
//! from the active bundle to the fallback bundle, then to the caller's
//! fallback text, then to the key itself.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::ConfigError;

/// Resolves display text for a key.
pub trait Translator {
    /// Translate `key`, returning `fallback` (or the key) when missing.
    fn t(&self, key: &str, fallback: Option<&str>) -> String;
}

/// Returns keys untranslated (or their fallback).
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Translator for Identity {
    fn t(&self, key: &str, fallback: Option<&str>) -> String {
        fallback.unwrap_or(key).to_owned()
    }
}

/// Nested translation bundles with a fallback language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    primary: Value,
    fallback: Value,
}

impl Catalog {
    /// An empty catalog; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already parsed bundle.
    pub fn from_value(primary: Value) -> Self {
        Self {
            primary,
            fallback: Value::Null,
        }
    }

    /// Parse a bundle from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    /// Read a bundle from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Use `other`'s primary bundle as the fallback language (builder).
    pub fn with_fallback(mut self, other: Catalog) -> Self {
        self.fallback = other.primary;
        self
    }

    /// Raw lookup in the primary then fallback bundle.
    pub fn get(&self, key: &str) -> Option<&str> {
        lookup(&self.primary, key)
            .filter(|s| !s.is_empty())
            .or_else(|| lookup(&self.fallback, key))
    }
}

impl Translator for Catalog {
    fn t(&self, key: &str, fallback: Option<&str>) -> String {
        self.get(key).or(fallback).unwrap_or(key).to_owned()
    }
}

/// Walk `bundle` along the dot-separated `key`. Only string leaves match.
fn lookup<'a>(bundle: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(bundle, |node, part| node.as_object()?.get(part))?
        .as_str()
}
