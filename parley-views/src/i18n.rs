//! Localisation
//!
//! Widgets never hard-code display text: every string goes through a
//! `Translator` keyed by the English source text. Substitutions use the
//! `%(name)s` placeholder syntax of the translation catalogues.

use std::collections::HashMap;

/// Maps a message key plus substitutions to display text
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String;

    /// Translate without substitutions
    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// In-memory catalogue; unknown keys fall back to the key itself
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Catalogue that renders the English source text
    pub fn english() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Load a flat JSON object of key → translation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let template = match self.entries.get(key) {
            Some(template) => template.as_str(),
            None => key,
        };
        substitute(template, vars)
    }
}

/// Replace `%(name)s` placeholders; unknown placeholders are left as-is
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("%(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find(")s") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match vars.iter().find(|(var, _)| *var == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}
