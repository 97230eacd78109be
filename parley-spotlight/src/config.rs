//! Configuration for the Spotlight dialog

use crate::error::{Result, SpotlightError};

/// Storage key under which recent searches are persisted
pub const RECENT_SEARCHES_KEY: &str = "mx_SpotlightDialog_recent_searches";

/// Limits and keys used by the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotlightConfig {
    /// Maximum number of remembered searches
    /// Default: 10
    pub max_recent_searches: usize,

    /// Maximum entries rendered per result section
    /// Default: 50
    pub section_limit: usize,

    /// Rooms requested per hierarchy page
    /// Default: 50
    pub hierarchy_page_size: usize,

    /// Storage key for recent searches
    pub recent_searches_key: String,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            max_recent_searches: 10,
            section_limit: 50,
            hierarchy_page_size: 50,
            recent_searches_key: RECENT_SEARCHES_KEY.to_string(),
        }
    }
}

impl SpotlightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small pages and sections, for constrained screens
    pub fn compact() -> Self {
        Self {
            section_limit: 10,
            hierarchy_page_size: 20,
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.hierarchy_page_size = page_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_recent_searches == 0 {
            return Err(SpotlightError::Configuration(
                "max_recent_searches must be greater than 0".to_string(),
            ));
        }
        if self.section_limit == 0 {
            return Err(SpotlightError::Configuration(
                "section_limit must be greater than 0".to_string(),
            ));
        }
        if self.hierarchy_page_size == 0 {
            return Err(SpotlightError::Configuration(
                "hierarchy_page_size must be greater than 0".to_string(),
            ));
        }
        if self.recent_searches_key.is_empty() {
            return Err(SpotlightError::Configuration(
                "recent_searches_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
