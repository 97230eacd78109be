//! Recently searched rooms
//!
//! The list is persisted as a JSON array of room ids, most recent last, and
//! holds at most `max_recent_searches` entries. Anything unexpected in
//! storage reads as an empty list.

use std::sync::Arc;

use serde_json::Value;

use parley_model::{Room, RoomDirectory, RoomId};

use crate::config::SpotlightConfig;
use crate::error::Result;
use crate::storage::KeyValueStorage;

/// Persisted list of rooms opened from search results
#[derive(Clone)]
pub struct RecentSearches {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    max_entries: usize,
}

impl RecentSearches {
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: &SpotlightConfig) -> Self {
        Self {
            storage,
            key: config.recent_searches_key.clone(),
            max_entries: config.max_recent_searches,
        }
    }

    /// Move `room_id` to the most recent position and persist
    ///
    /// Only the most recent entries are kept.
    pub fn record(&self, room_id: &RoomId) -> Result<()> {
        let mut ids = self.load_ids();
        ids.retain(|id| id != room_id);
        ids.push(room_id.clone());
        if ids.len() > self.max_entries {
            ids.drain(..ids.len() - self.max_entries);
        }

        let encoded = serde_json::to_string(&ids).map_err(crate::error::StorageError::from)?;
        self.storage.set_item(&self.key, &encoded)?;
        tracing::debug!("Recorded recent search {} ({} entries)", room_id, ids.len());
        Ok(())
    }

    /// Persisted ids, most recent last
    pub fn load_ids(&self) -> Vec<RoomId> {
        let Some(raw) = self.storage.get_item(&self.key) else {
            return Vec::new();
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries
                .into_iter()
                .filter_map(|entry| entry.as_str().map(RoomId::new))
                .collect(),
            Ok(other) => {
                tracing::debug!("Ignoring recent searches that are not an array: {}", other);
                Vec::new()
            }
            Err(e) => {
                tracing::debug!("Ignoring unreadable recent searches: {}", e);
                Vec::new()
            }
        }
    }

    /// Rooms the directory still knows, most recent first
    pub fn load(&self, directory: &dyn RoomDirectory) -> Vec<Room> {
        self.load_ids()
            .iter()
            .rev()
            .filter_map(|id| directory.room(id))
            .collect()
    }

    /// Forget all recent searches
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        Ok(())
    }
}

impl std::fmt::Debug for RecentSearches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentSearches")
            .field("key", &self.key)
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECENT_SEARCHES_KEY;
    use crate::storage::MemoryStorage;
    use parley_model::MemoryDirectory;
    use rstest::rstest;

    fn recents() -> (Arc<MemoryStorage>, RecentSearches) {
        let storage = Arc::new(MemoryStorage::new());
        let recents = RecentSearches::new(storage.clone(), &SpotlightConfig::default());
        (storage, recents)
    }

    fn ids(list: &[RoomId]) -> Vec<&str> {
        list.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_record_appends() {
        let (storage, recents) = recents();
        recents.record(&RoomId::new("!a:x")).unwrap();
        recents.record(&RoomId::new("!b:x")).unwrap();

        assert_eq!(ids(&recents.load_ids()), vec!["!a:x", "!b:x"]);
        assert_eq!(
            storage.get_item(RECENT_SEARCHES_KEY).as_deref(),
            Some("[\"!a:x\",\"!b:x\"]")
        );
    }

    #[test]
    fn test_record_existing_moves_to_end() {
        let (_, recents) = recents();
        for id in ["!a:x", "!b:x", "!c:x"] {
            recents.record(&RoomId::new(id)).unwrap();
        }
        recents.record(&RoomId::new("!a:x")).unwrap();

        assert_eq!(ids(&recents.load_ids()), vec!["!b:x", "!c:x", "!a:x"]);
    }

    #[test]
    fn test_keeps_most_recent_ten() {
        let (_, recents) = recents();
        for i in 0..12 {
            recents.record(&RoomId::new(format!("!r{}:x", i))).unwrap();
        }

        let stored = recents.load_ids();
        assert_eq!(stored.len(), 10);
        assert_eq!(stored.first().map(|id| id.as_str()), Some("!r2:x"));
        assert_eq!(stored.last().map(|id| id.as_str()), Some("!r11:x"));
    }

    #[rstest]
    #[case("not-json")]
    #[case("{\"a\": 1}")]
    #[case("\"!a:x\"")]
    #[case("null")]
    #[case("")]
    fn test_malformed_storage_reads_empty(#[case] raw: &str) {
        let (storage, recents) = recents();
        storage.set_item(RECENT_SEARCHES_KEY, raw).unwrap();

        assert!(recents.load_ids().is_empty());
        assert!(recents.load(&MemoryDirectory::new()).is_empty());
    }

    #[test]
    fn test_non_string_entries_ignored() {
        let (storage, recents) = recents();
        storage
            .set_item(RECENT_SEARCHES_KEY, "[\"!a:x\", 5, null, {\"id\": 1}, \"!b:x\"]")
            .unwrap();

        assert_eq!(ids(&recents.load_ids()), vec!["!a:x", "!b:x"]);
    }

    #[test]
    fn test_record_over_malformed_storage() {
        let (storage, recents) = recents();
        storage.set_item(RECENT_SEARCHES_KEY, "not-json").unwrap();

        recents.record(&RoomId::new("!a:x")).unwrap();
        assert_eq!(ids(&recents.load_ids()), vec!["!a:x"]);
    }

    #[test]
    fn test_load_resolves_most_recent_first() {
        let (_, recents) = recents();
        let directory = MemoryDirectory::with_rooms([Room::new("!a:x", "A"), Room::new("!c:x", "C")]);
        for id in ["!a:x", "!gone:x", "!c:x"] {
            recents.record(&RoomId::new(id)).unwrap();
        }

        let names: Vec<_> = recents.load(&directory).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn test_clear() {
        let (_, recents) = recents();
        recents.record(&RoomId::new("!a:x")).unwrap();
        recents.clear().unwrap();
        assert!(recents.load_ids().is_empty());
    }
}
