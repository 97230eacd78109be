//! Property-based tests for the recent-search list

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use parley_model::RoomId;
use parley_spotlight::{KeyValueStorage, MemoryStorage, RecentSearches, SpotlightConfig, RECENT_SEARCHES_KEY};

// ============================================================================
// Test Helpers
// ============================================================================

fn recents() -> (Arc<MemoryStorage>, RecentSearches) {
    let storage = Arc::new(MemoryStorage::new());
    let recents = RecentSearches::new(storage.clone(), &SpotlightConfig::default());
    (storage, recents)
}

/// Room ids drawn from a small pool so that repeats are common
fn room_id_strategy() -> impl Strategy<Value = String> {
    (0u8..25).prop_map(|n| format!("!room{}:example.com", n))
}

// ============================================================================
// Bounded, duplicate-free list
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The list never exceeds ten entries and never holds duplicates
    #[test]
    fn prop_list_bounded_and_unique(ids in prop::collection::vec(room_id_strategy(), 0..60)) {
        let (_, recents) = recents();
        for id in &ids {
            recents.record(&RoomId::new(id.as_str())).unwrap();

            let stored = recents.load_ids();
            prop_assert!(stored.len() <= 10);
            let unique: HashSet<_> = stored.iter().collect();
            prop_assert_eq!(unique.len(), stored.len());
        }
    }

    /// The last recorded room is always the most recent entry
    #[test]
    fn prop_recorded_room_is_most_recent(
        ids in prop::collection::vec(room_id_strategy(), 1..40),
        again in room_id_strategy(),
    ) {
        let (_, recents) = recents();
        for id in &ids {
            recents.record(&RoomId::new(id.as_str())).unwrap();
        }
        let before = recents.load_ids();

        recents.record(&RoomId::new(again.as_str())).unwrap();
        let after = recents.load_ids();

        prop_assert_eq!(after.last().map(|id| id.as_str()), Some(again.as_str()));
        prop_assert_eq!(after.iter().filter(|id| id.as_str() == again).count(), 1);

        // Re-recording a room already present keeps the length
        if before.iter().any(|id| id.as_str() == again) {
            prop_assert_eq!(after.len(), before.len());
        }
    }

    /// Arbitrary stored text never makes loading fail
    #[test]
    fn prop_arbitrary_storage_loads(raw in ".*") {
        let (storage, recents) = recents();
        storage.set_item(RECENT_SEARCHES_KEY, &raw).unwrap();

        let loaded = recents.load_ids();
        prop_assert!(loaded.len() <= raw.len());
    }
}

#[test]
fn test_literal_not_json_reads_empty() {
    let (storage, recents) = recents();
    storage.set_item(RECENT_SEARCHES_KEY, "\"not-json\"").unwrap();
    assert!(recents.load_ids().is_empty());

    storage.set_item(RECENT_SEARCHES_KEY, "not-json").unwrap();
    assert!(recents.load_ids().is_empty());
}
