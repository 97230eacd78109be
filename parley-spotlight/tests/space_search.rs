//! Space search over a paged hierarchy

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use parley_model::{
    HierarchyError, HierarchyPage, HierarchyRoom, HierarchySource, MemoryDirectory, Membership, Room, RoomId,
};
use parley_spotlight::{SpaceResults, SpotlightConfig};

// ============================================================================
// Test Helpers
// ============================================================================

/// 120 child rooms, served one page per released permit
struct GatedSpace {
    rooms: Vec<HierarchyRoom>,
    gate: Semaphore,
    fail_next: Mutex<bool>,
    requests: Mutex<Vec<(Option<String>, usize)>>,
}

impl GatedSpace {
    fn new(count: usize) -> Self {
        let rooms = (0..count)
            .map(|i| HierarchyRoom::new(format!("!r{}:example.com", i)).with_name(format!("Room {}", i)))
            .collect();
        Self {
            rooms,
            gate: Semaphore::new(0),
            fail_next: Mutex::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn release_page(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl HierarchySource for GatedSpace {
    async fn fetch_page(&self, _root: &RoomId, from: Option<&str>, limit: usize) -> Result<HierarchyPage, HierarchyError> {
        self.requests.lock().push((from.map(str::to_string), limit));
        self.gate
            .acquire()
            .await
            .map_err(|e| HierarchyError::Network(e.to_string()))?
            .forget();

        if std::mem::take(&mut *self.fail_next.lock()) {
            return Err(HierarchyError::Rejected {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }

        let start: usize = from.and_then(|f| f.parse().ok()).unwrap_or(0);
        let end = (start + limit).min(self.rooms.len());
        Ok(HierarchyPage {
            rooms: self.rooms[start..end].to_vec(),
            next_batch: (end < self.rooms.len()).then(|| end.to_string()),
        })
    }
}

/// Every third room is already joined
fn directory() -> Arc<MemoryDirectory> {
    let directory = MemoryDirectory::new();
    for i in (0..120).step_by(3) {
        directory.upsert(Room::new(format!("!r{}:example.com", i), format!("Room {}", i)));
    }
    directory.upsert(Room::new("!r1:example.com", "Room 1").with_membership(Membership::Invite));
    Arc::new(directory)
}

fn is_joined(id: &str) -> bool {
    let n: usize = id
        .trim_start_matches("!r")
        .trim_end_matches(":example.com")
        .parse()
        .unwrap();
    n % 3 == 0
}

// ============================================================================
// 120 rooms, page size 50
// ============================================================================

#[tokio::test]
async fn test_pages_through_space_with_active_query() {
    let source = Arc::new(GatedSpace::new(120));
    let space = SpaceResults::new(source.clone(), directory(), &SpotlightConfig::default()).unwrap();
    let mut rx = space.watch();

    space.set_query("room 1");
    space.set_space(Some(RoomId::new("!space:example.com")));
    assert!(space.is_loading());

    source.release_page();
    rx.wait_for(|s| s.rooms.len() == 50).await.unwrap();
    assert!(space.is_loading());

    source.release_page();
    rx.wait_for(|s| s.rooms.len() == 100).await.unwrap();
    assert!(space.is_loading());

    source.release_page();
    rx.wait_for(|s| !s.loading).await.unwrap();
    assert_eq!(space.snapshot().rooms.len(), 120);
    assert!(space.error().is_none());

    let results = space.results();
    assert!(!results.is_empty());
    for room in &results {
        assert!(!is_joined(room.room_id.as_str()), "{} is joined", room.room_id);
        let name = room.name.as_deref().unwrap_or_default();
        assert!(name.starts_with("Room 1"), "{} does not match", name);
    }

    // Room 1, Room 10-19 and Room 100-119, minus the joined ones
    let expected: Vec<String> = std::iter::once(1)
        .chain(10..20)
        .chain(100..120)
        .map(|i| format!("!r{}:example.com", i))
        .filter(|id| !is_joined(id))
        .collect();
    let actual: Vec<String> = results.iter().map(|r| r.room_id.to_string()).collect();
    assert_eq!(actual, expected);

    let requests = source.requests.lock().clone();
    assert_eq!(
        requests,
        vec![(None, 50), (Some("50".to_string()), 50), (Some("100".to_string()), 50)]
    );
}

#[tokio::test]
async fn test_failed_page_halts_until_retry() {
    let source = Arc::new(GatedSpace::new(120));
    let space = SpaceResults::new(source.clone(), directory(), &SpotlightConfig::default()).unwrap();
    let mut rx = space.watch();

    space.set_query("room");
    space.set_space(Some(RoomId::new("!space:example.com")));

    source.release_page();
    rx.wait_for(|s| s.rooms.len() == 50).await.unwrap();

    *source.fail_next.lock() = true;
    source.release_page();
    rx.wait_for(|s| s.error.is_some()).await.unwrap();
    assert!(!space.is_loading());
    assert_eq!(space.snapshot().rooms.len(), 50);
    assert!(space.error().map(|e| e.is_retryable()).unwrap_or(false));

    // A new query does not restart the halted walk
    space.set_query("room 2");
    assert!(!space.is_loading());

    assert!(space.retry());
    assert!(space.is_loading());
    assert!(space.error().is_none());

    source.release_page();
    source.release_page();
    rx.wait_for(|s| !s.loading && s.rooms.len() == 120).await.unwrap();

    let froms: Vec<Option<String>> = source.requests.lock().iter().map(|(from, _)| from.clone()).collect();
    assert_eq!(
        froms,
        vec![
            None,
            Some("50".to_string()),
            Some("50".to_string()),
            Some("100".to_string())
        ]
    );
}

#[tokio::test]
async fn test_switching_space_discards_rooms() {
    let source = Arc::new(GatedSpace::new(120));
    let space = SpaceResults::new(source.clone(), directory(), &SpotlightConfig::default()).unwrap();
    let mut rx = space.watch();

    space.set_query("room");
    space.set_space(Some(RoomId::new("!one:example.com")));
    source.release_page();
    rx.wait_for(|s| s.rooms.len() == 50).await.unwrap();

    space.set_space(Some(RoomId::new("!two:example.com")));
    let snapshot = space.snapshot();
    assert_eq!(snapshot.space, Some(RoomId::new("!two:example.com")));
    assert!(snapshot.rooms.is_empty());
    assert!(snapshot.loading);
    assert!(space.results().is_empty());

    space.set_space(None);
    assert!(!space.is_loading());
}
