//! Search over the rooms the client already knows

use parley_model::{Room, RoomDirectory};

use crate::normalize::normalize;

/// A search query prepared for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Trimmed, lower-cased; matched against canonical aliases
    pub lowercase: String,
    /// Normalised; matched against names
    pub normalized: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            lowercase: trimmed.to_lowercase(),
            normalized: normalize(trimmed),
        }
    }

    /// Whether a room with this name and alias matches
    pub fn matches(&self, name: Option<&str>, canonical_alias: Option<&str>) -> bool {
        normalize(name.unwrap_or_default()).contains(&self.normalized)
            || canonical_alias
                .map(|alias| alias.contains(&self.lowercase))
                .unwrap_or(false)
    }
}

/// Local results split into direct messages and other rooms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomSearchResults {
    pub people: Vec<Room>,
    pub rooms: Vec<Room>,
    /// Matches before sections were capped
    pub total: usize,
}

impl RoomSearchResults {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Search the directory for `query`
///
/// Returns `None` for an empty query; the dialog then shows recent
/// searches instead. Each section holds at most `section_limit` rooms.
pub fn search_rooms(directory: &dyn RoomDirectory, query: &str, section_limit: usize) -> Option<RoomSearchResults> {
    if query.is_empty() {
        return None;
    }

    let query = Query::new(query);
    let mut results = RoomSearchResults::default();
    for room in directory.rooms() {
        if !query.matches(Some(&room.name), room.canonical_alias.as_deref()) {
            continue;
        }
        results.total += 1;

        let section = if directory.dm_user_for_room(&room.room_id).is_some() {
            &mut results.people
        } else {
            &mut results.rooms
        };
        if section.len() < section_limit {
            section.push(room);
        }
    }

    tracing::trace!(
        "Room search: {} matches ({} people, {} rooms shown)",
        results.total,
        results.people.len(),
        results.rooms.len()
    );
    Some(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_model::MemoryDirectory;
    use rstest::rstest;

    #[rstest]
    #[case("elysee", Some("Élysée Lounge"), None, true)]
    #[case("room 1", Some("Room 104"), None, true)]
    #[case("  ", Some("anything"), None, true)]
    #[case("room", Some("Random"), None, false)]
    #[case("DEVOPS", Some("Ops"), Some("#devops:x"), true)]
    #[case("dév", None, Some("#dev:x"), false)]
    fn test_query_matches(
        #[case] raw: &str,
        #[case] name: Option<&str>,
        #[case] alias: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(Query::new(raw).matches(name, alias), expected);
    }

    fn names(rooms: &[Room]) -> Vec<&str> {
        rooms.iter().map(|r| r.name.as_str()).collect()
    }

    fn directory() -> MemoryDirectory {
        let directory = MemoryDirectory::with_rooms([
            Room::new("!dev:x", "Développement").with_alias("#dev:x"),
            Room::new("!random:x", "Random"),
            Room::new("!alice:x", "Alice"),
            Room::new("!devops:x", "Ops").with_alias("#devops:x"),
        ]);
        directory.set_dm("!alice:x", "@alice:x");
        directory
    }

    #[test]
    fn test_empty_query_has_no_results() {
        assert_eq!(search_rooms(&directory(), "", 50), None);
    }

    #[test]
    fn test_matches_normalised_name_and_alias() {
        let results = search_rooms(&directory(), " DEV ", 50).unwrap();
        assert_eq!(names(&results.rooms), vec!["Développement", "Ops"]);
        assert!(results.people.is_empty());
    }

    #[test]
    fn test_people_split_from_rooms() {
        let results = search_rooms(&directory(), "a", 50).unwrap();
        assert_eq!(names(&results.people), vec!["Alice"]);
        assert_eq!(names(&results.rooms), vec!["Random"]);
        assert_eq!(results.total, 2);
    }

    #[test]
    fn test_sections_capped() {
        let directory = MemoryDirectory::with_rooms((0..80).map(|i| Room::new(format!("!r{}:x", i), format!("Room {}", i))));
        let results = search_rooms(&directory, "room", 50).unwrap();

        assert_eq!(results.rooms.len(), 50);
        assert_eq!(results.total, 80);
    }

    #[test]
    fn test_no_match() {
        let results = search_rooms(&directory(), "zzz", 50).unwrap();
        assert!(results.is_empty());
    }
}
