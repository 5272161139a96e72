//! Process-lifetime cache of the group directory.
//!
//! Both indexes are built together from one directory snapshot, so the cache
//! is either fully populated or empty; it is never partially filled.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{KeyshareError, Result};
use crate::group::{GroupId, GroupName, GroupRecord};
use crate::service::GroupDirectory;

/// Groups sharing one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntry {
    Single(GroupRecord),
    /// Two or more records, in directory response order.
    Multiple(Vec<GroupRecord>),
}

impl NameEntry {
    /// Add another record with the same name, promoting `Single` to `Multiple`.
    fn push(&mut self, record: GroupRecord) {
        match self {
            NameEntry::Single(first) => {
                let first = first.clone();
                *self = NameEntry::Multiple(vec![first, record]);
            }
            NameEntry::Multiple(records) => records.push(record),
        }
    }

    /// All records under this name, in directory order.
    pub fn records(&self) -> &[GroupRecord] {
        match self {
            NameEntry::Single(record) => std::slice::from_ref(record),
            NameEntry::Multiple(records) => records,
        }
    }
}

/// Name and ID indexes over one directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMaps {
    by_name: HashMap<GroupName, NameEntry>,
    by_id: HashMap<GroupId, GroupRecord>,
    /// IDs in directory order, for stable listings.
    order: Vec<GroupId>,
}

impl GroupMaps {
    /// Index a directory listing. Records without a name are only reachable by ID.
    pub fn from_records(records: Vec<GroupRecord>) -> Self {
        let mut maps = GroupMaps::default();
        for record in records {
            if let Some(name) = record.name.clone() {
                match maps.by_name.get_mut(&name) {
                    Some(entry) => entry.push(record.clone()),
                    None => {
                        maps.by_name.insert(name, NameEntry::Single(record.clone()));
                    }
                }
            }
            if !maps.by_id.contains_key(&record.id) {
                maps.order.push(record.id.clone());
            }
            maps.by_id.insert(record.id.clone(), record);
        }
        maps
    }

    pub fn by_name(&self, name: &GroupName) -> Option<&NameEntry> {
        self.by_name.get(name)
    }

    pub fn by_id(&self, id: &GroupId) -> Option<&GroupRecord> {
        self.by_id.get(id)
    }

    pub fn contains_name(&self, name: &GroupName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Group name for display, or the ID itself when unknown or unnamed.
    pub fn display_name(&self, id: &GroupId) -> String {
        self.by_id
            .get(id)
            .and_then(|record| record.name.as_ref())
            .map(|name| name.to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// All records in directory order.
    pub fn records(&self) -> impl Iterator<Item = &GroupRecord> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Lazily populated, explicitly cleared directory cache.
///
/// Population is not guarded against concurrent first use; callers resolve
/// references one at a time on a single task.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    maps: Option<GroupMaps>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.maps.is_some()
    }

    /// Cached maps, if the directory has already been fetched.
    pub fn maps(&self) -> Option<&GroupMaps> {
        self.maps.as_ref()
    }

    /// Fetch the directory once per process. A failed fetch leaves the cache
    /// unpopulated so a later call can retry.
    pub async fn populate<D>(&mut self, directory: &D) -> Result<&GroupMaps>
    where
        D: GroupDirectory + ?Sized,
    {
        let maps = match self.maps.take() {
            Some(maps) => {
                debug!(groups = maps.len(), "group directory cache hit");
                maps
            }
            None => {
                debug!("fetching group directory");
                let records = directory
                    .list_groups()
                    .await
                    .map_err(|e| KeyshareError::DirectoryUnavailable(e.to_string()))?;
                let maps = GroupMaps::from_records(records);
                debug!(groups = maps.len(), "group directory cached");
                maps
            }
        };
        Ok(self.maps.insert(maps))
    }

    /// Reset to "never populated".
    pub fn clear(&mut self) {
        self.maps = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, name: Option<&str>) -> GroupRecord {
        let now = Utc::now();
        GroupRecord {
            id: GroupId::new(id),
            name: name.map(GroupName::new),
            is_admin: false,
            is_member: true,
            created: now,
            updated: now,
        }
    }

    #[test]
    fn test_unnamed_records_only_indexed_by_id() {
        let maps = GroupMaps::from_records(vec![record("g1", None), record("g2", Some("ops"))]);
        assert_eq!(maps.len(), 2);
        assert!(maps.by_id(&GroupId::new("g1")).is_some());
        assert!(!maps.contains_name(&GroupName::new("g1")));
        assert!(maps.contains_name(&GroupName::new("ops")));
    }

    #[test]
    fn test_duplicate_names_promote_in_order() {
        let maps = GroupMaps::from_records(vec![
            record("a", Some("dup")),
            record("b", Some("solo")),
            record("c", Some("dup")),
            record("d", Some("dup")),
        ]);

        match maps.by_name(&GroupName::new("solo")) {
            Some(NameEntry::Single(r)) => assert_eq!(r.id.as_str(), "b"),
            other => panic!("expected single entry, got {:?}", other),
        }

        let ids: Vec<&str> = maps
            .by_name(&GroupName::new("dup"))
            .map(|entry| entry.records().iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert!(matches!(
            maps.by_name(&GroupName::new("dup")),
            Some(NameEntry::Multiple(_))
        ));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let maps = GroupMaps::from_records(vec![record("g1", Some("ops")), record("g2", None)]);
        assert_eq!(maps.display_name(&GroupId::new("g1")), "ops");
        assert_eq!(maps.display_name(&GroupId::new("g2")), "g2");
        assert_eq!(maps.display_name(&GroupId::new("missing")), "missing");
    }

    #[test]
    fn test_records_keep_directory_order() {
        let maps = GroupMaps::from_records(vec![
            record("z", Some("last")),
            record("a", Some("first")),
        ]);
        let ids: Vec<&str> = maps.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_clear_resets_state() {
        let mut cache = ResolutionCache::new();
        cache.maps = Some(GroupMaps::default());
        assert!(cache.is_populated());
        cache.clear();
        assert!(!cache.is_populated());
        assert!(cache.maps().is_none());
    }
}
