//! In-memory ordered record collection plus its query state. The
//! store is the single source of truth: the projection only reads it,
//! and only the edit controllers and bulk loads mutate it.

use tracing::debug;

use crate::data::query::{QueryPatch, QueryState, SortKey, SortOrder};
use crate::data::record::{RecordPatch, UserRecord};
use crate::data::table_view::{self, TablePage};
use crate::error::StoreError;

pub struct RecordStore {
    records: Vec<UserRecord>,
    query: QueryState,
    /// Sort requests for keys outside this whitelist are ignored
    sortable: Vec<SortKey>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            query: QueryState::default(),
            sortable: vec![SortKey::Id, SortKey::Name, SortKey::Email],
        }
    }

    pub fn with_sortable(mut self, sortable: Vec<SortKey>) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.query.set_page_size(page_size);
        self
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn get(&self, id: i64) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a freshly loaded record set. Query state is kept so a
    /// refresh does not lose the user's search or sort.
    pub fn replace_all(&mut self, records: Vec<UserRecord>) {
        debug!(count = records.len(), "replacing all records");
        self.records = records;
    }

    /// Insert a new record, assigning the next identifier
    /// (max existing + 1, or 1 for an empty store)
    pub fn add(&mut self, patch: RecordPatch) -> i64 {
        let next_id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.records.push(patch.into_record(next_id));
        debug!(id = next_id, "added record");
        next_id
    }

    pub fn update(&mut self, id: i64, patch: RecordPatch) -> Result<(), StoreError> {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                patch.apply_to(record);
                debug!(id, "updated record");
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    pub fn remove(&mut self, id: i64) -> Result<UserRecord, StoreError> {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                let removed = self.records.remove(index);
                debug!(id, "removed record");
                Ok(removed)
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Merge a partial query-state update. Sort changes still go
    /// through the whitelist check.
    pub fn set_query(&mut self, mut patch: QueryPatch) {
        if let Some((key, _)) = patch.sort {
            if !self.sortable.contains(&key) {
                debug!(?key, "sort key not in whitelist, ignoring");
                patch.sort = None;
            }
        }
        self.query.apply(patch);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.set_page_size(page_size);
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        if !self.sortable.contains(&key) {
            debug!(?key, "sort key not in whitelist, ignoring");
            return;
        }
        self.query.set_sort(key, order);
    }

    /// Header-click sorting: toggles direction on the active key
    pub fn sort_by(&mut self, key: SortKey) {
        if !self.sortable.contains(&key) {
            debug!(?key, "sort key not in whitelist, ignoring");
            return;
        }
        self.query.toggle_sort(key);
    }

    /// Project the currently visible page
    pub fn page(&self) -> TablePage {
        table_view::project(&self.records, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Role;

    fn patch(name: &str, email: &str, role: Role) -> RecordPatch {
        RecordPatch {
            name: name.to_string(),
            email: email.to_string(),
            role,
            birth_date: None,
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = RecordStore::new();
        assert_eq!(store.add(patch("Alice", "a@x.com", Role::Admin)), 1);
        assert_eq!(store.add(patch("Bob", "b@x.com", Role::User)), 2);

        // Ids follow the maximum, not the count
        store.remove(1).unwrap();
        assert_eq!(store.add(patch("Carol", "c@x.com", Role::Guest)), 3);
    }

    #[test]
    fn test_update_missing_id_is_reported_noop() {
        let mut store = RecordStore::new();
        store.add(patch("Alice", "a@x.com", Role::Admin));

        let before = store.records().to_vec();
        let result = store.update(99, patch("Nobody", "n@x.com", Role::User));
        assert_eq!(result, Err(StoreError::NotFound(99)));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_remove_returns_the_record() {
        let mut store = RecordStore::new();
        let id = store.add(patch("Alice", "a@x.com", Role::Admin));

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.name, "Alice");
        assert!(store.is_empty());
        assert_eq!(store.remove(id), Err(StoreError::NotFound(id)));
    }

    #[test]
    fn test_set_query_drops_non_whitelisted_sort_but_keeps_the_rest() {
        let mut store = RecordStore::new().with_sortable(vec![SortKey::Name]);

        store.set_query(QueryPatch {
            search: Some("alice".to_string()),
            sort: Some((SortKey::Role, SortOrder::Descending)),
            ..QueryPatch::default()
        });

        assert_eq!(store.query().search, "alice");
        assert_eq!(store.query().sort_key, Some(SortKey::Id));
    }

    #[test]
    fn test_non_whitelisted_sort_is_ignored() {
        let mut store = RecordStore::new().with_sortable(vec![SortKey::Name]);
        let original = store.query().clone();

        store.sort_by(SortKey::Role);
        assert_eq!(store.query(), &original);

        store.sort_by(SortKey::Name);
        assert_eq!(store.query().sort_key, Some(SortKey::Name));
    }
}
