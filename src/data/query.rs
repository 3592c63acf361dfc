use serde::{Deserialize, Serialize};

/// Columns the table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Name,
    Email,
    Role,
    BirthDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// The current search/sort/pagination parameters controlling what
/// subset of records is visible
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search: String,
    pub sort_key: Option<SortKey>,
    pub sort_order: SortOrder,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_key: Some(SortKey::Id),
            sort_order: SortOrder::Ascending,
            page: 0,
            page_size: 5,
        }
    }
}

/// Partial query-state update; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPatch {
    pub search: Option<String>,
    pub sort: Option<(SortKey, SortOrder)>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl QueryState {
    /// Merge a partial update, applying the page-reset invariants of
    /// the individual setters. An explicit page in the same patch wins
    /// over the reset.
    pub fn apply(&mut self, patch: QueryPatch) {
        if let Some(term) = patch.search {
            self.set_search(term);
        }
        if let Some((key, order)) = patch.sort {
            self.set_sort(key, order);
        }
        if let Some(page_size) = patch.page_size {
            self.set_page_size(page_size);
        }
        if let Some(page) = patch.page {
            self.set_page(page);
        }
    }

    /// Changing the search term always resets to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size resets to the first page; a zero page
    /// size is ignored
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.page = 0;
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort_key = Some(key);
        self.sort_order = order;
    }

    /// Header-click behavior: a repeated key flips the direction,
    /// a new key starts ascending
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == Some(key) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_key = Some(key);
            self.sort_order = SortOrder::Ascending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_and_page_size_reset_page() {
        let mut query = QueryState::default();
        query.set_page(3);

        query.set_search("alice");
        assert_eq!(query.page, 0);

        query.set_page(2);
        query.set_page_size(10);
        assert_eq!(query.page, 0);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_zero_page_size_ignored() {
        let mut query = QueryState::default();
        query.set_page_size(0);
        assert_eq!(query.page_size, 5);
    }

    #[test]
    fn test_apply_patch_merges_and_resets_page() {
        let mut query = QueryState::default();
        query.set_page(4);

        query.apply(QueryPatch {
            search: Some("bob".to_string()),
            ..QueryPatch::default()
        });
        assert_eq!(query.search, "bob");
        assert_eq!(query.page, 0);
        assert_eq!(query.page_size, 5);

        // An explicit page in the same patch wins over the reset
        query.apply(QueryPatch {
            page_size: Some(10),
            page: Some(2),
            ..QueryPatch::default()
        });
        assert_eq!(query.page_size, 10);
        assert_eq!(query.page, 2);
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = QueryState::default();
        query.toggle_sort(SortKey::Name);
        assert_eq!(query.sort_key, Some(SortKey::Name));
        assert_eq!(query.sort_order, SortOrder::Ascending);

        query.toggle_sort(SortKey::Name);
        assert_eq!(query.sort_order, SortOrder::Descending);

        query.toggle_sort(SortKey::Email);
        assert_eq!(query.sort_key, Some(SortKey::Email));
        assert_eq!(query.sort_order, SortOrder::Ascending);
    }
}
