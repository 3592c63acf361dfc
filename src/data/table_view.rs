//! Pure projection pipeline over the record store: filter, then a
//! stable sort, then pagination. Never mutates the underlying records.

use std::cmp::Ordering;

use crate::data::query::{QueryState, SortKey, SortOrder};
use crate::data::record::UserRecord;

/// One rendered page of the table plus the totals needed for
/// "X of Y" displays and page-count math
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    pub rows: Vec<UserRecord>,
    /// Count after filtering, before pagination
    pub filtered_count: usize,
    /// Effective page index; differs from the requested one when a
    /// shrinking filtered set forced a clamp to the last page
    pub page: usize,
    pub page_count: usize,
}

impl TablePage {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derive the visible page from raw records and query state.
///
/// Filter keeps records whose name, email, and role (joined with
/// spaces) contain the search term case-insensitively; an empty term
/// matches everything. Sorting is stable; string keys compare
/// case-sensitively on the raw field value. The requested page index
/// is clamped to the last non-empty page when the filtered set is
/// too small to reach it.
pub fn project(records: &[UserRecord], query: &QueryState) -> TablePage {
    let mut visible: Vec<&UserRecord> = records
        .iter()
        .filter(|record| matches_search(record, &query.search))
        .collect();

    if let Some(key) = query.sort_key {
        visible.sort_by(|a, b| {
            let cmp = compare_by_key(a, b, key);
            match query.sort_order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
    }

    let filtered_count = visible.len();
    let page_size = query.page_size.max(1);
    let page_count = filtered_count.div_ceil(page_size);
    let page = if page_count == 0 {
        0
    } else {
        query.page.min(page_count - 1)
    };

    let start = (page * page_size).min(filtered_count);
    let end = (start + page_size).min(filtered_count);
    let rows = visible[start..end].iter().map(|r| (*r).clone()).collect();

    TablePage {
        rows,
        filtered_count,
        page,
        page_count,
    }
}

/// Case-insensitive containment over the searchable fields
pub fn matches_search(record: &UserRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", record.name, record.email, record.role).to_lowercase();
    haystack.contains(&term.to_lowercase())
}

fn compare_by_key(a: &UserRecord, b: &UserRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Email => a.email.cmp(&b.email),
        SortKey::Role => a.role.as_str().cmp(b.role.as_str()),
        // Records without a birth date sort first
        SortKey::BirthDate => a.birth_date.cmp(&b.birth_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Role;

    fn sample() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Carol", "carol@x.com", Role::User),
            UserRecord::new(2, "Alice", "alice@x.com", Role::Admin),
            UserRecord::new(3, "Bob", "bob@x.com", Role::Guest),
        ]
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let records = sample();
        let page = project(&records, &QueryState::default());
        assert_eq!(page.filtered_count, 3);
        assert_eq!(page.rows.len(), 3);
    }

    #[test]
    fn test_filter_matches_role_text() {
        let records = sample();
        let mut query = QueryState::default();
        query.set_search("admin");

        let page = project(&records, &query);
        assert_eq!(page.filtered_count, 1);
        assert_eq!(page.rows[0].name, "Alice");
    }

    #[test]
    fn test_stale_page_index_clamps_to_last_page() {
        let records = sample();
        let mut query = QueryState::default();
        query.set_page_size(2);
        query.set_page(5);

        let page = project(&records, &query);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn test_empty_filtered_set_reports_page_zero() {
        let records = sample();
        let mut query = QueryState::default();
        query.set_search("no such user");
        query.set_page(4);

        let page = project(&records, &query);
        assert!(page.is_empty());
        assert_eq!(page.page, 0);
        assert_eq!(page.page_count, 0);
    }

    #[test]
    fn test_descending_sort_reverses_order() {
        let records = sample();
        let mut query = QueryState::default();
        query.set_sort(SortKey::Name, SortOrder::Descending);

        let page = project(&records, &query);
        let names: Vec<&str> = page.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
    }
}
