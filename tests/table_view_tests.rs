use user_table::data::query::{QueryState, SortKey, SortOrder};
use user_table::data::record::{Role, UserRecord};
use user_table::data::table_view::{matches_search, project};

fn user(id: i64, name: &str, email: &str, role: Role) -> UserRecord {
    UserRecord::new(id, name, email, role)
}

fn five_users() -> Vec<UserRecord> {
    vec![
        user(1, "Carol", "carol@x.com", Role::User),
        user(2, "Alice", "alice@x.com", Role::Admin),
        user(3, "Eve", "eve@x.com", Role::Guest),
        user(4, "Bob", "bob@x.com", Role::User),
        user(5, "Dave", "dave@x.com", Role::User),
    ]
}

#[test]
fn filtered_records_all_contain_the_term() {
    let records = five_users();
    let mut query = QueryState::default();
    query.set_search("x.com");

    let page = project(&records, &query);
    assert_eq!(page.filtered_count, 5);

    query.set_search("ali");
    query.set_page_size(100);
    let page = project(&records, &query);

    // Every kept record contains the term; every dropped one does not
    for record in &page.rows {
        assert!(matches_search(record, "ali"));
    }
    for record in records.iter().filter(|r| !page.rows.contains(r)) {
        assert!(!matches_search(record, "ali"));
    }
    assert_eq!(page.filtered_count, 1);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    // Three Users tie on role; their id order must survive the sort
    let records = five_users();
    let mut query = QueryState::default();
    query.set_sort(SortKey::Role, SortOrder::Ascending);
    query.set_page_size(100);

    let page = project(&records, &query);
    let tied: Vec<i64> = page
        .rows
        .iter()
        .filter(|r| r.role == Role::User)
        .map(|r| r.id)
        .collect();
    assert_eq!(tied, vec![1, 4, 5]);
}

#[test]
fn pages_never_exceed_page_size_and_concatenate_to_the_full_set() {
    let records = five_users();
    let mut query = QueryState::default();
    query.set_sort(SortKey::Name, SortOrder::Ascending);
    query.set_page_size(2);

    let mut seen = Vec::new();
    let full = {
        let mut q = query.clone();
        q.set_page_size(100);
        project(&records, &q).rows
    };

    let page_count = project(&records, &query).page_count;
    assert_eq!(page_count, 3);

    for page_idx in 0..page_count {
        query.set_page(page_idx);
        let page = project(&records, &query);
        assert!(page.rows.len() <= 2);
        seen.extend(page.rows);
    }
    assert_eq!(seen, full);
}

#[test]
fn first_page_of_two_holds_the_smallest_names_and_reports_total() {
    // Query {search:"", sort:name asc, page:0, pageSize:2} over 5 records
    let records = five_users();
    let mut query = QueryState::default();
    query.set_sort(SortKey::Name, SortOrder::Ascending);
    query.set_page_size(2);
    query.set_page(0);

    let page = project(&records, &query);
    let names: Vec<&str> = page.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(page.filtered_count, 5);
}

#[test]
fn shrinking_filter_clamps_a_stale_page_index() {
    let records = five_users();
    let mut query = QueryState::default();
    query.set_page_size(2);
    query.page = 2; // valid for 5 records

    let page = project(&records, &query);
    assert_eq!(page.page, 2);
    assert_eq!(page.rows.len(), 1);

    // A filter shrinks the set below page * page_size
    query.search = "alice".to_string(); // bypass setter to keep the stale page
    let page = project(&records, &query);
    assert_eq!(page.filtered_count, 1);
    assert_eq!(page.page, 0);
    assert_eq!(page.rows.len(), 1);
}
