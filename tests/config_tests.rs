use tempfile::TempDir;
use user_table::config::TableConfig;
use user_table::data::query::SortKey;

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = TableConfig::default();
    config.validation.min_age = 21;
    config.table.sortable_columns = vec![SortKey::Name, SortKey::BirthDate];

    // save_to creates the missing parent directory
    config.save_to(&path).unwrap();
    let loaded = TableConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn unknown_file_is_an_error_not_a_default() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(TableConfig::load_from(&missing).is_err());
}
