use thiserror::Error;

/// Mutation errors from the record store. `NotFound` is a reported
/// no-op: the store and query state are left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(i64),
}

/// Failures while refreshing records from the remote source. A failed
/// refresh never corrupts the in-memory records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),
}
