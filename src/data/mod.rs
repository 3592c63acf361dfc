//! Data layer: the record model, query state, the in-memory store,
//! and the read-only projection over it.

pub mod query;
pub mod record;
pub mod record_store;
pub mod table_view;
