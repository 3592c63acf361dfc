pub mod api_client;
pub mod config;
pub mod data;
pub mod edit;
pub mod error;
pub mod loader;
pub mod validation;

pub use config::TableConfig;
pub use data::query::{QueryPatch, QueryState, SortKey, SortOrder};
pub use data::record::{Field, RecordPatch, Role, UserDraft, UserRecord};
pub use data::record_store::RecordStore;
pub use data::table_view::{project, TablePage};
pub use edit::{DialogEditor, DialogMode, DialogState, InlineEditor, InlineState};
pub use error::{FetchError, StoreError};
pub use loader::{LoadSequencer, LoadTicket};
pub use validation::{UserSchema, ValidationErrors, ValidationRules};
