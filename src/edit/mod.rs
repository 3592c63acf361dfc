//! Edit workflows over the record store: in-place row editing and the
//! modal create/update dialog. Both run drafts through the shared
//! validation schema before touching the store.

pub mod dialog_editor;
pub mod inline_editor;

pub use dialog_editor::{DialogEditor, DialogMode, DialogState};
pub use inline_editor::{InlineEditor, InlineState};
