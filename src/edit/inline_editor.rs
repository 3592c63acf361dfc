use tracing::warn;

use crate::data::record::{Field, UserDraft};
use crate::data::record_store::RecordStore;
use crate::error::StoreError;
use crate::validation::{UserSchema, ValidationErrors, ValidationRules};

/// At most one record is edited in place at a time
#[derive(Debug, Clone, PartialEq)]
pub enum InlineState {
    Idle,
    Editing {
        id: i64,
        draft: UserDraft,
        errors: ValidationErrors,
    },
}

/// In-place row editing: field changes are validated one field at a
/// time against the live draft, saving validates everything
pub struct InlineEditor {
    state: InlineState,
    rules: ValidationRules,
}

impl InlineEditor {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            state: InlineState::Idle,
            rules,
        }
    }

    pub fn state(&self) -> &InlineState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<i64> {
        match &self.state {
            InlineState::Editing { id, .. } => Some(*id),
            InlineState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn draft(&self) -> Option<&UserDraft> {
        match &self.state {
            InlineState::Editing { draft, .. } => Some(draft),
            InlineState::Idle => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match &self.state {
            InlineState::Editing { errors, .. } => Some(errors),
            InlineState::Idle => None,
        }
    }

    /// Start editing a record in place. An edit already in progress is
    /// discarded without saving; the target record must exist.
    pub fn begin_edit(&mut self, store: &RecordStore, id: i64) -> Result<(), StoreError> {
        let record = store.get(id).ok_or(StoreError::NotFound(id))?;

        if let InlineState::Editing { id: previous, .. } = &self.state {
            warn!(discarded = previous, "new inline edit discards unsaved draft");
        }

        self.state = InlineState::Editing {
            id,
            draft: UserDraft::from_record(record),
            errors: ValidationErrors::new(),
        };
        Ok(())
    }

    /// Apply a field change to the draft and re-validate just that
    /// field in the context of the updated draft. No-op while idle.
    pub fn edit_field(&mut self, store: &RecordStore, field: Field, value: &str) {
        let InlineState::Editing { id, draft, errors } = &mut self.state else {
            return;
        };

        draft.set(field, value);
        let schema = UserSchema::new(self.rules.clone(), store.records(), Some(*id));
        match schema.validate_field(field, draft) {
            Some(message) => errors.insert(field, message),
            None => errors.remove(field),
        }
    }

    /// Discard the draft and errors without touching the store
    pub fn cancel(&mut self) {
        self.state = InlineState::Idle;
    }

    /// UI affordance: whether the save control should be enabled. Not
    /// a substitute for the full validation done in `save`.
    pub fn can_save(&self) -> bool {
        let InlineState::Editing { draft, errors, .. } = &self.state else {
            return false;
        };
        if !errors.is_empty() {
            return false;
        }
        let required_filled = !draft.name.trim().is_empty()
            && !draft.email.trim().is_empty()
            && !draft.role.trim().is_empty()
            && (!self.rules.require_birth_date || !draft.birth_date.trim().is_empty());
        required_filled
    }

    /// Validate the entire draft and, if clean, write it back via
    /// `update`. Returns Ok(true) when the save committed, Ok(false)
    /// when validation failed (the full error mapping stays on the
    /// editor and the store is untouched). A record that vanished
    /// underneath the edit surfaces `NotFound` and abandons the draft.
    pub fn save(&mut self, store: &mut RecordStore) -> Result<bool, StoreError> {
        let InlineState::Editing { id, draft, errors } = &mut self.state else {
            return Ok(false);
        };

        let schema = UserSchema::new(self.rules.clone(), store.records(), Some(*id));
        let validation = schema.validate(draft);
        if !validation.is_empty() {
            *errors = validation;
            return Ok(false);
        }

        let Some(patch) = draft.to_patch() else {
            warn!(id, "draft failed conversion after validation; not saved");
            return Ok(false);
        };

        let id = *id;
        let result = store.update(id, patch);
        self.state = InlineState::Idle;
        result.map(|()| true)
    }
}
