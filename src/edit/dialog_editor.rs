use tracing::warn;

use crate::data::record::{Field, UserDraft};
use crate::data::record_store::RecordStore;
use crate::error::StoreError;
use crate::validation::{UserSchema, ValidationErrors, ValidationRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Update(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogState {
    Closed,
    Open {
        mode: DialogMode,
        draft: UserDraft,
        errors: ValidationErrors,
    },
}

/// Modal create/update form. Submitting validates the whole draft;
/// failure keeps the dialog open with field errors, success commits to
/// the store and closes it.
pub struct DialogEditor {
    state: DialogState,
    rules: ValidationRules,
}

impl DialogEditor {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            state: DialogState::Closed,
            rules,
        }
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    pub fn mode(&self) -> Option<DialogMode> {
        match &self.state {
            DialogState::Open { mode, .. } => Some(*mode),
            DialogState::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&UserDraft> {
        match &self.state {
            DialogState::Open { draft, .. } => Some(draft),
            DialogState::Closed => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match &self.state {
            DialogState::Open { errors, .. } => Some(errors),
            DialogState::Closed => None,
        }
    }

    /// Open the dialog with an empty draft for a new record
    pub fn open_create(&mut self) {
        self.state = DialogState::Open {
            mode: DialogMode::Create,
            draft: UserDraft::default(),
            errors: ValidationErrors::new(),
        };
    }

    /// Open the dialog pre-filled from an existing record
    pub fn open_update(&mut self, store: &RecordStore, id: i64) -> Result<(), StoreError> {
        let record = store.get(id).ok_or(StoreError::NotFound(id))?;
        self.state = DialogState::Open {
            mode: DialogMode::Update(id),
            draft: UserDraft::from_record(record),
            errors: ValidationErrors::new(),
        };
        Ok(())
    }

    /// Apply a form change and re-validate that field live
    pub fn set_field(&mut self, store: &RecordStore, field: Field, value: &str) {
        let DialogState::Open { mode, draft, errors } = &mut self.state else {
            return;
        };

        draft.set(field, value);
        let exclude = match mode {
            DialogMode::Create => None,
            DialogMode::Update(id) => Some(*id),
        };
        let schema = UserSchema::new(self.rules.clone(), store.records(), exclude);
        match schema.validate_field(field, draft) {
            Some(message) => errors.insert(field, message),
            None => errors.remove(field),
        }
    }

    /// Close without committing anything
    pub fn cancel(&mut self) {
        self.state = DialogState::Closed;
    }

    /// Validate the full draft and commit. Create assigns the next
    /// identifier via `add`; Update writes through `update`. Returns
    /// Ok(true) on commit, Ok(false) when validation failed and the
    /// dialog stays open with errors surfaced.
    pub fn submit(&mut self, store: &mut RecordStore) -> Result<bool, StoreError> {
        let DialogState::Open { mode, draft, errors } = &mut self.state else {
            return Ok(false);
        };

        let exclude = match mode {
            DialogMode::Create => None,
            DialogMode::Update(id) => Some(*id),
        };
        let schema = UserSchema::new(self.rules.clone(), store.records(), exclude);
        let validation = schema.validate(draft);
        if !validation.is_empty() {
            *errors = validation;
            return Ok(false);
        }

        let Some(patch) = draft.to_patch() else {
            warn!("dialog draft failed conversion after validation; not saved");
            return Ok(false);
        };

        let mode = *mode;
        let result = match mode {
            DialogMode::Create => {
                store.add(patch);
                Ok(())
            }
            DialogMode::Update(id) => store.update(id, patch),
        };
        self.state = DialogState::Closed;
        result.map(|()| true)
    }
}
