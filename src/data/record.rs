use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for birth dates in drafts and JSON payloads
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The closed set of roles a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Guest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Guest => "Guest",
        }
    }

    /// Presentation color hint for the role chip
    pub fn color(&self) -> &'static str {
        match self {
            Role::Admin => "error",
            Role::User => "info",
            Role::Guest => "secondary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "User" => Ok(Role::User),
            "Guest" => Ok(Role::Guest),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// One administrative user entity managed by the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Optional because one table variant has no birth-date column
    pub birth_date: Option<NaiveDate>,
}

impl UserRecord {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            birth_date: None,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}

/// Field keys for per-field validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Role,
    BirthDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Role => "role",
            Field::BirthDate => "birth_date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress edits to one record, held as raw form text so that
/// invalid input stays representable until validation runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub birth_date: String,
}

impl UserDraft {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.to_string(),
            birth_date: record
                .birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::Role => self.role = value.to_string(),
            Field::BirthDate => self.birth_date = value.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Role => &self.role,
            Field::BirthDate => &self.birth_date,
        }
    }

    /// Convert validated draft text into a typed patch.
    /// Returns None when the role or birth date does not parse;
    /// callers run validation first, so None here means the draft
    /// was committed without validating.
    pub fn to_patch(&self) -> Option<RecordPatch> {
        let role = Role::from_str(self.role.trim()).ok()?;
        let birth_date = if self.birth_date.trim().is_empty() {
            None
        } else {
            Some(NaiveDate::parse_from_str(self.birth_date.trim(), DATE_FORMAT).ok()?)
        };

        Some(RecordPatch {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role,
            birth_date,
        })
    }
}

/// The typed, validated field set written back into the store
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPatch {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub birth_date: Option<NaiveDate>,
}

impl RecordPatch {
    /// Overwrite the editable fields of a record, leaving the id alone
    pub fn apply_to(&self, record: &mut UserRecord) {
        record.name = self.name.clone();
        record.email = self.email.clone();
        record.role = self.role;
        record.birth_date = self.birth_date;
    }

    pub fn into_record(self, id: i64) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            birth_date: self.birth_date,
        }
    }
}
