use chrono::{Local, NaiveDate};
use regex::Regex;
use std::str::FromStr;

use crate::data::record::{Field, Role, UserDraft, UserRecord, DATE_FORMAT};
use crate::validation::{ValidationErrors, ValidationRules};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Validator built from the current record set plus an optional
/// "record being edited" identifier, which keeps its own email out of
/// the uniqueness check.
pub struct UserSchema {
    rules: ValidationRules,
    /// Lowercased emails of all records except the excluded one
    taken_emails: Vec<String>,
    email_re: Regex,
}

impl UserSchema {
    pub fn new(rules: ValidationRules, records: &[UserRecord], exclude_id: Option<i64>) -> Self {
        let taken_emails = records
            .iter()
            .filter(|record| Some(record.id) != exclude_id)
            .map(|record| record.email.to_lowercase())
            .collect();

        Self {
            rules,
            taken_emails,
            email_re: Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"),
        }
    }

    /// Validate a single field against the rest of the draft.
    /// Returns the error message, or None when the field is valid.
    pub fn validate_field(&self, field: Field, draft: &UserDraft) -> Option<String> {
        match field {
            Field::Name => self.validate_name(&draft.name),
            Field::Email => self.validate_email(&draft.email),
            Field::Role => self.validate_role(&draft.role),
            Field::BirthDate => self.validate_birth_date(&draft.birth_date, today()),
        }
    }

    /// Validate the whole draft, collecting every field error rather
    /// than stopping at the first failure
    pub fn validate(&self, draft: &UserDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in [Field::Name, Field::Email, Field::Role, Field::BirthDate] {
            if let Some(message) = self.validate_field(field, draft) {
                errors.insert(field, message);
            }
        }
        errors
    }

    fn validate_name(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return Some("Name is required".to_string());
        }
        let len = name.chars().count();
        if len < self.rules.name_min_len {
            return Some(format!(
                "Name must be at least {} characters",
                self.rules.name_min_len
            ));
        }
        if len > self.rules.name_max_len {
            return Some(format!(
                "Name must be at most {} characters",
                self.rules.name_max_len
            ));
        }
        None
    }

    fn validate_email(&self, email: &str) -> Option<String> {
        let email = email.trim();
        if email.is_empty() {
            return Some("Email is required".to_string());
        }
        if !self.email_re.is_match(email) {
            return Some("Email format is invalid".to_string());
        }
        if self.taken_emails.contains(&email.to_lowercase()) {
            return Some("Email is already in use".to_string());
        }
        None
    }

    fn validate_role(&self, role: &str) -> Option<String> {
        let role = role.trim();
        if role.is_empty() {
            return Some("Role is required".to_string());
        }
        if Role::from_str(role).is_err() {
            return Some("Role is invalid".to_string());
        }
        None
    }

    fn validate_birth_date(&self, birth_date: &str, today: NaiveDate) -> Option<String> {
        let birth_date = birth_date.trim();
        if birth_date.is_empty() {
            if self.rules.require_birth_date {
                return Some("Birth date is required".to_string());
            }
            return None;
        }

        let Ok(date) = NaiveDate::parse_from_str(birth_date, DATE_FORMAT) else {
            return Some("Birth date is invalid".to_string());
        };
        if date > today {
            return Some("Birth date cannot be in the future".to_string());
        }

        // years_since gives whole elapsed years, so the decrement
        // before the birthday is already accounted for
        match today.years_since(date) {
            Some(age) if age >= self.rules.min_age => None,
            _ => Some(format!("Must be at least {} years old", self.rules.min_age)),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
