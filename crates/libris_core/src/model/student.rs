//! Student ("reader") domain record.
//!
//! # Responsibility
//! - Define the roster record and its editing-boundary validation.
//! - Keep the held-books list as ordered display strings.
//!
//! # Invariants
//! - `id` is stable for the process lifetime and never persisted.
//! - `books` preserves insertion order.
//! - Name validation is enforced by workflows, not by storage: a loaded
//!   roster may contain names that would be rejected by the editor.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable process-lifetime identifier for a student.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = Uuid;

/// Letters (Cyrillic or Latin) and hyphen only, over the whole value.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[А-Яа-яA-Za-z-]+$").expect("name pattern must compile"));

/// Editing-boundary rejection for a student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentValidationError {
    /// Which of the three name fields failed.
    pub field: &'static str,
    /// The rejected value, trimmed.
    pub value: String,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} must contain only letters or hyphens, got `{}`",
            self.field, self.value
        )
    }
}

impl Error for StudentValidationError {}

/// Roster record for one reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Process-lifetime identity used to map filtered rows back to the store.
    #[serde(skip, default = "fresh_student_id")]
    pub id: StudentId,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    /// Free text in storage; workflows offer only labels from config.
    #[serde(rename = "class", default)]
    pub class_label: String,
    #[serde(default)]
    pub parallel: String,
    /// Display strings of held books, insertion order preserved.
    #[serde(default)]
    pub books: Vec<String>,
}

fn fresh_student_id() -> StudentId {
    Uuid::new_v4()
}

impl Student {
    /// Creates a record with a generated id. Name fields are trimmed.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        middle_name: impl Into<String>,
        class_label: impl Into<String>,
        parallel: impl Into<String>,
        books: Vec<String>,
    ) -> Self {
        Self {
            id: fresh_student_id(),
            last_name: last_name.into().trim().to_string(),
            first_name: first_name.into().trim().to_string(),
            middle_name: middle_name.into().trim().to_string(),
            class_label: class_label.into(),
            parallel: parallel.into(),
            books,
        }
    }

    /// Checks the three name fields against the editing rule.
    ///
    /// # Errors
    /// - Returns the first offending field with its trimmed value.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        for (field, value) in [
            ("last_name", &self.last_name),
            ("first_name", &self.first_name),
            ("middle_name", &self.middle_name),
        ] {
            if !is_valid_name(value) {
                return Err(StudentValidationError {
                    field,
                    value: value.trim().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Space-joined "last first middle" used by worklists and status rows.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.middle_name)
    }
}

/// Returns whether `text` (trimmed) is an acceptable name field.
pub fn is_valid_name(text: &str) -> bool {
    NAME_PATTERN.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_name, Student};

    #[test]
    fn names_accept_cyrillic_latin_and_hyphen() {
        assert!(is_valid_name("Анна"));
        assert!(is_valid_name("Smith"));
        assert!(is_valid_name("Петрова-Иванова"));
        assert!(is_valid_name("  Анна  "));
    }

    #[test]
    fn names_reject_digits_blanks_and_punctuation() {
        assert!(!is_valid_name("1234"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("Анна5"));
        assert!(!is_valid_name("O'Brien"));
    }

    #[test]
    fn validate_reports_first_bad_field() {
        let student = Student::new("Иванов", "1234", "Петрович", "5", "А", Vec::new());
        let err = student.validate().unwrap_err();
        assert_eq!(err.field, "first_name");
        assert_eq!(err.value, "1234");
    }

    #[test]
    fn new_trims_name_fields_but_not_labels() {
        let student = Student::new(" Иванов ", "Пётр", "Сергеевич", "5", "А", Vec::new());
        assert_eq!(student.last_name, "Иванов");
        assert_eq!(student.class_label, "5");
    }
}
