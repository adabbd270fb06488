//! Course domain model.
//!
//! # Responsibility
//! - Define the persisted course record and the validated draft shape used
//!   by the add path.
//! - Keep the validity rules in one place so every write path shares them.
//!
//! # Invariants
//! - `department` and `location` are non-empty after trimming.
//! - `number` is a positive integer (zero and negatives are rejected).
//! - `id` is the store-assigned surrogate key; drafts have no identity yet.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate identifier assigned by the store (SQLite AUTOINCREMENT).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CourseId = i64;

/// Validation failure for course field input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseValidationError {
    /// Department text is empty or whitespace-only.
    EmptyDepartment,
    /// Location text is empty or whitespace-only.
    EmptyLocation,
    /// Course number must be a positive integer.
    NonPositiveNumber(i64),
}

impl Display for CourseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDepartment => write!(f, "course department must not be empty"),
            Self::EmptyLocation => write!(f, "course location must not be empty"),
            Self::NonPositiveNumber(number) => {
                write!(f, "course number must be a positive integer, got {number}")
            }
        }
    }
}

impl Error for CourseValidationError {}

/// Course field input before the store has assigned an identifier.
///
/// Drafts come from form submission; `validate` gates every write path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    /// Catalog course number, e.g. 3210.
    pub number: i64,
    /// Department code or name, e.g. "CS".
    pub department: String,
    /// Room or building where the course meets.
    pub location: String,
}

impl CourseDraft {
    pub fn new(number: i64, department: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            number,
            department: department.into(),
            location: location.into(),
        }
    }

    /// Checks the course validity invariant.
    ///
    /// # Errors
    /// - `EmptyDepartment` / `EmptyLocation` when the text is blank.
    /// - `NonPositiveNumber` when `number < 1`.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if self.department.trim().is_empty() {
            return Err(CourseValidationError::EmptyDepartment);
        }
        if self.location.trim().is_empty() {
            return Err(CourseValidationError::EmptyLocation);
        }
        if self.number < 1 {
            return Err(CourseValidationError::NonPositiveNumber(self.number));
        }
        Ok(())
    }
}

/// Persisted course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned surrogate key.
    pub id: CourseId,
    pub number: i64,
    pub department: String,
    pub location: String,
}

impl Course {
    /// Rebuilds the field-only draft shape, used by replace flows.
    pub fn draft(&self) -> CourseDraft {
        CourseDraft {
            number: self.number,
            department: self.department.clone(),
            location: self.location.clone(),
        }
    }

    /// Checks the same validity invariant as the draft form.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        self.draft().validate()
    }

    /// Exact-match key used by the remove flow.
    pub fn matches(&self, number: i64, department: &str, location: &str) -> bool {
        self.number == number && self.department == department && self.location == location
    }
}
