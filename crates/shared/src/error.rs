use std::fmt;

use thiserror::Error;

use crate::domain::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    #[error("first name is required")]
    FirstNameMissing,
    #[error("last name is required")]
    LastNameMissing,
    #[error("email is required")]
    EmailMissing,
    #[error("email address is malformed")]
    EmailMalformed,
    #[error("data-processing consent was not given")]
    ConsentMissing,
}

impl FieldError {
    pub fn field(self) -> Field {
        match self {
            FieldError::FirstNameMissing => Field::FirstName,
            FieldError::LastNameMissing => Field::LastName,
            FieldError::EmailMissing | FieldError::EmailMalformed => Field::Email,
            FieldError::ConsentMissing => Field::Consent,
        }
    }
}

/// Field errors from one validation pass, at most one per field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        let field = error.field();
        self.errors.retain(|existing| existing.field() != field);
        self.errors.push(error);
        self.errors.sort_by_key(|e| e.field());
    }

    pub fn clear_field(&mut self, field: Field) {
        self.errors.retain(|e| e.field() != field);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors.iter().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "invalid submission: {}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.push(error);
        }
        errors
    }
}
