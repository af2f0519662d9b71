//! Field rules for the signup draft.
//!
//! Every function here is pure: the same draft always yields the same errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    domain::{Field, SubmissionDraft},
    error::{FieldError, ValidationErrors},
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// local-part "@" domain "." TLD, ASCII letters in either case. The value is matched as
/// typed, so surrounding whitespace makes it malformed.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_field(draft: &SubmissionDraft, field: Field) -> Option<FieldError> {
    match field {
        Field::FirstName if draft.first_name.trim().is_empty() => {
            Some(FieldError::FirstNameMissing)
        }
        Field::LastName if draft.last_name.trim().is_empty() => Some(FieldError::LastNameMissing),
        Field::Email if draft.email.is_empty() => Some(FieldError::EmailMissing),
        Field::Email if !is_valid_email(&draft.email) => Some(FieldError::EmailMalformed),
        Field::Consent if !draft.consent_given => Some(FieldError::ConsentMissing),
        _ => None,
    }
}

/// Runs every required-field rule. The contribution selection is deliberately not part of
/// this set; it only drives the submit gate and the hint.
pub fn validate_draft(draft: &SubmissionDraft) -> ValidationErrors {
    [Field::FirstName, Field::LastName, Field::Email, Field::Consent]
        .into_iter()
        .filter_map(|field| validate_field(draft, field))
        .collect()
}

/// Required fields valid, at least one contribution, consent given.
pub fn is_eligible(draft: &SubmissionDraft) -> bool {
    draft.has_selected_contribution() && validate_draft(draft).is_empty()
}
