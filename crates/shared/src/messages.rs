//! User-facing copy. The page was written in German; English is the default here.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{
    domain::{Contribution, Field},
    error::FieldError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    De,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "de" | "deutsch" | "german" => Ok(Language::De),
            other => Err(format!("unsupported language '{other}' (expected 'en' or 'de')")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => f.write_str("en"),
            Language::De => f.write_str("de"),
        }
    }
}

impl Language {
    pub fn field_error(self, error: FieldError) -> &'static str {
        match (self, error) {
            (Language::En, FieldError::FirstNameMissing) => "First name is required",
            (Language::En, FieldError::LastNameMissing) => "Last name is required",
            (Language::En, FieldError::EmailMissing | FieldError::EmailMalformed) => {
                "Invalid email address"
            }
            (Language::En, FieldError::ConsentMissing) => {
                "Please accept the data-processing consent"
            }
            (Language::De, FieldError::FirstNameMissing) => "Vorname ist erforderlich",
            (Language::De, FieldError::LastNameMissing) => "Nachname ist erforderlich",
            (Language::De, FieldError::EmailMissing) => "E-Mail ist erforderlich",
            (Language::De, FieldError::EmailMalformed) => "Ungültige E-Mail-Adresse",
            (Language::De, FieldError::ConsentMissing) => {
                "Bitte stimmen Sie der Datenschutzerklärung zu"
            }
        }
    }

    pub fn field_label(self, field: Field) -> &'static str {
        match (self, field) {
            (Language::En, Field::FirstName) => "First name *",
            (Language::En, Field::LastName) => "Last name *",
            (Language::En, Field::Email) => "Email *",
            (Language::En, Field::Organisation) => "Company / organisation",
            (Language::En, Field::Consent) => "Consent *",
            (Language::De, Field::FirstName) => "Vorname *",
            (Language::De, Field::LastName) => "Nachname *",
            (Language::De, Field::Email) => "E-Mail *",
            (Language::De, Field::Organisation) => "Unternehmen / Organisation",
            (Language::De, Field::Consent) => "Einwilligung *",
        }
    }

    pub fn contribution_hint(self) -> &'static str {
        match self {
            Language::En => "Please select at least one option.",
            Language::De => "Bitte wählen Sie mindestens eine Option.",
        }
    }

    /// The only message a failed submission ever shows, whatever the cause.
    pub fn submission_failed(self) -> &'static str {
        match self {
            Language::En => "An error occurred. Please try again.",
            Language::De => "Ein Fehler ist aufgetreten. Bitte versuchen Sie es erneut.",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Language::En => "JOIN NOW",
            Language::De => "JETZT MITWIRKEN",
        }
    }

    pub fn submitting_label(self) -> &'static str {
        match self {
            Language::En => "SENDING...",
            Language::De => "WIRD GESENDET...",
        }
    }

    pub fn confirmation(self) -> [&'static str; 3] {
        match self {
            Language::En => ["THANK YOU!", "You're in.", "We'll be in touch shortly."],
            Language::De => [
                "VIELEN DANK!",
                "Sie sind dabei.",
                "Wir melden uns in Kürze bei Ihnen.",
            ],
        }
    }

    pub fn contribution_title(self, contribution: Contribution) -> &'static str {
        match (self, contribution) {
            (Language::En, Contribution::Information) => "Information & network",
            (Language::En, Contribution::Expertise) => "Expertise & participation",
            (Language::En, Contribution::Financial) => "Financial support",
            (Language::De, Contribution::Information) => "Information & Netzwerk",
            (Language::De, Contribution::Expertise) => "Expertise & Mitwirkung",
            (Language::De, Contribution::Financial) => "Finanzielle Unterstützung",
        }
    }

    pub fn consent_text(self) -> &'static str {
        match self {
            Language::En => {
                "I agree that my data is stored and processed to contact me about the \
                 Gründungskreis Befähigungsrepublik."
            }
            Language::De => {
                "Ich stimme zu, dass meine Daten zur Kontaktaufnahme im Rahmen des \
                 Gründungskreises Befähigungsrepublik gespeichert und verarbeitet werden."
            }
        }
    }
}
