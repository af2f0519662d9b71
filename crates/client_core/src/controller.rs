//! Form controller: owns the draft, reduces UI events into it, and drives the submit state machine.

use shared::{
    domain::{Contribution, Field, SubmissionDraft},
    error::ValidationErrors,
    messages::Language,
    protocol::FormPayload,
    validation::{validate_draft, validate_field},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::transport::{FormTransport, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SetFirstName(String),
    SetLastName(String),
    SetEmail(String),
    SetOrganisation(String),
    ToggleContribution(Contribution),
    SetContribution(Contribution, bool),
    SetConsent(bool),
}

impl FormEvent {
    fn field(&self) -> Option<Field> {
        match self {
            FormEvent::SetFirstName(_) => Some(Field::FirstName),
            FormEvent::SetLastName(_) => Some(Field::LastName),
            FormEvent::SetEmail(_) => Some(Field::Email),
            FormEvent::SetOrganisation(_) => Some(Field::Organisation),
            FormEvent::SetConsent(_) => Some(Field::Consent),
            FormEvent::ToggleContribution(_) | FormEvent::SetContribution(..) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Editing,
    Submitting,
    Submitted,
    /// Back in an editable state, with a form-level message shown until the next attempt.
    Failed { message: String },
}

impl UiState {
    pub fn is_editable(&self) -> bool {
        matches!(self, UiState::Editing | UiState::Failed { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submit control was disabled; nothing was validated or sent.
    Disabled,
    Invalid(ValidationErrors),
    Submitted,
    Failed(String),
}

pub struct FormController<T> {
    transport: T,
    language: Language,
    draft: SubmissionDraft,
    errors: ValidationErrors,
    submit_attempted: bool,
    state: watch::Sender<UiState>,
}

impl<T: FormTransport> FormController<T> {
    pub fn new(transport: T, language: Language) -> Self {
        let (state, _) = watch::channel(UiState::Editing);
        Self {
            transport,
            language,
            draft: SubmissionDraft::default(),
            errors: ValidationErrors::new(),
            submit_attempted: false,
            state,
        }
    }

    pub fn with_draft(mut self, draft: SubmissionDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Observers (e.g. a spinner) see every state transition, including `Submitting`.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_message(&self, field: Field) -> Option<&'static str> {
        self.errors
            .get(field)
            .map(|error| self.language.field_error(error))
    }

    pub fn has_selected_contribution(&self) -> bool {
        self.draft.has_selected_contribution()
    }

    /// Soft hint shown under the contribution options; never a blocking field error.
    pub fn contribution_hint(&self) -> Option<&'static str> {
        (!self.has_selected_contribution()).then(|| self.language.contribution_hint())
    }

    pub fn can_submit(&self) -> bool {
        self.state.borrow().is_editable() && self.has_selected_contribution()
    }

    pub fn submit_label(&self) -> &'static str {
        if *self.state.borrow() == UiState::Submitting {
            self.language.submitting_label()
        } else {
            self.language.submit_label()
        }
    }

    /// Applies one UI input. Returns `false` when the form is not editable and the event was dropped.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        if !self.state.borrow().is_editable() {
            debug!(?event, state = ?*self.state.borrow(), "ignoring form event");
            return false;
        }

        let field = event.field();
        match event {
            FormEvent::SetFirstName(value) => self.draft.first_name = value,
            FormEvent::SetLastName(value) => self.draft.last_name = value,
            FormEvent::SetEmail(value) => self.draft.email = value,
            FormEvent::SetOrganisation(value) => self.draft.organisation = value,
            FormEvent::ToggleContribution(contribution) => {
                let selected = self.draft.contribution(contribution);
                self.draft.set_contribution(contribution, !selected);
            }
            FormEvent::SetContribution(contribution, selected) => {
                self.draft.set_contribution(contribution, selected);
            }
            FormEvent::SetConsent(given) => self.draft.consent_given = given,
        }

        // fields only re-validate on change once a submit has been attempted
        if let (Some(field), true) = (field, self.submit_attempted) {
            self.errors.clear_field(field);
            if let Some(error) = validate_field(&self.draft, field) {
                self.errors.push(error);
            }
        }
        true
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let result = self.transport.submit(&payload).await;
        self.finish_submit(result)
    }

    fn begin_submit(&mut self) -> Result<FormPayload, SubmitOutcome> {
        if !self.can_submit() {
            debug!(
                state = ?*self.state.borrow(),
                has_contribution = self.has_selected_contribution(),
                "submit refused, control disabled"
            );
            return Err(SubmitOutcome::Disabled);
        }

        self.submit_attempted = true;
        self.errors = validate_draft(&self.draft);
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "submit aborted locally");
            return Err(SubmitOutcome::Invalid(self.errors.clone()));
        }

        self.state.send_replace(UiState::Submitting);
        info!(
            contributions = ?self.draft.selected_contributions(),
            "submitting signup form"
        );
        Ok(FormPayload::from_draft(&self.draft))
    }

    fn finish_submit(&mut self, result: Result<(), TransportError>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                info!("signup form submitted");
                self.state.send_replace(UiState::Submitted);
                SubmitOutcome::Submitted
            }
            Err(err) => {
                warn!(error = %err, "signup form submission failed");
                let message = self.language.submission_failed().to_string();
                self.state.send_replace(UiState::Failed {
                    message: message.clone(),
                });
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
