//! Terminal rendering for the form states.

use std::{
    io::{self, Write},
    time::Duration,
};

use client_core::{FormController, FormTransport, SubmitOutcome, UiState};
use shared::messages::Language;
use tokio::time;

const SPINNER_TICK: Duration = Duration::from_millis(300);

/// Submits while a progress line is drawn to `out`, so the terminal stays live during the
/// request. Nothing is drawn when the submit never leaves the form.
pub async fn submit_with_spinner<T: FormTransport>(
    form: &mut FormController<T>,
    out: &mut impl Write,
) -> io::Result<SubmitOutcome> {
    let mut states = form.subscribe();
    let label = form.language().submitting_label();
    let submit = form.submit();
    tokio::pin!(submit);

    let mut ticker = time::interval(SPINNER_TICK);
    let mut drawing = false;
    loop {
        tokio::select! {
            outcome = &mut submit => {
                if drawing {
                    writeln!(out)?;
                }
                return Ok(outcome);
            }
            Ok(()) = states.changed(), if !drawing => {
                if *states.borrow_and_update() == UiState::Submitting {
                    write!(out, "{label}")?;
                    out.flush()?;
                    ticker.reset();
                    drawing = true;
                }
            }
            _ = ticker.tick(), if drawing => {
                write!(out, ".")?;
                out.flush()?;
            }
        }
    }
}

pub fn field_errors<T: FormTransport>(
    form: &FormController<T>,
    out: &mut impl Write,
) -> io::Result<()> {
    let language = form.language();
    for error in form.errors().iter() {
        writeln!(
            out,
            "  ✗ {}: {}",
            language.field_label(error.field()).trim_end_matches(" *"),
            language.field_error(error)
        )?;
    }
    Ok(())
}

pub fn outcome(
    language: Language,
    outcome: &SubmitOutcome,
    out: &mut impl Write,
) -> io::Result<()> {
    match outcome {
        SubmitOutcome::Submitted => {
            let [title, line, follow_up] = language.confirmation();
            writeln!(out)?;
            writeln!(out, "  ✓ {title}")?;
            writeln!(out, "    {line}")?;
            writeln!(out, "    {follow_up}")?;
        }
        SubmitOutcome::Failed(message) => writeln!(out, "  ! {message}")?,
        SubmitOutcome::Disabled => writeln!(out, "  {}", language.contribution_hint())?,
        SubmitOutcome::Invalid(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use client_core::TransportError;
    use shared::{domain::SubmissionDraft, protocol::FormPayload};

    use super::*;

    struct SlowTransport(Duration);

    #[async_trait]
    impl FormTransport for SlowTransport {
        async fn submit(&self, _payload: &FormPayload) -> Result<(), TransportError> {
            time::sleep(self.0).await;
            Ok(())
        }
    }

    fn ready_draft() -> SubmissionDraft {
        SubmissionDraft {
            first_name: "Max".into(),
            last_name: "Mustermann".into(),
            email: "max@example.de".into(),
            contribution_expertise: true,
            consent_given: true,
            ..SubmissionDraft::default()
        }
    }

    #[tokio::test]
    async fn spinner_draws_into_the_given_writer() {
        let mut form = FormController::new(SlowTransport(Duration::from_millis(100)), Language::En)
            .with_draft(ready_draft());
        let mut out = Vec::new();

        let outcome = submit_with_spinner(&mut form, &mut out).await.expect("submit");

        assert_eq!(outcome, SubmitOutcome::Submitted);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("SENDING..."), "{text:?}");
        assert!(text.ends_with('\n'), "{text:?}");
    }

    #[tokio::test]
    async fn refused_submit_draws_nothing() {
        let mut form = FormController::new(SlowTransport(Duration::ZERO), Language::En);
        let mut out = Vec::new();

        let outcome = submit_with_spinner(&mut form, &mut out).await.expect("submit");

        assert_eq!(outcome, SubmitOutcome::Disabled);
        assert!(out.is_empty());
    }

    #[test]
    fn confirmation_view_replaces_form() {
        let mut out = Vec::new();
        outcome(Language::De, &SubmitOutcome::Submitted, &mut out).expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("VIELEN DANK!"));
        assert!(text.contains("Sie sind dabei."));
    }

    #[test]
    fn disabled_submit_shows_hint_only() {
        let mut out = Vec::new();
        outcome(Language::En, &SubmitOutcome::Disabled, &mut out).expect("render");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "  Please select at least one option.\n"
        );
    }
}
