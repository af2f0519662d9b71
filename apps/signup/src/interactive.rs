//! Prompt-driven form filling. Each answer becomes a `FormEvent`; retry stays a user decision.

use std::io::{self, BufRead, Write};

use client_core::{FormController, FormEvent, FormTransport, SubmitOutcome};
use shared::{
    domain::{Contribution, Field},
    messages::Language,
};

use crate::render;

pub async fn run<T: FormTransport>(
    form: &mut FormController<T>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<SubmitOutcome> {
    let language = form.language();
    for field in [Field::FirstName, Field::LastName, Field::Email, Field::Organisation] {
        prompt_text(form, field, input, out)?;
    }
    prompt_contributions(form, input, out)?;
    prompt_consent(form, input, out)?;

    loop {
        if form.contribution_hint().is_some() {
            writeln!(out, "  {}", language.contribution_hint())?;
            prompt_contributions(form, input, out)?;
            if form.contribution_hint().is_some() {
                return Ok(SubmitOutcome::Disabled);
            }
        }

        writeln!(out, "[ {} ]", form.submit_label())?;
        let outcome = render::submit_with_spinner(form, out).await?;
        match &outcome {
            SubmitOutcome::Invalid(errors) => {
                render::field_errors(form, out)?;
                for field in errors.iter().map(|e| e.field()) {
                    match field {
                        Field::Consent => prompt_consent(form, input, out)?,
                        other => prompt_text(form, other, input, out)?,
                    }
                }
            }
            SubmitOutcome::Failed(_) => {
                render::outcome(language, &outcome, out)?;
                if !confirm(language, retry_question(language), input, out)? {
                    return Ok(outcome);
                }
            }
            SubmitOutcome::Submitted => {
                render::outcome(language, &outcome, out)?;
                return Ok(outcome);
            }
            SubmitOutcome::Disabled => return Ok(outcome),
        }
    }
}

fn prompt_text<T: FormTransport>(
    form: &mut FormController<T>,
    field: Field,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let language = form.language();
    let draft = form.draft();
    let current = match field {
        Field::FirstName => draft.first_name.clone(),
        Field::LastName => draft.last_name.clone(),
        Field::Email => draft.email.clone(),
        Field::Organisation => draft.organisation.clone(),
        Field::Consent => return Ok(()),
    };

    if current.is_empty() {
        write!(out, "{}: ", language.field_label(field))?;
    } else {
        write!(out, "{} [{current}]: ", language.field_label(field))?;
    }
    out.flush()?;

    let answer = read_answer(input)?;
    if answer.is_empty() && !current.is_empty() {
        return Ok(());
    }

    let event = match field {
        Field::FirstName => FormEvent::SetFirstName(answer),
        Field::LastName => FormEvent::SetLastName(answer),
        Field::Email => FormEvent::SetEmail(answer),
        _ => FormEvent::SetOrganisation(answer),
    };
    form.apply(event);
    Ok(())
}

fn prompt_contributions<T: FormTransport>(
    form: &mut FormController<T>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let language = form.language();
    for contribution in Contribution::ALL {
        let selected = form.draft().contribution(contribution);
        let question = format!(
            "[{}] {}",
            if selected { "x" } else { " " },
            language.contribution_title(contribution)
        );
        if confirm(language, &question, input, out)? != selected {
            form.apply(FormEvent::ToggleContribution(contribution));
        }
    }
    Ok(())
}

fn prompt_consent<T: FormTransport>(
    form: &mut FormController<T>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let language = form.language();
    writeln!(out, "{}", language.consent_text())?;
    let given = confirm(language, language.field_label(Field::Consent), input, out)?;
    form.apply(FormEvent::SetConsent(given));
    Ok(())
}

fn retry_question(language: Language) -> &'static str {
    match language {
        Language::En => "Try again?",
        Language::De => "Erneut versuchen?",
    }
}

/// Anything but an explicit yes counts as no.
fn confirm(
    language: Language,
    question: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<bool> {
    let choices = match language {
        Language::En => "[y/N]",
        Language::De => "[j/N]",
    };
    write!(out, "{question} {choices} ")?;
    out.flush()?;

    let answer = read_answer(input)?.to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "j" | "ja"))
}

/// Closed input ends the session instead of looping on empty answers.
fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the form was complete",
        ));
    }
    Ok(line.trim().to_string())
}
