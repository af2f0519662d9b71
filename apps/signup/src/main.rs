use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{FormController, FormEvent, HttpFormTransport, SubmitOutcome};
use shared::{domain::Contribution, messages::Language};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod render;

use config::load_settings;

/// Join the Gründungskreis Befähigungsrepublik.
#[derive(Parser, Debug)]
struct Args {
    /// TOML settings file (defaults to ./signup.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Origin of the hosting site; the form is posted to its root path
    #[arg(long)]
    site_url: Option<String>,
    #[arg(long)]
    language: Option<Language>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    organisation: Option<String>,
    /// Stay informed and spread the idea in your network
    #[arg(long)]
    information: bool,
    /// Contribute expertise to the concept
    #[arg(long)]
    expertise: bool,
    /// Interested in supporting financially
    #[arg(long)]
    financial: bool,
    /// Agree to storage and processing of your data for contact purposes
    #[arg(long)]
    consent: bool,
    /// Prompt for missing or invalid fields and offer a retry on failure
    #[arg(long, short)]
    interactive: bool,
}

impl Args {
    fn events(&self) -> Vec<FormEvent> {
        let mut events = Vec::new();
        if let Some(v) = &self.first_name {
            events.push(FormEvent::SetFirstName(v.clone()));
        }
        if let Some(v) = &self.last_name {
            events.push(FormEvent::SetLastName(v.clone()));
        }
        if let Some(v) = &self.email {
            events.push(FormEvent::SetEmail(v.clone()));
        }
        if let Some(v) = &self.organisation {
            events.push(FormEvent::SetOrganisation(v.clone()));
        }
        for (contribution, selected) in [
            (Contribution::Information, self.information),
            (Contribution::Expertise, self.expertise),
            (Contribution::Financial, self.financial),
        ] {
            events.push(FormEvent::SetContribution(contribution, selected));
        }
        events.push(FormEvent::SetConsent(self.consent));
        events
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(site_url) = &args.site_url {
        settings.site_url = site_url.clone();
    }
    if let Some(language) = args.language {
        settings.language = language;
    }

    let transport = HttpFormTransport::new(&settings.site_url, settings.request_timeout())
        .context("failed to prepare form transport")?;
    info!(endpoint = %transport.endpoint(), language = %settings.language, "signup form ready");

    let mut form = FormController::new(transport, settings.language);
    for event in args.events() {
        form.apply(event);
    }

    let mut out = io::stdout();
    let outcome = if args.interactive {
        let stdin = io::stdin();
        interactive::run(&mut form, &mut stdin.lock(), &mut out)
            .await
            .context("interactive session ended")?
    } else {
        let outcome = render::submit_with_spinner(&mut form, &mut out).await?;
        if let SubmitOutcome::Invalid(_) = &outcome {
            render::field_errors(&form, &mut out)?;
        }
        render::outcome(settings.language, &outcome, &mut out)?;
        outcome
    };
    out.flush()?;

    Ok(match outcome {
        SubmitOutcome::Submitted => ExitCode::SUCCESS,
        SubmitOutcome::Failed(_) => ExitCode::from(1),
        SubmitOutcome::Disabled | SubmitOutcome::Invalid(_) => ExitCode::from(2),
    })
}
