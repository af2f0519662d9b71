use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::{
    domain::SubmissionDraft,
    messages::Language,
    protocol::FormPayload,
    schema::FormSchema,
    validation::validate_draft,
};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the hidden mirror form the hosting platform scans at deploy time
    Schema,
    /// Validate a draft and print the urlencoded body it would be posted as
    Encode {
        #[arg(long, default_value = "en")]
        language: Language,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        organisation: String,
        #[arg(long)]
        information: bool,
        #[arg(long)]
        expertise: bool,
        #[arg(long)]
        financial: bool,
        #[arg(long)]
        consent: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut out = io::stdout();

    match cli.command {
        Command::Schema => {
            write!(out, "{}", FormSchema::signup().render_mirror_form())?;
        }
        Command::Encode {
            language,
            first_name,
            last_name,
            email,
            organisation,
            information,
            expertise,
            financial,
            consent,
        } => {
            let draft = SubmissionDraft {
                first_name,
                last_name,
                email,
                organisation,
                contribution_information: information,
                contribution_expertise: expertise,
                contribution_financial: financial,
                consent_given: consent,
            };

            let errors = validate_draft(&draft);
            if !errors.is_empty() {
                for error in errors.iter() {
                    eprintln!("{}", language.field_error(error));
                }
                bail!("draft is not submittable: {errors}");
            }
            if !draft.has_selected_contribution() {
                eprintln!("{}", language.contribution_hint());
                bail!("draft is not submittable: no contribution selected");
            }

            writeln!(out, "{}", FormPayload::from_draft(&draft).encode())?;
        }
    }

    Ok(())
}
