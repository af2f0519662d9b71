use url::form_urlencoded;

use crate::domain::{Contribution, SubmissionDraft};

pub const FORM_NAME: &str = "gruendungskreis";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const KEY_FORM_NAME: &str = "form-name";
pub const KEY_HONEYPOT: &str = "bot-field";
pub const KEY_FIRST_NAME: &str = "vorname";
pub const KEY_LAST_NAME: &str = "nachname";
pub const KEY_EMAIL: &str = "email";
pub const KEY_ORGANISATION: &str = "organisation";
pub const KEY_INFORMATION: &str = "beitrag_information";
pub const KEY_EXPERTISE: &str = "beitrag_expertise";
pub const KEY_FINANCIAL: &str = "beitrag_finanziell";

pub const YES: &str = "Ja";
pub const NO: &str = "Nein";

pub fn contribution_key(contribution: Contribution) -> &'static str {
    match contribution {
        Contribution::Information => KEY_INFORMATION,
        Contribution::Expertise => KEY_EXPERTISE,
        Contribution::Financial => KEY_FINANCIAL,
    }
}

pub fn flag_value(selected: bool) -> &'static str {
    if selected {
        YES
    } else {
        NO
    }
}

/// Body of the POST to the ingestion collaborator, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayload {
    pairs: Vec<(&'static str, String)>,
}

impl FormPayload {
    pub fn from_draft(draft: &SubmissionDraft) -> Self {
        let mut pairs = vec![
            (KEY_FORM_NAME, FORM_NAME.to_string()),
            // honeypot: humans never see it, so it must always go out empty
            (KEY_HONEYPOT, String::new()),
            (KEY_FIRST_NAME, draft.first_name.clone()),
            (KEY_LAST_NAME, draft.last_name.clone()),
            (KEY_EMAIL, draft.email.clone()),
            (KEY_ORGANISATION, draft.organisation.clone()),
        ];
        for contribution in Contribution::ALL {
            pairs.push((
                contribution_key(contribution),
                flag_value(draft.contribution(contribution)).to_string(),
            ));
        }
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

/// Parses a urlencoded body back into owned pairs, keeping order and duplicates.
pub fn decode_body(body: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
