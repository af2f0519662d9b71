//! The field schema the hosting platform scans for at deploy time.
//!
//! The ingestion collaborator only accepts POSTs whose `form-name` matches a form it found
//! in the static markup, so the schema is declared here once and rendered as a hidden form.

use crate::protocol::{
    FORM_NAME, KEY_EMAIL, KEY_EXPERTISE, KEY_FINANCIAL, KEY_FIRST_NAME, KEY_HONEYPOT,
    KEY_INFORMATION, KEY_LAST_NAME, KEY_ORGANISATION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
}

impl InputKind {
    fn as_html(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: InputKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub form_name: &'static str,
    pub honeypot: &'static str,
    pub fields: Vec<SchemaField>,
}

impl FormSchema {
    pub fn signup() -> Self {
        let text = |name| SchemaField {
            name,
            kind: InputKind::Text,
        };
        Self {
            form_name: FORM_NAME,
            honeypot: KEY_HONEYPOT,
            fields: vec![
                text(KEY_FIRST_NAME),
                text(KEY_LAST_NAME),
                SchemaField {
                    name: KEY_EMAIL,
                    kind: InputKind::Email,
                },
                text(KEY_ORGANISATION),
                text(KEY_INFORMATION),
                text(KEY_EXPERTISE),
                text(KEY_FINANCIAL),
            ],
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Hidden mirror form for the deploy-time scanner. Never shown, never submitted.
    pub fn render_mirror_form(&self) -> String {
        let mut html = format!(
            "<form name=\"{}\" netlify-honeypot=\"{}\" data-netlify=\"true\" hidden>\n",
            self.form_name, self.honeypot
        );
        for field in &self.fields {
            html.push_str(&format!(
                "  <input type=\"{}\" name=\"{}\" />\n",
                field.kind.as_html(),
                field.name
            ));
        }
        html.push_str("</form>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::SubmissionDraft, protocol::FormPayload};

    #[test]
    fn schema_covers_every_submitted_data_field() {
        let schema = FormSchema::signup();
        let payload = FormPayload::from_draft(&SubmissionDraft::default());
        let data_keys: Vec<&str> = payload
            .pairs()
            .map(|(k, _)| k)
            .filter(|k| *k != "form-name" && *k != schema.honeypot)
            .collect();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), data_keys);
    }

    #[test]
    fn renders_hidden_mirror_form() {
        let html = FormSchema::signup().render_mirror_form();
        assert!(html.starts_with(
            "<form name=\"gruendungskreis\" netlify-honeypot=\"bot-field\" data-netlify=\"true\" hidden>"
        ));
        assert!(html.contains("<input type=\"email\" name=\"email\" />"));
        assert!(html.contains("<input type=\"text\" name=\"beitrag_finanziell\" />"));
        assert!(html.trim_end().ends_with("</form>"));
        assert_eq!(html.matches("<input").count(), 7);
    }
}
