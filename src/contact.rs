use crate::content::CONTACT_RECIPIENT;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Characters `encodeURIComponent` leaves alone, besides alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// HTML "valid e-mail address" grammar, as enforced by <input type="email">
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    pub fn is_multiline(self) -> bool {
        self == FormField::Message
    }

    /// Rows the input box takes on screen.
    pub fn rows(self) -> usize {
        if self.is_multiline() { 4 } else { 1 }
    }

    pub fn next(self) -> Option<FormField> {
        let idx = Self::ALL.iter().position(|f| *f == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn prev(self) -> Option<FormField> {
        let idx = Self::ALL.iter().position(|f| *f == self)?;
        idx.checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill out the {} field.", .0.label())]
    Missing(FormField),
    #[error("Please enter a valid email address: '{0}' is not one.")]
    InvalidEmail(String),
}

impl FormError {
    /// The field that should receive focus.
    pub fn field(&self) -> FormField {
        match self {
            FormError::Missing(field) => *field,
            FormError::InvalidEmail(_) => FormField::Email,
        }
    }
}

/// Snapshot of the contact form. Every edit produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::Name => next.name = value,
            FormField::Email => next.email = value,
            FormField::Subject => next.subject = value,
            FormField::Message => next.message = value,
        }
        next
    }

    pub fn with_char(&self, field: FormField, ch: char) -> Self {
        // single-line inputs drop line breaks like a browser does
        if ch == '\n' && !field.is_multiline() {
            return self.clone();
        }
        let mut value = self.get(field).to_string();
        value.push(ch);
        self.with_field(field, value)
    }

    pub fn without_last_char(&self, field: FormField) -> Self {
        let mut value = self.get(field).to_string();
        value.pop();
        self.with_field(field, value)
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Email value after the browser's sanitization for `type="email"`.
    fn sanitized_email(&self) -> String {
        self.email
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// The checks a browser runs before letting the form submit.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in FormField::ALL {
            let missing = match field {
                FormField::Email => self.sanitized_email().is_empty(),
                _ => self.get(field).is_empty(),
            };
            if missing {
                return Err(FormError::Missing(field));
            }
        }

        let email = self.sanitized_email();
        if !email_regex().is_match(&email) {
            return Err(FormError::InvalidEmail(email));
        }
        Ok(())
    }

    pub fn mailto(&self) -> MailtoLink {
        MailtoLink {
            recipient: CONTACT_RECIPIENT.to_string(),
            subject: self.subject.clone(),
            body: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                self.name,
                self.sanitized_email(),
                self.message
            ),
        }
    }

    /// Validate, build the outbound link, and hand back the cleared form.
    pub fn submit(&self) -> Result<Submission, FormError> {
        self.validate()?;
        Ok(Submission {
            link: self.mailto(),
            cleared: ContactForm::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub link: MailtoLink,
    pub cleared: ContactForm,
}

/// A `mailto:` composition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailtoLink {
    pub fn uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_uri_component(&self.subject),
            encode_uri_component(&self.body)
        )
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn filled() -> ContactForm {
        ContactForm::new()
            .with_field(FormField::Name, "A")
            .with_field(FormField::Email, "b@c.com")
            .with_field(FormField::Subject, "S")
            .with_field(FormField::Message, "M")
    }

    fn query_param<'a>(uri: &'a str, key: &str) -> &'a str {
        let (_, query) = uri.split_once('?').unwrap();
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(&format!("{key}=")))
            .unwrap()
    }

    #[test]
    fn test_submit_builds_mailto_and_clears() {
        let form = filled();
        let submission = form.submit().unwrap();
        let uri = submission.link.uri();

        assert!(uri.starts_with("mailto:suvabiswas246@gmail.com?"));
        assert_eq!(query_param(&uri, "subject"), "S");

        let body = percent_decode_str(query_param(&uri, "body"))
            .decode_utf8()
            .unwrap();
        assert!(body.contains("Name: A"));
        assert!(body.contains("Email: b@c.com"));
        assert!(body.contains("M"));

        for field in FormField::ALL {
            assert_eq!(submission.cleared.get(field), "");
        }
        // the earlier snapshot is untouched
        assert_eq!(form.get(FormField::Name), "A");
    }

    #[test]
    fn test_body_template() {
        assert_eq!(
            filled().mailto().body,
            "Name: A\nEmail: b@c.com\n\nMessage:\nM"
        );
    }

    #[test]
    fn test_encode_uri_component_matches_js() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("?#/+"), "%3F%23%2F%2B");
    }

    #[test]
    fn test_required_fields() {
        let form = filled().with_field(FormField::Subject, "");
        assert_eq!(form.validate(), Err(FormError::Missing(FormField::Subject)));
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please fill out the Subject field."
        );

        let form = ContactForm::new();
        assert_eq!(form.submit().unwrap_err().field(), FormField::Name);
    }

    #[test]
    fn test_email_check() {
        let form = filled().with_field(FormField::Email, "not-an-email");
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidEmail("not-an-email".to_string()))
        );

        let form = filled().with_field(FormField::Email, "  someone@example.org ");
        assert!(form.validate().is_ok());
        assert!(form.mailto().body.contains("Email: someone@example.org\n"));

        let form = filled().with_field(FormField::Email, "   ");
        assert_eq!(form.validate(), Err(FormError::Missing(FormField::Email)));
    }

    #[test]
    fn test_keystroke_snapshots() {
        let form = ContactForm::new()
            .with_char(FormField::Subject, 'h')
            .with_char(FormField::Subject, 'i')
            .with_char(FormField::Subject, '\n');
        assert_eq!(form.get(FormField::Subject), "hi");

        let form = form.with_char(FormField::Message, 'x').with_char(FormField::Message, '\n');
        assert_eq!(form.get(FormField::Message), "x\n");

        let form = form.without_last_char(FormField::Subject);
        assert_eq!(form.get(FormField::Subject), "h");
        assert!(!form.is_empty());
    }

    #[test]
    fn test_field_order() {
        assert_eq!(FormField::Name.next(), Some(FormField::Email));
        assert_eq!(FormField::Message.next(), None);
        assert_eq!(FormField::Name.prev(), None);
        assert_eq!(FormField::Message.prev(), Some(FormField::Subject));
    }
}
