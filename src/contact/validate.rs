//! Contact form schema.
//!
//! Every field is checked on each attempt; failures are collected rather than
//! short-circuited so a view can flag all invalid inputs at once.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::form::{ContactForm, Field};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

pub const NAME_TOO_SHORT: &str = "Name is too short";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

// The regex crate has no look-around, so the leading-dot and double-dot rules
// are checked separately in `is_valid_email`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Field-to-message mapping. Empty means the form may be sent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

pub fn validate(form: &ContactForm) -> ValidationErrors {
    let mut errors = BTreeMap::new();

    if form.name.chars().count() < MIN_NAME_CHARS {
        errors.insert(Field::Name, NAME_TOO_SHORT);
    }
    if !is_valid_email(&form.email) {
        errors.insert(Field::Email, INVALID_EMAIL);
    }
    if form.message.chars().count() < MIN_MESSAGE_CHARS {
        errors.insert(Field::Message, MESSAGE_TOO_SHORT);
    }

    ValidationErrors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactForm {
        ContactForm::new("Jane Doe", "jane@x.com", "Hello there, this is a test.")
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn boundary_lengths_pass() {
        let form = ContactForm::new("Jo", "jo@example.io", "0123456789");
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn single_violation_yields_single_entry() {
        let mut form = valid();
        form.name = "A".into();
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some(NAME_TOO_SHORT));

        let mut form = valid();
        form.email = "jane.x.com".into();
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some(INVALID_EMAIL));

        let mut form = valid();
        form.message = "too short".into();
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Message), Some(MESSAGE_TOO_SHORT));
    }

    #[test]
    fn all_failures_reported_together() {
        let errors = validate(&ContactForm::new("J", "bad", "hi"));
        let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Message]);
    }

    #[test]
    fn validation_is_idempotent() {
        let form = ContactForm::new("J", "jane@x.com", "hi");
        assert_eq!(validate(&form), validate(&form));
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // Two characters, four bytes.
        let form = ContactForm::new("Jé", "jane@x.com", "ééééééééé");
        let errors = validate(&form);
        assert_eq!(errors.get(Field::Name), None);
        assert_eq!(errors.get(Field::Message), Some(MESSAGE_TOO_SHORT));
    }

    #[test]
    fn email_grammar() {
        for ok in [
            "jane@x.com",
            "first.last@sub.example.org",
            "o'brien+tag@mail.co",
            "UPPER@EXAMPLE.COM",
        ] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
        for bad in [
            "",
            "bad",
            "@x.com",
            ".jane@x.com",
            "jane.@x.com",
            "ja..ne@x.com",
            "jane@x",
            "jane@x.c",
            "jane@-x.com",
            "jane@x..com",
            "jane doe@x.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }
}
