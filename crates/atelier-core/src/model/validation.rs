// ── Client-side validation ──
//
// Records are checked before any request is sent. Failures are collected
// per field so an editor can show every message at once.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::{ApplicationSubmission, ApplicationType, EnquirySubmission};

/// Per-field validation messages, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the backend's `{"field": ["message", ...]}` error body,
    /// keeping the first message per field.
    pub fn from_server(fields: &IndexMap<String, Vec<String>>) -> Self {
        Self(
            fields
                .iter()
                .filter_map(|(field, messages)| {
                    messages.first().map(|m| (field.clone(), m.clone()))
                })
                .collect(),
        )
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_insert_with(|| message.into());
    }

    /// Record `"<field> is required"` when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", humanize(field)));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Loose email shape check: `local@domain.tld` with no whitespace and a
/// single `@`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub(crate) fn check_email(errors: &mut ValidationErrors, field: &str, email: &str) {
    if email.trim().is_empty() {
        errors.require(field, email);
    } else if !is_valid_email(email.trim()) {
        errors.add(field, "Please enter a valid email address");
    }
}

/// Validate the public contact form.
pub fn validate_enquiry(enquiry: &EnquirySubmission) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("name", &enquiry.name);
    check_email(&mut errors, "email", &enquiry.email);
    errors.require("phone", &enquiry.phone);
    errors.require("service", &enquiry.service);
    errors.require("message", &enquiry.message);
    errors.into_result()
}

/// Validate a public job application. Referrals must also name the friend
/// being referred.
pub fn validate_application(app: &ApplicationSubmission) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if app.job.is_new() {
        errors.add("job", "Select a position");
    }
    errors.require("first_name", &app.first_name);
    errors.require("last_name", &app.last_name);
    check_email(&mut errors, "email", &app.email);
    errors.require("phone", &app.phone);

    if app.application_type == ApplicationType::Referral {
        let blank = String::new();
        errors.require(
            "friend_first_name",
            app.friend_first_name.as_ref().unwrap_or(&blank),
        );
        errors.require(
            "friend_last_name",
            app.friend_last_name.as_ref().unwrap_or(&blank),
        );
        check_email(
            &mut errors,
            "friend_email",
            app.friend_email.as_ref().unwrap_or(&blank),
        );
        errors.require("friend_phone", app.friend_phone.as_ref().unwrap_or(&blank));
    }
    errors.into_result()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::EntityId;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("a.b@sub.example.co"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("john example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@@example.com"));
        assert!(!is_valid_email("john@example."));
    }

    #[test]
    fn require_uses_readable_field_names() {
        let mut errors = ValidationErrors::new();
        errors.require("first_name", "   ");
        assert_eq!(errors.get("first_name"), Some("First name is required"));
    }

    #[test]
    fn enquiry_collects_every_missing_field() {
        let errors = validate_enquiry(&EnquirySubmission {
            email: "not-an-email".into(),
            ..EnquirySubmission::default()
        })
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["name", "email", "phone", "service", "message"]);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn referral_requires_friend_details() {
        let base = ApplicationSubmission {
            job: EntityId::new(3),
            application_type: ApplicationType::Interested,
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: "ana@example.com".into(),
            phone: "555".into(),
            ..ApplicationSubmission::default()
        };
        assert!(validate_application(&base).is_ok());

        let referral = ApplicationSubmission {
            application_type: ApplicationType::Referral,
            friend_first_name: Some("Bo".into()),
            ..base
        };
        let errors = validate_application(&referral).unwrap_err();
        assert!(errors.get("friend_first_name").is_none());
        assert!(errors.get("friend_last_name").is_some());
        assert!(errors.get("friend_email").is_some());
        assert!(errors.get("friend_phone").is_some());
    }

    #[test]
    fn server_errors_keep_first_message() {
        let mut fields = IndexMap::new();
        fields.insert("email".to_owned(), vec!["taken".to_owned(), "other".to_owned()]);
        let errors = ValidationErrors::from_server(&fields);
        assert_eq!(errors.to_string(), "taken");
    }
}
