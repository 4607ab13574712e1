/// Contact form model and submission
///
/// The form is posted as JSON to a hosted form endpoint together with the
/// site's access key. The endpoint answers `{ "success": bool, "message"?: string }`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_COUNTRY_CODE: &str = "+90";

/// Dial codes offered in the phone field
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("+90", "TR"),
    ("+1", "US"),
    ("+44", "GB"),
    ("+49", "DE"),
    ("+33", "FR"),
    ("+31", "NL"),
    ("+39", "IT"),
    ("+34", "ES"),
    ("+7", "RU"),
    ("+994", "AZ"),
];

/// What the enquiry is about. The UI shows a translated label; the
/// submission always carries the Turkish value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Residential,
    Commercial,
    UrbanRenewal,
    Contracting,
    Other,
}

impl Subject {
    /// Picker order
    pub const ALL: [Subject; 5] = [
        Subject::Residential,
        Subject::Commercial,
        Subject::UrbanRenewal,
        Subject::Contracting,
        Subject::Other,
    ];

    pub fn translation_key(self) -> &'static str {
        match self {
            Subject::Residential => "contact.subjects.residential",
            Subject::Commercial => "contact.subjects.commercial",
            Subject::UrbanRenewal => "contact.subjects.urbanRenewal",
            Subject::Contracting => "contact.subjects.contracting",
            Subject::Other => "contact.subjects.other",
        }
    }

    /// Value sent to the form endpoint, independent of the UI language
    pub fn form_value(self) -> &'static str {
        match self {
            Subject::Residential => "Konut Projesi",
            Subject::Commercial => "Ticari Proje",
            Subject::UrbanRenewal => "Kentsel Dönüşüm",
            Subject::Contracting => "Taahhüt İşleri",
            Subject::Other => "Diğer",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ContactError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Response(String),

    #[error("submission rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ContactError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ContactError::Response(err.to_string())
        } else {
            ContactError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub full_name: String,
    pub country_code: String,
    /// Formatted as `XXX XXX XX XX`
    pub phone: String,
    pub email: String,
    pub subject: Option<Subject>,
    pub message: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            phone: String::new(),
            email: String::new(),
            subject: None,
            message: String::new(),
        }
    }
}

impl ContactForm {
    /// Update the phone field, keeping only digits in display grouping
    pub fn set_phone(&mut self, input: &str) {
        self.phone = format_phone_number(input);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Required fields are filled and the email looks like one
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && !self.phone.is_empty()
            && self.email.contains('@')
            && self.subject.is_some()
            && !self.message.trim().is_empty()
    }
}

/// Keep at most ten digits, grouped as `XXX XXX XX XX`
pub fn format_phone_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).take(10).collect();

    let mut formatted = String::new();
    for (i, digit) in digits.iter().enumerate() {
        if matches!(i, 3 | 6 | 8) {
            formatted.push(' ');
        }
        formatted.push(*digit);
    }
    formatted
}

#[derive(Debug, Serialize)]
struct Submission<'a> {
    access_key: &'a str,
    subject: String,
    from_name: &'a str,
    name: &'a str,
    email: &'a str,
    phone: String,
    message: &'a str,
    konu: &'a str,
}

impl<'a> Submission<'a> {
    fn new(access_key: &'a str, form: &'a ContactForm) -> Self {
        let konu = form.subject.map_or("", Subject::form_value);
        Self {
            access_key,
            subject: format!("Korkmaz EPA İletişim: {}", konu),
            from_name: &form.full_name,
            name: &form.full_name,
            email: &form.email,
            phone: format!("{} {}", form.country_code, form.phone),
            message: &form.message,
            konu,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Post the form. No retry: the caller shows a generic error on failure.
pub async fn submit(
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
    form: ContactForm,
) -> Result<(), ContactError> {
    let payload = Submission::new(&access_key, &form);

    let response: SubmissionResponse = client
        .post(&endpoint)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&payload)
        .send()
        .await?
        .json()
        .await?;

    if response.success {
        tracing::info!("✉️  Contact form delivered");
        Ok(())
    } else {
        let message = response
            .message
            .unwrap_or_else(|| "Form submission failed".to_string());
        Err(ContactError::Rejected(message))
    }
}
