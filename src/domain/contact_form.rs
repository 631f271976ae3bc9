use super::{ContactEmail, FieldValue, ValidSubmission};

/// The raw body of a contact form submission, as received.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub full_name: Option<FieldValue>,
    #[serde(default)]
    pub email: Option<FieldValue>,
    #[serde(default)]
    pub phone: Option<FieldValue>,
    #[serde(default)]
    pub message: Option<FieldValue>,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("One or more required fields are missing.")]
    MissingFields,
    #[error("The email address is not valid.")]
    InvalidEmail,
}

impl ContactForm {
    /// Checks field presence first, then the email syntax.
    pub fn validate(self) -> Result<ValidSubmission, ValidationError> {
        let (Some(full_name), Some(email), Some(message)) = (
            required(self.full_name),
            required(self.email),
            required(self.message),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let email = ContactEmail::parse(email).map_err(|_| ValidationError::InvalidEmail)?;

        Ok(ValidSubmission {
            full_name,
            email,
            phone: self.phone,
            message,
        })
    }
}

fn required(field: Option<FieldValue>) -> Option<String> {
    match field {
        Some(FieldValue::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
