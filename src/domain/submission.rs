use super::{ContactEmail, FieldValue, sanitize};

/// Shown in place of a phone number the sender did not give.
pub const PHONE_NOT_PROVIDED: &str = "לא סופק";

/// A submission whose required fields are present and whose email is
/// syntactically valid. Values are still raw.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub full_name: String,
    pub email: ContactEmail,
    pub phone: Option<FieldValue>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phone {
    Provided(String),
    NotProvided,
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        match self {
            Phone::Provided(number) => number,
            Phone::NotProvided => PHONE_NOT_PROVIDED,
        }
    }
}

/// A submission ready to be composed into a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub full_name: String,
    pub email: String,
    pub phone: Phone,
    pub message: String,
}

impl ValidSubmission {
    pub fn sanitize(self) -> Submission {
        let phone = match self.phone {
            Some(value) => sanitize(value.as_text()),
            None => String::new(),
        };

        Submission {
            full_name: sanitize(Some(&self.full_name)),
            email: sanitize(Some(self.email.as_ref())),
            phone: if phone.is_empty() {
                Phone::NotProvided
            } else {
                Phone::Provided(phone)
            },
            message: sanitize(Some(&self.message)),
        }
    }
}
