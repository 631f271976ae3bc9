mod contact_email;
mod contact_form;
mod contact_message;
mod field_value;
mod sanitize;
mod submission;

pub use contact_email::ContactEmail;
pub use contact_form::{ContactForm, ValidationError};
pub use contact_message::ContactMessage;
pub use field_value::FieldValue;
pub use sanitize::sanitize;
pub use submission::{PHONE_NOT_PROVIDED, Phone, Submission, ValidSubmission};
