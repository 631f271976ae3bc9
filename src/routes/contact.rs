use std::future::{Future, ready};
use std::pin::Pin;

use actix_web::{Either, FromRequest, HttpMessage, HttpRequest, HttpResponse, dev::Payload, web};
use chrono::Local;

use crate::{
    domain::{ContactForm, ContactMessage, Submission, ValidationError},
    email_client::EmailClient,
    startup::ContactRecipient,
};

use super::helpers::{error_chain_fmt, redirect_to, redirect_with_error};

pub const MISSING_FIELDS_MESSAGE: &str = "אנא מלאו את כל השדות הנדרשים";
pub const INVALID_EMAIL_MESSAGE: &str = "אנא הזינו כתובת אימייל תקינה";
pub const DISPATCH_FAILURE_MESSAGE: &str = "שגיאה בשליחת המייל. אנא נסו שוב מאוחר יותר.";

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to send the contact notification email.")]
    DispatchError(#[source] reqwest::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ContactError {
    /// The text shown to the submitter. Dispatch details never appear here.
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::ValidationError(ValidationError::MissingFields) => MISSING_FIELDS_MESSAGE,
            ContactError::ValidationError(ValidationError::InvalidEmail) => INVALID_EMAIL_MESSAGE,
            ContactError::DispatchError(_) => DISPATCH_FAILURE_MESSAGE,
        }
    }
}

/// The submitted form, decoded from a JSON or url-encoded body.
///
/// Any other content type, or none at all, carries no fields and yields an
/// empty form.
pub struct ContactBody(pub ContactForm);

impl FromRequest for ContactBody {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if !carries_form_fields(req) {
            return Box::pin(ready(Ok(ContactBody(ContactForm::default()))));
        }

        let body = Either::<web::Json<ContactForm>, web::Form<ContactForm>>::from_request(
            req, payload,
        );
        Box::pin(async move {
            let form = match body.await? {
                Either::Left(json) => json.into_inner(),
                Either::Right(form) => form.into_inner(),
            };
            Ok(ContactBody(form))
        })
    }
}

fn carries_form_fields(req: &HttpRequest) -> bool {
    matches!(
        req.content_type().to_ascii_lowercase().as_str(),
        "application/json" | "application/x-www-form-urlencoded"
    )
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip_all,
    fields(sender_email = tracing::field::Empty)
)]
pub async fn submit_contact(
    body: ContactBody,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<ContactRecipient>,
) -> HttpResponse {
    match process_submission(body.0, &email_client, &recipient).await {
        Ok(submission) => {
            tracing::info!("Email sent successfully from {}", submission.email);
            redirect_to("/?success=true")
        }
        Err(e) => {
            if matches!(e, ContactError::DispatchError(_)) {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to send email"
                );
            }
            redirect_with_error(e.user_message())
        }
    }
}

/// Validates, sanitizes, composes and dispatches one submission.
///
/// Returns once the email API has answered; nothing is retried.
pub async fn process_submission(
    form: ContactForm,
    email_client: &EmailClient,
    recipient: &ContactRecipient,
) -> Result<Submission, ContactError> {
    let submission = form.validate()?;
    tracing::Span::current().record("sender_email", tracing::field::display(&submission.email));

    let submission = submission.sanitize();
    let message = ContactMessage::compose(&submission, &Local::now());

    send_notification(email_client, recipient, &message)
        .await
        .map_err(ContactError::DispatchError)?;

    Ok(submission)
}

#[tracing::instrument(name = "Sending the contact notification", skip_all)]
async fn send_notification(
    email_client: &EmailClient,
    recipient: &ContactRecipient,
    message: &ContactMessage,
) -> Result<(), reqwest::Error> {
    email_client
        .send_email(&recipient.0, &message.subject, &message.html, &message.text)
        .await
}
