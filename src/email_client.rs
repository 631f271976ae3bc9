use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::ContactEmail;

/// Hands composed messages to the transactional email API.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    sender: ContactEmail,
    auth_token: SecretString,
}

#[derive(Serialize)]
struct EmailUnit<'a> {
    email: &'a str,
}

impl<'a> EmailUnit<'a> {
    fn new(email: &'a str) -> Self {
        Self { email }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: EmailUnit<'a>,
    to: Vec<EmailUnit<'a>>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        sender: ContactEmail,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let endpoint = Url::parse(base_url)
            .and_then(|url| url.join("v1/email"))
            .with_context(|| format!("Invalid email API base url: {base_url}"))?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the email API http client.")?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            auth_token,
        })
    }

    /// A single delivery attempt. Transport errors, timeouts and non-2xx
    /// statuses are all reported as failures.
    pub async fn send_email(
        &self,
        recipient: &ContactEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let body = SendEmailRequest {
            from: EmailUnit::new(self.sender.as_ref()),
            to: vec![EmailUnit::new(recipient.as_ref())],
            subject,
            html: html_content,
            text: text_content,
        };

        self.http_client
            .post(self.endpoint.clone())
            .header(
                "Authorization",
                format!("Bearer {}", self.auth_token.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
