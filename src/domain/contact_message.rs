use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use super::Submission;

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// The notification sent to the site operator for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ContactMessage {
    /// Builds both renditions from an already sanitized submission.
    ///
    /// Field values are embedded verbatim; the HTML body performs no escaping
    /// of its own.
    pub fn compose<Tz>(submission: &Submission, sent_at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let sent_at = sent_at.format(TIMESTAMP_FORMAT).to_string();

        Self {
            subject: format!("פניה חדשה מאתר - הודעה מ{}", submission.full_name),
            text: text_body(submission, &sent_at),
            html: html_body(submission, &sent_at),
        }
    }
}

fn text_body(submission: &Submission, sent_at: &str) -> String {
    format!(
        "פניה חדשה מהאתר דרך לחיים

שם מלא: {full_name}
אימייל: {email}
טלפון: {phone}

הודעה:
{message}

---
נשלח בתאריך: {sent_at}
",
        full_name = submission.full_name,
        email = submission.email,
        phone = submission.phone.as_ref(),
        message = submission.message,
    )
}

fn html_body(submission: &Submission, sent_at: &str) -> String {
    format!(
        "<h2>פניה חדשה מהאתר דרך לחיים</h2>
<p><strong>שם מלא:</strong> {full_name}</p>
<p><strong>אימייל:</strong> {email}</p>
<p><strong>טלפון:</strong> {phone}</p>
<h3>הודעה:</h3>
<p>{message}</p>
<hr>
<p><small>נשלח בתאריך: {sent_at}</small></p>
",
        full_name = submission.full_name,
        email = submission.email,
        phone = submission.phone.as_ref(),
        message = submission.message.replace('\n', "<br>"),
    )
}
