use contact_form::{
    domain::PHONE_NOT_PROVIDED,
    routes::{DISPATCH_FAILURE_MESSAGE, INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE},
};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, method, path},
};

use crate::helpers::{assert_is_redirect_to, error_location, spawn_app};

fn valid_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fullName", "Dana Levi"),
        ("email", "dana@example.com"),
        ("phone", ""),
        ("message", "Hello\nWorld"),
    ]
}

fn timestamp_line(body: &str) -> &str {
    let start = body.find("נשלח בתאריך:").expect("No timestamp in body.");
    let rest = &body[start..];
    let end = rest.find(['\n', '<']).unwrap_or(rest.len());
    &rest[..end]
}

#[tokio::test]
async fn valid_submission_redirects_with_success_flag() {
    let app = spawn_app().await;

    Mock::given(path("/v1/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_form()).await;

    assert_is_redirect_to(&response, "/?success=true");
}

#[tokio::test]
async fn valid_submission_notifies_the_operator() {
    let app = spawn_app().await;

    Mock::given(path("/v1/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_contact(&valid_form()).await;

    let email = app.sent_email().await;
    let html = email["html"].as_str().unwrap();
    let text = email["text"].as_str().unwrap();

    assert_eq!(email["to"][0]["email"], app.recipient.as_str());
    assert_eq!(email["subject"], "פניה חדשה מאתר - הודעה מDana Levi");
    assert!(html.contains("Hello<br>World"));
    assert!(text.contains("Hello\nWorld"));
    assert!(text.contains("dana@example.com"));
    assert_eq!(timestamp_line(text), timestamp_line(html));
}

#[tokio::test]
async fn missing_phone_is_shown_as_not_provided() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = [
        ("fullName", "Dana Levi"),
        ("email", "dana@example.com"),
        ("message", "Hello"),
    ];
    app.post_contact(&body).await;

    let email = app.sent_email().await;
    let html = email["html"].as_str().unwrap();
    let text = email["text"].as_str().unwrap();

    assert!(text.contains(&format!("טלפון: {PHONE_NOT_PROVIDED}")));
    assert!(html.contains(&format!("<strong>טלפון:</strong> {PHONE_NOT_PROVIDED}")));
    assert!(!text.contains("undefined"));
    assert!(!html.contains("undefined"));
}

#[tokio::test]
async fn json_submissions_are_accepted() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "fullName": "Dana Levi",
        "email": "dana@example.com",
        "phone": 5551234,
        "message": "Hello"
    });
    let response = app.post_contact_json(&body).await;

    assert_is_redirect_to(&response, "/?success=true");
    let email = app.sent_email().await;
    assert!(
        email["text"]
            .as_str()
            .unwrap()
            .contains(&format!("טלפון: {PHONE_NOT_PROVIDED}"))
    );
}

#[tokio::test]
async fn incomplete_submissions_are_rejected_without_sending_email() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        ("email=dana%40example.com&message=Hello", "missing the full name"),
        ("fullName=Dana&message=Hello", "missing the email"),
        ("fullName=Dana&email=dana%40example.com", "missing the message"),
        (
            "fullName=%20%20&email=dana%40example.com&message=Hello",
            "a blank full name",
        ),
        (
            "fullName=Dana&email=dana%40example.com&message=",
            "an empty message",
        ),
        ("", "an empty body"),
    ];

    for (body, description) in test_cases {
        let response = app
            .post_contact_raw(body, "application/x-www-form-urlencoded")
            .await;

        assert_eq!(
            response.headers().get("Location").unwrap(),
            error_location(MISSING_FIELDS_MESSAGE).as_str(),
            "The submission was not rejected as incomplete for {description}."
        );
        assert_eq!(response.status().as_u16(), 302);
    }
}

#[tokio::test]
async fn malformed_email_is_rejected_without_sending_email() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for email in ["not-an-email", "dana@localhost", "dana levi@example.com", "@example.com"] {
        let body = [("fullName", "Dana"), ("email", email), ("message", "Hello")];

        let response = app.post_contact(&body).await;

        assert_is_redirect_to(&response, &error_location(INVALID_EMAIL_MESSAGE));
    }
}

#[tokio::test]
async fn dispatch_failure_redirects_with_generic_message() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("mailbox quota exceeded"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_form()).await;

    assert_is_redirect_to(&response, &error_location(DISPATCH_FAILURE_MESSAGE));
    let location = response.headers().get("Location").unwrap().to_str().unwrap();
    assert!(!location.contains("500"));
    assert!(!location.contains("quota"));
}

#[tokio::test]
async fn submitted_markup_is_stripped_from_the_notification() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = [
        ("fullName", "  <b>Dana</b>  "),
        ("email", "dana@example.com"),
        ("message", "<script>x</script>"),
    ];
    app.post_contact(&body).await;

    let email = app.sent_email().await;
    let html = email["html"].as_str().unwrap();

    assert_eq!(email["subject"], "פניה חדשה מאתר - הודעה מbDana/b");
    assert!(html.contains("<p>scriptx/script</p>"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn concurrent_submissions_are_dispatched_independently() {
    let app = spawn_app().await;

    Mock::given(path("/v1/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let first = [
        ("fullName", "Dana Levi"),
        ("email", "dana@example.com"),
        ("message", "First"),
    ];
    let second = [
        ("fullName", "Noa Cohen"),
        ("email", "noa@example.com"),
        ("message", "Second"),
    ];

    let (first, second) = tokio::join!(app.post_contact(&first), app.post_contact(&second));

    assert_is_redirect_to(&first, "/?success=true");
    assert_is_redirect_to(&second, "/?success=true");
}

#[tokio::test]
async fn undecodable_body_returns_server_error_page() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact_raw("{\"fullName\": ", "application/json")
        .await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "שגיאת שרת - 500");
}

#[tokio::test]
async fn long_form_encoded_message_is_dispatched() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let message = "a".repeat(20_000);
    let body = [
        ("fullName", "Dana Levi"),
        ("email", "dana@example.com"),
        ("message", message.as_str()),
    ];
    let response = app.post_contact(&body).await;

    assert_is_redirect_to(&response, "/?success=true");
    let email = app.sent_email().await;
    assert!(email["text"].as_str().unwrap().contains(&message));
}

#[tokio::test]
async fn body_without_form_content_type_counts_as_missing_fields() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let body = "fullName=Dana&email=dana%40example.com&message=Hello";

    let response = app.post_contact_without_content_type(body).await;
    assert_is_redirect_to(&response, &error_location(MISSING_FIELDS_MESSAGE));

    let response = app.post_contact_raw(body, "text/plain").await;
    assert_is_redirect_to(&response, &error_location(MISSING_FIELDS_MESSAGE));
}
