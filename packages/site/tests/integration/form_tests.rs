use site::{ContactDraft, ContactForm, FormBackend, HttpFormBackend, StatusKind, Submission};

use crate::support::TestServer;

fn draft() -> ContactDraft {
    ContactDraft {
        subject: "Proyecto".into(),
        email: "ana@example.com".into(),
        message: "Hola".into(),
    }
}

#[tokio::test]
async fn posts_multipart_with_form_name() {
    let server = TestServer::spawn().await;
    let backend = HttpFormBackend::new(reqwest::Client::new(), server.url("/forms"));

    backend
        .submit(&Submission::new("contact", &draft()))
        .await
        .expect("Should accept the form");

    let received = server.received();
    assert_eq!(received.len(), 1);
    let form = &received[0];
    assert_eq!(form.accept.as_deref(), Some("text/html"));
    assert_eq!(form.field("form-name"), Some("contact"));
    assert_eq!(form.field("subject"), Some("Proyecto"));
    assert_eq!(form.field("email"), Some("ana@example.com"));
    assert_eq!(form.field("message"), Some("Hola"));
}

#[tokio::test]
async fn server_error_is_a_failure() {
    let server = TestServer::spawn().await;
    let backend = HttpFormBackend::new(reqwest::Client::new(), server.url("/forms/broken"));

    let err = backend
        .submit(&Submission::new("contact", &draft()))
        .await
        .expect_err("500 should fail");
    assert!(err.to_string().contains("500"), "{err}");
}

#[tokio::test]
async fn controller_round_trip_against_endpoint() {
    let server = TestServer::spawn().await;
    let backend = HttpFormBackend::new(reqwest::Client::new(), server.url("/forms/broken"));
    let mut form = ContactForm::new("portfolio");

    let submission = form.begin_submit(&draft(), None).expect("Should be valid");
    let finished = form.finish_submit(backend.submit(&submission).await, None);

    assert!(!finished.sent);
    assert_eq!(form.status().map(|s| s.kind), Some(StatusKind::Error));
    assert!(!form.is_sending());

    let backend = HttpFormBackend::new(reqwest::Client::new(), server.url("/forms"));
    let submission = form.begin_submit(&draft(), None).expect("Should be valid");
    let finished = form.finish_submit(backend.submit(&submission).await, None);

    assert!(finished.sent);
    assert_eq!(server.received()[0].field("form-name"), Some("portfolio"));
}
