use medline_core::error::FailureKind;
use medline_mail::error::MailError;
use medline_mail::message::{ATTACHMENT_NAME, SUBJECT, build_message};

#[test]
fn message_carries_subject_recipient_and_attachment() {
    let message = build_message("clinic@example.com", "patient@example.org", b"%PDF-1.3 test").unwrap();
    let raw = String::from_utf8_lossy(&message.formatted()).into_owned();

    assert!(raw.contains(&format!("Subject: {SUBJECT}")));
    assert!(raw.contains("patient@example.org"));
    assert!(raw.contains("clinic@example.com"));
    assert!(raw.contains(ATTACHMENT_NAME));
    assert!(raw.contains("application/pdf"));
    assert!(raw.contains("Stay healthy!"));
}

#[test]
fn invalid_recipient_is_a_delivery_failure() {
    let err = build_message("clinic@example.com", "not an address", b"pdf").unwrap_err();
    assert!(matches!(err, MailError::Recipient(_)));
    assert_eq!(err.kind(), FailureKind::Delivery);
}

#[test]
fn invalid_sender_is_a_configuration_failure() {
    let err = build_message("nobody", "patient@example.org", b"pdf").unwrap_err();
    assert!(matches!(err, MailError::Config(_)));
    assert_eq!(err.kind(), FailureKind::Configuration);
}
