//! Contact form payload and the message-send collaborator seam.
//!
//! The page hands a validated [`ContactMessage`] to whatever
//! [`MessageSender`] the host wires in. Delivery failures never propagate:
//! [`submit`] turns them into a [`SubmitOutcome::Failed`] that carries a
//! notice pointing the visitor at a direct contact address instead.

use thiserror::Error;

/// Subject used when the visitor leaves the subject field empty.
pub const DEFAULT_SUBJECT: &str = "Portfolio Contact";

/// Raw form fields as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Structured payload passed to the message-send collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub message: String,
}

/// Errors raised while validating or delivering a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("message delivery failed: {0}")]
    Delivery(String),
}

impl ContactMessage {
    /// Validate a draft. Name, email and message are required.
    pub fn from_draft(draft: &ContactDraft) -> Result<Self, ContactError> {
        let name = required(&draft.name, "name")?;
        let email = required(&draft.email, "email")?;
        let message = required(&draft.message, "message")?;

        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }

        let subject = match draft.subject.trim() {
            "" => DEFAULT_SUBJECT,
            s => s,
        };

        Ok(Self {
            sender_name: name.to_string(),
            sender_email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ContactError> {
    match value.trim() {
        "" => Err(ContactError::MissingField(field)),
        v => Ok(v),
    }
}

/// The external service that actually delivers a message.
pub trait MessageSender {
    fn send(&self, message: &ContactMessage) -> Result<(), ContactError>;
}

/// Result of a form submission as presented to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The sender accepted the message.
    Sent,
    /// The draft never reached the sender.
    Rejected(ContactError),
    /// The sender failed; `fallback` tells the visitor how to reach out directly.
    Failed { error: ContactError, fallback: String },
}

/// Validate `draft`, hand it to `sender`, and map the result for display.
pub fn submit(
    sender: &impl MessageSender,
    draft: &ContactDraft,
    direct_contact: &str,
) -> SubmitOutcome {
    let message = match ContactMessage::from_draft(draft) {
        Ok(m) => m,
        Err(e) => return SubmitOutcome::Rejected(e),
    };

    match sender.send(&message) {
        Ok(()) => SubmitOutcome::Sent,
        Err(error) => SubmitOutcome::Failed {
            error,
            fallback: fallback_notice(direct_contact),
        },
    }
}

/// Notice shown when delivery fails.
pub fn fallback_notice(direct_contact: &str) -> String {
    format!("Failed to send message. Please email me directly at {direct_contact}")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct RecordingSender {
        sent: RefCell<Vec<ContactMessage>>,
        fail: bool,
    }

    impl RecordingSender {
        fn new(fail: bool) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl MessageSender for RecordingSender {
        fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
            self.sent.borrow_mut().push(message.clone());
            if self.fail {
                Err(ContactError::Delivery("service unavailable".into()))
            } else {
                Ok(())
            }
        }
    }

    fn draft() -> ContactDraft {
        ContactDraft {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: String::new(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn test_empty_subject_gets_default() {
        let msg = ContactMessage::from_draft(&draft()).unwrap();
        assert_eq!(msg.subject, DEFAULT_SUBJECT);
        assert_eq!(msg.sender_name, "Ada");
        assert_eq!(msg.sender_email, "ada@example.com");
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let mut d = draft();
        d.message = "   ".into();
        assert_eq!(
            ContactMessage::from_draft(&d),
            Err(ContactError::MissingField("message"))
        );

        let mut d = draft();
        d.email = "not-an-address".into();
        assert!(matches!(
            ContactMessage::from_draft(&d),
            Err(ContactError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_submit_success() {
        let sender = RecordingSender::new(false);
        assert_eq!(
            submit(&sender, &draft(), "me@example.com"),
            SubmitOutcome::Sent
        );
        assert_eq!(sender.sent.borrow().len(), 1);
    }

    #[test]
    fn test_submit_failure_carries_fallback() {
        let sender = RecordingSender::new(true);
        match submit(&sender, &draft(), "me@example.com") {
            SubmitOutcome::Failed { error, fallback } => {
                assert!(matches!(error, ContactError::Delivery(_)));
                assert!(fallback.ends_with("me@example.com"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_draft_never_reaches_sender() {
        let sender = RecordingSender::new(false);
        let outcome = submit(&sender, &ContactDraft::default(), "me@example.com");
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ContactError::MissingField("name"))
        );
        assert!(sender.sent.borrow().is_empty());
    }
}
