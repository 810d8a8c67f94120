//! The report email itself.

use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};

use crate::error::MailError;

pub const SUBJECT: &str = "Your AI Health Checker Report";
pub const BODY: &str = "Attached is your AI Health Report. Stay healthy!";
pub const ATTACHMENT_NAME: &str = "AI_Health_Report.pdf";

/// Build the outgoing message: a short plain-text body with the PDF
/// attached.
pub fn build_message(sender: &str, destination: &str, report: &[u8]) -> Result<Message, MailError> {
    let from: Mailbox = sender
        .trim()
        .parse()
        .map_err(|e| MailError::Config(format!("sender address {sender:?}: {e}")))?;
    let to: Mailbox = destination
        .trim()
        .parse()
        .map_err(|e| MailError::Recipient(format!("{destination:?}: {e}")))?;

    let pdf = ContentType::parse("application/pdf")
        .map_err(|e| MailError::Message(e.to_string()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(BODY.to_string()))
                .singlepart(Attachment::new(ATTACHMENT_NAME.to_string()).body(report.to_vec(), pdf)),
        )
        .map_err(|e| MailError::Message(e.to_string()))
}
