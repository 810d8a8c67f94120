//! medline-mail
//!
//! Emails a finished report to the address given on the intake form.

pub mod error;
pub mod message;
pub mod settings;
pub mod smtp;

pub use settings::{MailSettings, SmtpTls};
pub use smtp::{ReportMailer, SmtpMailer};
