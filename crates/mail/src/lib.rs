//! # Mail
//!
//! Outgoing email for assessment results.
//!
//! Contains:
//! - [`SmtpConfig`]: relay settings resolved once at startup
//! - [`Mailer`]: the seam the processing pipeline sends through
//! - [`SmtpMailer`]: the `lettre` STARTTLS implementation
//!
//! Message wording lives in `rhc-core`; this crate only moves bytes.

mod config;
mod smtp;

pub use config::{smtp_port_from_env_value, SmtpConfig, SmtpStatus, DEFAULT_SMTP_PORT, NOT_SET};
pub use smtp::SmtpMailer;

/// Errors raised while building or sending an email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP not configured, missing: {}", .0.join(", "))]
    NotConfigured(Vec<&'static str>),
    #[error("invalid SMTP port {0}")]
    InvalidPort(String),
    #[error("invalid email address '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("failed to build email: {0}")]
    Build(String),
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

pub type MailResult<T> = std::result::Result<T, MailError>;

/// A file attached to an outgoing email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A plain-text email with an optional attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

/// Anything that can deliver an [`OutgoingEmail`].
///
/// Implementations are called from blocking worker threads and may perform network I/O.
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutgoingEmail) -> MailResult<()>;

    fn is_configured(&self) -> bool;

    /// Configuration snapshot for diagnostics endpoints.
    fn status(&self) -> SmtpStatus;
}
