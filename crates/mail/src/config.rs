//! SMTP relay configuration.

use crate::{MailError, MailResult};
use serde::Serialize;

/// Submission port used when `SMTP_PORT` is not provided.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Placeholder reported for unset values.
pub const NOT_SET: &str = "NOT SET";

/// SMTP relay settings.
///
/// An empty string (or a zero port) means "not provided".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address; falls back to `username` when empty.
    pub from: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { NOT_SET } else { "SET" })
            .field("from", &self.from)
            .finish()
    }
}

/// What `/check-smtp` reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SmtpStatus {
    pub smtp_configured: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password_set: bool,
}

impl SmtpConfig {
    /// Builds the configuration from `SMTP_*` variables supplied by `lookup`.
    ///
    /// Binaries pass `|key| std::env::var(key).ok()` after loading `.env`. `SMTP_PORT` defaults to
    /// [`DEFAULT_SMTP_PORT`] when unset or blank.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidPort`] if `SMTP_PORT` is not a valid port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MailResult<Self> {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();

        Ok(Self {
            server: text("SMTP_SERVER"),
            port: smtp_port_from_env_value(lookup("SMTP_PORT"))?,
            username: text("SMTP_USERNAME"),
            // Passwords are taken verbatim.
            password: lookup("SMTP_PASSWORD").unwrap_or_default(),
            from: text("SMTP_FROM"),
        })
    }

    /// True when every setting required to log in to the relay is present.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the environment variables whose values are missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.server.trim().is_empty() {
            missing.push("SMTP_SERVER");
        }
        if self.port == 0 {
            missing.push("SMTP_PORT");
        }
        if self.username.trim().is_empty() {
            missing.push("SMTP_USERNAME");
        }
        if self.password.is_empty() {
            missing.push("SMTP_PASSWORD");
        }
        missing
    }

    /// The envelope sender.
    pub fn sender(&self) -> &str {
        if self.from.trim().is_empty() {
            &self.username
        } else {
            &self.from
        }
    }

    /// Diagnostic snapshot. The password itself is never included.
    ///
    /// `smtp_configured` ignores the port, which always has a default.
    pub fn status(&self) -> SmtpStatus {
        let or_not_set = |value: &str| {
            if value.trim().is_empty() {
                NOT_SET.to_string()
            } else {
                value.to_string()
            }
        };

        SmtpStatus {
            smtp_configured: !self.server.trim().is_empty()
                && !self.username.trim().is_empty()
                && !self.password.is_empty(),
            smtp_server: or_not_set(&self.server),
            smtp_port: self.port,
            smtp_username: or_not_set(&self.username),
            smtp_password_set: !self.password.is_empty(),
        }
    }

    /// Logs the configuration once at startup.
    pub fn log_summary(&self) {
        let status = self.status();
        tracing::info!(
            server = %status.smtp_server,
            port = status.smtp_port,
            username = %status.smtp_username,
            password = if status.smtp_password_set { "SET" } else { NOT_SET },
            "SMTP configuration"
        );
        if !self.is_complete() {
            tracing::warn!(
                "SMTP not configured (missing {}); assessment emails will be skipped",
                self.missing().join(", ")
            );
        }
    }
}

/// Parse `SMTP_PORT`, defaulting to [`DEFAULT_SMTP_PORT`] when unset or blank.
pub fn smtp_port_from_env_value(value: Option<String>) -> MailResult<u16> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_SMTP_PORT),
        Some(v) => v
            .parse::<u16>()
            .map_err(|e| MailError::InvalidPort(format!("'{}': {}", v, e))),
    }
}
