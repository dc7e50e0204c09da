use crate::{MailError, MailResult, Mailer, OutgoingEmail, SmtpConfig, SmtpStatus};
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Sends mail through an SMTP relay using STARTTLS and password login.
///
/// A connection is opened per message; the service sends at most one email per assessment.
#[derive(Clone, Debug)]
pub struct SmtpMailer {
    cfg: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(cfg: SmtpConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.cfg
    }

    /// Builds the MIME message without sending it.
    pub fn build_message(&self, email: &OutgoingEmail) -> MailResult<Message> {
        let from = parse_mailbox(self.cfg.sender())?;
        let to = parse_mailbox(&email.to)?;

        let mut body = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));

        if let Some(attachment) = &email.attachment {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(e.to_string()))?;
            body = body.singlepart(
                MimeAttachment::new(attachment.filename.clone())
                    .body(attachment.bytes.clone(), content_type),
            );
        }

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(body)
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

fn parse_mailbox(address: &str) -> MailResult<Mailbox> {
    address.parse::<Mailbox>().map_err(|e| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

impl Mailer for SmtpMailer {
    fn send(&self, email: &OutgoingEmail) -> MailResult<()> {
        if !self.cfg.is_complete() {
            return Err(MailError::NotConfigured(self.cfg.missing()));
        }

        let message = self.build_message(email)?;

        tracing::info!(
            "sending email to {} via {}:{}",
            email.to,
            self.cfg.server,
            self.cfg.port
        );

        let transport = SmtpTransport::starttls_relay(&self.cfg.server)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(self.cfg.port)
            .credentials(Credentials::new(
                self.cfg.username.clone(),
                self.cfg.password.clone(),
            ))
            .build();

        transport
            .send(&message)
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!("email sent to {}", email.to);
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.cfg.is_complete()
    }

    fn status(&self) -> SmtpStatus {
        self.cfg.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attachment;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(SmtpConfig {
            server: "smtp.example.com".into(),
            port: 587,
            username: "alerts@example.com".into(),
            password: "secret".into(),
            from: String::new(),
        })
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "patient@example.com".into(),
            subject: "Remote Home Check Assessment Results".into(),
            body: "Dear Jane,".into(),
            attachment: Some(Attachment {
                filename: "health_assessment_report.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: b"%PDF-1.3".to_vec(),
            }),
        }
    }

    #[test]
    fn unconfigured_mailer_refuses_without_connecting() {
        let mailer = SmtpMailer::new(SmtpConfig::default());

        let err = mailer.send(&email()).expect_err("should not send");
        assert!(matches!(err, MailError::NotConfigured(ref missing) if missing.contains(&"SMTP_SERVER")));
        assert!(!mailer.is_configured());
    }

    #[test]
    fn build_message_includes_attachment() {
        let message = mailer().build_message(&email()).expect("should build");
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Remote Home Check Assessment Results"));
        assert!(raw.contains("health_assessment_report.pdf"));
        assert!(raw.contains("application/pdf"));
    }

    #[test]
    fn invalid_sender_is_address_error() {
        let mailer = SmtpMailer::new(SmtpConfig {
            username: "Remote Home Check".into(),
            ..mailer().config().clone()
        });

        let err = mailer.build_message(&email()).expect_err("should fail");
        assert!(matches!(err, MailError::Address { .. }));
    }
}
