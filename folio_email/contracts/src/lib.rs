use std::{fmt, future::Future};

use folio_models::email_address::EmailAddressWithName;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Deliver an email, resolving once the transport has accepted or
    /// rejected it.
    fn send(
        &self,
        email: Email,
    ) -> impl Future<Output = Result<EmailDeliveryId, EmailSendError>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Display sender. The configured account is used if `None`.
    pub sender: Option<EmailSender>,
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddressWithName>,
}

/// A sender as supplied by a third party. The address has not been parsed and
/// may be rejected by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSender {
    pub name: String,
    pub address: String,
}

impl fmt::Display for EmailSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

/// Opaque identifier of a delivered email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailDeliveryId(pub String);

impl fmt::Display for EmailDeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for EmailDeliveryId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct EmailSendError {
    pub kind: EmailSendErrorKind,
    pub message: String,
    /// SMTP status code, if the server answered.
    pub code: Option<String>,
    /// SMTP response text, if the server answered.
    pub response: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailSendErrorKind {
    #[error("invalid message")]
    InvalidMessage,
    #[error("rejected by server")]
    Rejected,
    #[error("transient error")]
    Transient,
    #[error("permanent error")]
    Permanent,
    #[error("timeout")]
    Timeout,
    #[error("connection error")]
    Connection,
}

impl EmailSendError {
    pub fn new(kind: EmailSendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            response: None,
        }
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(
        mut self,
        email: Email,
        result: Result<EmailDeliveryId, EmailSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(
                result
                    .then_some(())
                    .ok_or_else(|| anyhow::anyhow!("Failed to ping smtp server")),
            ))
        });
        self
    }
}
