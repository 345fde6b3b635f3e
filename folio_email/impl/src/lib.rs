use anyhow::anyhow;
use folio_email_contracts::{
    ContentType, Email, EmailDeliveryId, EmailSendError, EmailSendErrorKind, EmailSender,
    EmailService,
};
use folio_models::email_address::EmailAddress;
use folio_utils::Apply;
use lettre::{
    address::Envelope,
    message::{header, Mailbox},
    transport::smtp::{self, response::Response},
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
pub use lettre::transport::smtp::authentication::Credentials;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Create a service that relays through the SMTP server at `url`
    /// (e.g. `smtps://smtp.gmail.com`), authenticating as `credentials`.
    ///
    /// `from` is always used as the envelope sender.
    pub async fn new(
        url: &str,
        credentials: Option<Credentials>,
        from: EmailAddress,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .apply_map(credentials, |builder, credentials| {
                builder.credentials(credentials)
            })
            .build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        Self::new("smtp://dummy", None, "dummy@example.com".parse().unwrap())
            .await
            .unwrap()
    }

    fn new_delivery_id(&self) -> EmailDeliveryId {
        EmailDeliveryId(format!("<{}@{}>", Uuid::new_v4(), self.from.domain()))
    }

    fn build_message(
        &self,
        email: Email,
        delivery_id: &EmailDeliveryId,
    ) -> Result<Message, EmailSendError> {
        let from = match email.sender {
            Some(sender) => self.sender_mailbox(sender),
            None => Mailbox::new(None, self.from.0.clone()),
        };

        let envelope = Envelope::new(
            Some(self.from.0.clone()),
            vec![email.recipient.0.email.clone()],
        )
        .map_err(|err| EmailSendError::new(EmailSendErrorKind::InvalidMessage, err.to_string()))?;

        Message::builder()
            .message_id(Some(delivery_id.0.clone()))
            .from(from)
            .to(email.recipient.0)
            .apply_map(email.reply_to, |builder, reply_to| {
                builder.reply_to(reply_to.0)
            })
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .envelope(envelope)
            .body(email.body)
            .map_err(|err| EmailSendError::new(EmailSendErrorKind::InvalidMessage, err.to_string()))
    }

    /// Mailbox shown in the `From` header. Submitted addresses are not
    /// validated, so one that does not parse keeps the sender's name on the
    /// configured account.
    fn sender_mailbox(&self, sender: EmailSender) -> Mailbox {
        let address = sender.address.parse::<Address>().unwrap_or_else(|err| {
            debug!(address = %sender.address, "unparsable sender address: {err}");
            self.from.0.clone()
        });

        Mailbox::new(Some(sender.name), address)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<EmailDeliveryId, EmailSendError> {
        let delivery_id = self.new_delivery_id();
        let message = self.build_message(email, &delivery_id)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(transport_error)?;

        if !response.is_positive() {
            return Err(rejected(&response));
        }

        debug!(%delivery_id, code = %response.code(), "smtp server accepted message");

        Ok(delivery_id)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn transport_error(err: smtp::Error) -> EmailSendError {
    let kind = if err.is_timeout() {
        EmailSendErrorKind::Timeout
    } else if err.is_transient() {
        EmailSendErrorKind::Transient
    } else if err.is_permanent() {
        EmailSendErrorKind::Permanent
    } else {
        EmailSendErrorKind::Connection
    };

    EmailSendError {
        kind,
        message: err.to_string(),
        code: err.status().map(|code| code.to_string()),
        response: None,
    }
}

fn rejected(response: &Response) -> EmailSendError {
    EmailSendError {
        kind: EmailSendErrorKind::Rejected,
        message: "smtp server did not accept the message".into(),
        code: Some(response.code().to_string()),
        response: Some(response.message().collect::<Vec<_>>().join("\n")),
    }
}
