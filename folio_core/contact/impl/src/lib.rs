use std::sync::Arc;

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_email_contracts::{ContentType, Email, EmailDeliveryId, EmailSender, EmailService};
use folio_models::{
    contact::{ContactMessage, ContactSubmission},
    email_address::EmailAddressWithName,
};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email> {
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Mailbox that receives every contact message.
    pub email: Arc<EmailAddressWithName>,
}

impl<Email> ContactServiceImpl<Email> {
    pub fn new(email: Email, config: ContactServiceConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactService for ContactServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<EmailDeliveryId, ContactSendMessageError> {
        let message = ContactMessage::try_from(submission).map_err(|field| {
            debug!(%field, "rejecting incomplete contact submission");
            ContactSendMessageError::MissingFields
        })?;

        let email = Email {
            sender: Some(EmailSender {
                name: (*message.author.name).clone(),
                address: (*message.author.email).clone(),
            }),
            recipient: (*self.config.email).clone(),
            subject: format!("New Contact from Portfolio: {}", *message.author.name),
            body: render_body(&message),
            content_type: ContentType::Html,
            reply_to: message.author.email.parse().ok(),
        };

        match self.email.send(email).await {
            Ok(delivery_id) => {
                info!(%delivery_id, "Message sent from contact form");
                Ok(delivery_id)
            }
            Err(err) => {
                error!(
                    kind = %err.kind,
                    code = ?err.code,
                    response = ?err.response,
                    "Error sending email from contact form: {}",
                    err.message
                );
                Err(ContactSendMessageError::Send(err))
            }
        }
    }
}

// Fields are embedded as typed, without HTML escaping.
fn render_body(message: &ContactMessage) -> String {
    format!(
        "
            <p>You have a new contact message from your portfolio website:</p>
            <h3>Contact Details:</h3>
            <ul>
                <li><strong>Name:</strong> {name}</li>
                <li><strong>Email:</strong> {email}</li>
            </ul>
            <h3>Message:</h3>
            <p>{content}</p>
        ",
        name = *message.author.name,
        email = *message.author.email,
        content = *message.content,
    )
}

#[cfg(test)]
mod tests {
    use folio_email_contracts::{EmailSendError, EmailSendErrorKind, MockEmailService};
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> ContactServiceConfig {
        ContactServiceConfig {
            email: Arc::new("owner@example.org".parse().unwrap()),
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        }
    }

    fn expected_email(config: &ContactServiceConfig) -> Email {
        Email {
            sender: Some(EmailSender {
                name: "Ada".into(),
                address: "ada@example.com".into(),
            }),
            recipient: (*config.email).clone(),
            subject: "New Contact from Portfolio: Ada".into(),
            body: "
<p>You have a new contact message from your portfolio website:</p>
<h3>Contact Details:</h3>
<ul>
    <li><strong>Name:</strong> Ada</li>
    <li><strong>Email:</strong> ada@example.com</li>
</ul>
<h3>Message:</h3>
<p>Hello</p>
"
            .into(),
            content_type: ContentType::Html,
            reply_to: Some("ada@example.com".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = config();
        let email = MockEmailService::new()
            .with_send(expected_email(&config), Ok("abc123".into()));

        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_eq!(result.unwrap(), EmailDeliveryId::from("abc123"));
    }

    #[tokio::test]
    async fn missing_fields() {
        for submission in [
            ContactSubmission {
                name: "".into(),
                ..submission()
            },
            ContactSubmission {
                email: "".into(),
                ..submission()
            },
            ContactSubmission {
                message: "".into(),
                ..submission()
            },
            ContactSubmission::default(),
        ] {
            // Arrange
            let mut email = MockEmailService::new();
            email.expect_send().never();

            let sut = ContactServiceImpl::new(email, config());

            // Act
            let result = sut.send_message(submission).await;

            // Assert
            assert_matches!(result, Err(ContactSendMessageError::MissingFields));
        }
    }

    #[tokio::test]
    async fn send_error() {
        // Arrange
        let config = config();
        let error = EmailSendError {
            code: Some("535".into()),
            response: Some("5.7.8 Username and Password not accepted".into()),
            ..EmailSendError::new(EmailSendErrorKind::Permanent, "authentication failed")
        };
        let email = MockEmailService::new().with_send(expected_email(&config), Err(error.clone()));

        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Send(err)) if *err == error);
    }

    #[tokio::test]
    async fn recipient_and_subject() {
        // Arrange
        let config = config();
        let recipient = (*config.email).clone();

        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .withf(move |email| {
                email.recipient == recipient && email.subject.contains("Grace Hopper")
            })
            .return_once(|_| Box::pin(std::future::ready(Ok(EmailDeliveryId::from("id")))));

        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut
            .send_message(ContactSubmission {
                name: "Grace Hopper".into(),
                email: "grace".into(),
                message: "Hi".into(),
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn unparsable_email_is_still_sent_without_reply_to() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .withf(|email| {
                email.reply_to.is_none()
                    && email.sender.as_ref().is_some_and(|x| x.address == "not an address")
            })
            .return_once(|_| Box::pin(std::future::ready(Ok(EmailDeliveryId::from("id")))));

        let sut = ContactServiceImpl::new(email, config());

        // Act
        let result = sut
            .send_message(ContactSubmission {
                email: "not an address".into(),
                ..submission()
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn no_deduplication() {
        // Arrange
        let config = config();
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .times(2)
            .with(mockall::predicate::eq(expected_email(&config)))
            .returning(|_| Box::pin(std::future::ready(Ok(EmailDeliveryId::from("id")))));

        let sut = ContactServiceImpl::new(email, config);

        // Act
        let first = sut.send_message(submission()).await;
        let second = sut.send_message(submission()).await;

        // Assert
        first.unwrap();
        second.unwrap();
    }

    #[test]
    fn body_is_not_escaped() {
        let message = ContactMessage::try_from(ContactSubmission {
            message: "<b>bold</b> & more".into(),
            ..submission()
        })
        .unwrap();

        assert!(render_body(&message).contains("<p><b>bold</b> & more</p>"));
    }

    #[test]
    fn body_layout() {
        let message = ContactMessage::try_from(submission()).unwrap();

        let expected = [
            "",
            "            <p>You have a new contact message from your portfolio website:</p>",
            "            <h3>Contact Details:</h3>",
            "            <ul>",
            "                <li><strong>Name:</strong> Ada</li>",
            "                <li><strong>Email:</strong> ada@example.com</li>",
            "            </ul>",
            "            <h3>Message:</h3>",
            "            <p>Hello</p>",
            "        ",
        ]
        .join("\n");
        assert_eq!(render_body(&message), expected);
    }
}
