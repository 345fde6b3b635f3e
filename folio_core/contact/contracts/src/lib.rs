use std::future::Future;

use folio_email_contracts::{EmailDeliveryId, EmailSendError};
use folio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validate a contact form submission and relay it to the operator.
    ///
    /// Nothing is sent if a field is missing.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<EmailDeliveryId, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Failed to send message.")]
    Send(#[source] EmailSendError),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<EmailDeliveryId, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
