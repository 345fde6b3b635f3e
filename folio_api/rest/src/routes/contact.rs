use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::contact::ContactSubmission;
use tracing::debug;

use crate::{
    errors::error,
    models::{contact::ApiContactSubmission, ApiMessage},
};

pub const MESSAGE_SENT: &str = "Message sent successfully!";
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const FAILED_TO_SEND: &str = "Failed to send message. Please try again later.";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/send-email", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    submission: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    // An unreadable body carries no fields, so it is validated like an empty form.
    let submission = match submission {
        Ok(Json(submission)) => submission.into(),
        Err(rejection) => {
            debug!("unreadable contact submission: {rejection}");
            ContactSubmission::default()
        }
    };

    match service.send_message(submission).await {
        Ok(_) => Json(ApiMessage {
            message: MESSAGE_SENT,
        })
        .into_response(),
        Err(ContactSendMessageError::MissingFields) => {
            error(StatusCode::BAD_REQUEST, ALL_FIELDS_REQUIRED)
        }
        Err(ContactSendMessageError::Send(_)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, FAILED_TO_SEND)
        }
    }
}
