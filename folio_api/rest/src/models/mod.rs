use serde::Serialize;

pub mod contact;

/// Body of every JSON response of the contact endpoint.
#[derive(Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
}
