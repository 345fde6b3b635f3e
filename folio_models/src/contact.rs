use nutype::nutype;
use thiserror::Error;

/// Raw form fields as submitted by a visitor. Nothing has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact submission in which every field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    /// Reply address exactly as typed by the visitor. The format is not
    /// checked.
    pub email: ContactMessageAuthorEmail,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactMessageAuthorEmail(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingContactField {
    #[error("name is missing")]
    Name,
    #[error("email is missing")]
    Email,
    #[error("message is missing")]
    Message,
}

impl TryFrom<ContactSubmission> for ContactMessage {
    type Error = MissingContactField;

    fn try_from(value: ContactSubmission) -> Result<Self, Self::Error> {
        let name = ContactMessageAuthorName::try_new(value.name)
            .map_err(|_| MissingContactField::Name)?;
        let email = ContactMessageAuthorEmail::try_new(value.email)
            .map_err(|_| MissingContactField::Email)?;
        let content = ContactMessageContent::try_new(value.message)
            .map_err(|_| MissingContactField::Message)?;

        Ok(Self {
            author: ContactMessageAuthor { name, email },
            content,
        })
    }
}
