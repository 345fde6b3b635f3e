use anyhow::{bail, Context};
use folio_config::EmailConfig;
use folio_email_impl::{Credentials, EmailServiceImpl};

/// Set up the SMTP transport. No connection is opened yet.
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = match (&config.username, &config.password) {
        (Some(username), Some(password)) => {
            Some(Credentials::new(username.clone(), password.0.clone()))
        }
        (None, None) => None,
        (Some(_), None) => bail!("An smtp password is required when a username is set"),
        (None, Some(_)) => bail!("An smtp username is required when a password is set"),
    };

    EmailServiceImpl::new(&config.smtp_url, credentials, config.from.clone())
        .await
        .context("Failed to set up SMTP transport")
}
