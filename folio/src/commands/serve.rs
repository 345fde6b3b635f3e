use folio_config::Config;
use folio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    match email.ping().await {
        Ok(()) => info!("Connected to smtp server"),
        Err(err) => warn!("Failed to connect to smtp server: {err:#}"),
    }

    let provider = Provider::new(ConfigProvider::new(&config), email);
    let server: RestServer = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
