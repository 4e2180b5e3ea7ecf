mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing::{error, info, warn};
use webmail_notify::core::config::NotifierConfig;
use webmail_notify::core::models::NotifierEvent;
use webmail_notify::infrastructure::logging::init_logging;
use webmail_notify::services::email::MailNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = NotifierConfig::from_env()?;
    if let Some(server) = cli.server {
        config.mail_server = server;
    }
    if let Some(path) = cli.path {
        config.path = path.into();
    }
    config.mailbox = cli.mailbox;
    config.debug = config.debug || cli.debug;
    config.accept_invalid_certs = config.accept_invalid_certs || cli.accept_invalid_certs;
    config.validate()?;

    init_logging(config.debug)?;

    info!("Starting webmail-notify");
    info!(
        "Mail server: {} ({})",
        config.mail_server,
        config.resolved_host()
    );
    info!("Mailbox: {}", config.mailbox);
    info!("Attachment directory: {:?}", config.attachment_dir());

    let (handle, mut events) = MailNotifier::spawn(config);

    while let Some(event) = events.recv().await {
        match event {
            NotifierEvent::Login(status) if status.success => {
                info!("Logged in, waiting for new mail");
            }
            NotifierEvent::Login(_) => {
                error!("Login failed, check credentials and server");
                break;
            }
            NotifierEvent::Mail(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            NotifierEvent::Error(e) => {
                warn!("Notifier error: {}", e);
            }
        }
    }

    handle.await?;
    Ok(())
}
