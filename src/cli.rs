use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "webmail-notify")]
#[command(about = "Watch an IMAP mailbox and report new mail", long_about = None)]
pub struct Cli {
    /// Logical mail server name or IMAP hostname (overrides WEBMAIL_SERVER)
    #[arg(short, long, value_name = "SERVER")]
    pub server: Option<String>,

    /// Mailbox to watch
    #[arg(long, default_value = "INBOX")]
    pub mailbox: String,

    /// Directory where attachments are saved (overrides WEBMAIL_PATH)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub debug: bool,

    /// Accept invalid TLS certificates for this session only
    #[arg(long)]
    pub accept_invalid_certs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["webmail-notify"]).unwrap();
        assert_eq!(cli.server, None);
        assert_eq!(cli.mailbox, "INBOX");
        assert!(!cli.debug);
        assert!(!cli.accept_invalid_certs);
    }

    #[test]
    fn test_cli_with_server_short() {
        let cli = Cli::try_parse_from(["webmail-notify", "-s", "teesta"]).unwrap();
        assert_eq!(cli.server.as_deref(), Some("teesta"));
    }

    #[test]
    fn test_cli_with_path_long() {
        let cli = Cli::try_parse_from(["webmail-notify", "--path", "/tmp/mail"]).unwrap();
        assert_eq!(cli.path.as_deref(), Some("/tmp/mail"));
    }
}
