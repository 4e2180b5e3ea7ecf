use crate::core::error::NotifierResult;
use tokio::net::TcpStream;
use tokio_native_tls::TlsConnector;
use tracing::info;

pub type ImapSession = async_imap::Session<tokio_native_tls::TlsStream<TcpStream>>;

pub struct ImapClient {
    host: String,
    port: u16,
    username: String,
    password: String,
    accept_invalid_certs: bool,
}

impl ImapClient {
    pub fn new(
        host: String,
        port: u16,
        username: String,
        password: String,
        accept_invalid_certs: bool,
    ) -> Self {
        Self {
            host,
            port,
            username,
            password,
            accept_invalid_certs,
        }
    }

    pub async fn connect(&self) -> NotifierResult<ImapSession> {
        info!("Connecting to IMAP server {}:{}", self.host, self.port);
        let tcp_stream = TcpStream::connect((self.host.as_str(), self.port)).await?;

        let native_tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;
        let connector = TlsConnector::from(native_tls);

        let tls_stream = connector.connect(&self.host, tcp_stream).await?;

        let client = async_imap::Client::new(tls_stream);

        let session = client
            .login(&self.username, &self.password)
            .await
            .map_err(|e| e.0)?;

        info!("Successfully connected to IMAP server");
        Ok(session)
    }
}
