use thiserror::Error;

/// 通知器错误类型
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("IMAP error: {0}")]
    Imap(#[from] async_imap::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Attachment error: {0}")]
    Attachment(String),
}

/// 通知器通用 Result 类型
pub type NotifierResult<T> = Result<T, NotifierError>;
