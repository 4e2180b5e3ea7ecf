use crate::core::servers;
use anyhow::{Context, Result};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// 邮件通知配置
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    pub username: String,
    pub password: String,
    pub mail_server: String,
    pub port: u16,
    pub mailbox: String,
    pub path: PathBuf,
    pub debug: bool,
    pub accept_invalid_certs: bool,
}

impl NotifierConfig {
    /// 纯构造函数（库调用方使用）
    pub fn new(username: String, password: String, mail_server: String) -> Self {
        Self {
            username,
            password,
            mail_server,
            port: 993,
            mailbox: "INBOX".to_string(),
            path: PathBuf::from("."),
            debug: false,
            accept_invalid_certs: false,
        }
    }

    /// 从环境变量创建配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let config = Self {
            username: Self::env_required("WEBMAIL_USERNAME")?,
            password: Self::env_required("WEBMAIL_PASSWORD")?,
            mail_server: Self::env_required("WEBMAIL_SERVER")?,
            port: Self::env_parse("WEBMAIL_PORT", 993)?,
            mailbox: Self::env_or("WEBMAIL_MAILBOX", "INBOX"),
            path: Self::env_or("WEBMAIL_PATH", ".").into(),
            debug: Self::env_parse("WEBMAIL_DEBUG", false)?,
            accept_invalid_certs: Self::env_parse("WEBMAIL_ACCEPT_INVALID_CERTS", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            anyhow::bail!("Username cannot be empty");
        }
        if self.mail_server.is_empty() {
            anyhow::bail!("Mail server cannot be empty");
        }
        if self.port == 0 {
            anyhow::bail!("Invalid IMAP port: {}", self.port);
        }
        if self.mailbox.is_empty() {
            anyhow::bail!("Mailbox cannot be empty");
        }
        if self.path.to_str().is_none_or(|s| s.is_empty()) {
            anyhow::bail!("Attachment directory path is invalid");
        }

        Ok(())
    }

    /// 解析邮件服务器地址（逻辑名或主机名）
    pub fn resolved_host(&self) -> String {
        servers::lookup(&self.mail_server)
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| self.mail_server.clone())
    }

    /// 附件保存目录的绝对路径
    pub fn attachment_dir(&self) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(&self.path)
        }
    }

    /// 解析附件在保存目录下的完整路径
    pub fn attachment_path(&self, filename: &str) -> PathBuf {
        // Strip any directory components a sender may have smuggled in
        let name = Path::new(filename)
            .file_name()
            .unwrap_or_else(|| OsStr::new(filename));
        self.attachment_dir().join(name)
    }

    /// 读取环境变量或使用默认值
    fn env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// 读取并解析环境变量，失败时使用默认值
    fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        match env::var(key) {
            Ok(val) => val
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", key, e)),
            Err(_) => Ok(default),
        }
    }

    /// 读取必需的环境变量
    fn env_required(key: &str) -> Result<String> {
        env::var(key).context(format!("{} not set in environment", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> NotifierConfig {
        NotifierConfig::new(
            "user@example.com".to_string(),
            "password123".to_string(),
            "teesta".to_string(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = test_config();
        assert_eq!(config.port, 993);
        assert_eq!(config.mailbox, "INBOX");
        assert_eq!(config.path, PathBuf::from("."));
        assert!(!config.debug);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_resolved_host_via_lookup_table() {
        let config = test_config();
        assert_eq!(config.resolved_host(), "202.141.80.12");
    }

    #[test]
    fn test_resolved_host_falls_back_to_literal() {
        let mut config = test_config();
        config.mail_server = "imap.example.com".to_string();
        assert_eq!(config.resolved_host(), "imap.example.com");
    }

    #[test]
    fn test_attachment_path_under_configured_dir() {
        let mut config = test_config();
        config.path = PathBuf::from("/tmp/mail");
        assert_eq!(
            config.attachment_path("a.pdf"),
            PathBuf::from("/tmp/mail/a.pdf")
        );
        assert_eq!(
            config.attachment_path("b.png"),
            PathBuf::from("/tmp/mail/b.png")
        );
    }

    #[test]
    fn test_attachment_path_strips_directories() {
        let mut config = test_config();
        config.path = PathBuf::from("/tmp/mail");
        assert_eq!(
            config.attachment_path("../../etc/passwd"),
            PathBuf::from("/tmp/mail/passwd")
        );
    }

    #[test]
    fn test_attachment_dir_resolves_relative_path() {
        let config = test_config();
        assert!(config.attachment_dir().is_absolute());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("WEBMAIL_USERNAME", "user@example.com");
        std::env::set_var("WEBMAIL_PASSWORD", "password123");
        std::env::set_var("WEBMAIL_SERVER", "teesta");

        let config = NotifierConfig::from_env().unwrap();
        assert_eq!(config.username, "user@example.com");
        assert_eq!(config.mail_server, "teesta");
        assert_eq!(config.port, 993);
        assert_eq!(config.mailbox, "INBOX");
    }

    #[test]
    fn test_validate_rejects_empty_server() {
        let mut config = test_config();
        config.mail_server = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = test_config();
        config.port = 0;
        assert!(config.validate().is_err());
    }
}
