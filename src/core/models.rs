use crate::core::error::NotifierError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MailAddress {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttachmentInfo {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MailRecord {
    pub from: MailAddress,
    pub to: Vec<MailAddress>,
    pub date: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub text_as_html: Option<String>,
    pub attachments: Vec<AttachmentInfo>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LoginStatus {
    pub success: bool,
}

/// 通知器对外事件
#[derive(Debug)]
pub enum NotifierEvent {
    Login(LoginStatus),
    Mail(MailRecord),
    Error(NotifierError),
}
