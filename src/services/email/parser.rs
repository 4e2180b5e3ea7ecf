use crate::core::config::NotifierConfig;
use crate::core::models::{AttachmentInfo, MailAddress, MailRecord};
use crate::services::email::attachment::Attachment;
use chrono::{DateTime, Utc};
use mail_parser::{Addr, Message};

/// 邮件解析器
pub struct EmailParser;

impl EmailParser {
    /// 构造规范化邮件记录
    pub fn to_record(
        parsed: &Message,
        attachments: &[Attachment],
        config: &NotifierConfig,
    ) -> MailRecord {
        MailRecord {
            from: Self::parse_from_address(parsed),
            to: Self::parse_recipients(parsed),
            date: Self::parse_date(parsed),
            subject: parsed.subject().map(|s| s.to_string()),
            text: parsed.body_text(0).map(|t| t.to_string()),
            text_as_html: parsed.body_html(0).map(|t| t.to_string()),
            attachments: attachments
                .iter()
                .map(|a| AttachmentInfo {
                    name: a.filename.clone(),
                    path: config.attachment_path(&a.filename),
                })
                .collect(),
        }
    }

    /// 解析发件人（取第一个 from 地址）
    fn parse_from_address(parsed: &Message) -> MailAddress {
        parsed
            .from()
            .and_then(|l| l.first())
            .map(Self::to_mail_address)
            .unwrap_or_default()
    }

    /// 解析收件人列表
    fn parse_recipients(parsed: &Message) -> Vec<MailAddress> {
        parsed
            .to()
            .map(|list| list.iter().map(Self::to_mail_address).collect())
            .unwrap_or_default()
    }

    /// 解析发送日期
    fn parse_date(parsed: &Message) -> Option<DateTime<Utc>> {
        parsed
            .date()
            .and_then(|d| DateTime::from_timestamp(d.to_timestamp(), 0))
    }

    fn to_mail_address(addr: &Addr) -> MailAddress {
        MailAddress {
            email: addr
                .address
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            name: addr.name.as_ref().map(|s| s.to_string()),
        }
    }
}
