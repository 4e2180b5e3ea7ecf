use crate::core::config::NotifierConfig;
use crate::core::error::NotifierError;
use crate::core::models::NotifierEvent;
use mail_parser::{Message, MimeHeaders};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// 附件信息
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub size: usize,
}

/// 附件处理器
pub struct AttachmentHandler;

impl AttachmentHandler {
    /// 提取邮件中的附件
    pub fn extract_attachments(parsed: &Message) -> Vec<Attachment> {
        let mut attachments = Vec::new();

        for part in &parsed.parts {
            if part.is_text() {
                continue;
            }

            if let Some(filename) = part.attachment_name() {
                let content_type = part
                    .content_type()
                    .map(|ct| {
                        if let Some(subtype) = ct.subtype() {
                            format!("{}/{}", ct.c_type, subtype)
                        } else {
                            ct.c_type.to_string()
                        }
                    })
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let attachment = Attachment {
                    filename: filename.to_string(),
                    content_type,
                    data: part.contents().to_vec(),
                    size: part.body.len(),
                };
                attachments.push(attachment);
            }
        }

        attachments
    }
}

/// 附件保存器
pub struct AttachmentSaver;

impl AttachmentSaver {
    /// 并发写出所有附件，单个失败通过 error 事件上报
    ///
    /// Writes are fire-and-forget: there is no completion signal and no
    /// ordering guarantee between attachments.
    pub fn spawn_writes(
        config: &NotifierConfig,
        attachments: Vec<Attachment>,
        events: mpsc::Sender<NotifierEvent>,
    ) {
        for attachment in attachments {
            let path = config.attachment_path(&attachment.filename);
            let events = events.clone();

            tokio::spawn(async move {
                debug!("Saving attachment to {:?}", path);
                if let Err(e) = tokio::fs::write(&path, &attachment.data).await {
                    warn!("Failed to save attachment {:?}: {}", path, e);
                    let _ = events
                        .send(NotifierEvent::Error(NotifierError::Attachment(format!(
                            "failed to save {}: {}",
                            path.display(),
                            e
                        ))))
                        .await;
                }
            });
        }
    }
}
