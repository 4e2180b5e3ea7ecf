use crate::core::config::NotifierConfig;
use crate::core::error::{NotifierError, NotifierResult};
use crate::core::models::{LoginStatus, NotifierEvent};
use crate::infrastructure::imap::{ImapClient, ImapSession};
use crate::services::email::attachment::{AttachmentHandler, AttachmentSaver};
use crate::services::email::parser::EmailParser;
use async_imap::extensions::idle::IdleResponse;
use async_imap::imap_proto::{MailboxDatum, Response};
use async_imap::types::UnsolicitedResponse;
use futures::StreamExt;
use mail_parser::MessageParser;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// RFC 2177: IDLE 至少每 29 分钟重新发起一次
const IDLE_TIMEOUT: Duration = Duration::from_secs(29 * 60);

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// 会话状态
#[derive(Debug)]
struct SessionState {
    total: u32,
    first_notification: bool,
}

impl SessionState {
    fn new(total: u32) -> Self {
        Self {
            total,
            first_notification: true,
        }
    }

    /// 处理 EXISTS 信号，返回需要抓取的序列号区间
    ///
    /// The first signal after opening the mailbox reflects pre-existing
    /// mail and never produces a fetch.
    fn on_exists(&mut self, count: u32) -> Option<String> {
        self.total = count;

        if self.first_notification {
            self.first_notification = false;
            return None;
        }

        Some(format!("{}:*", self.total))
    }
}

/// 邮件通知器
///
/// 持有一个 IMAP 会话，把邮箱活动翻译成 login / mail / error 事件。
pub struct MailNotifier {
    config: NotifierConfig,
    events: mpsc::Sender<NotifierEvent>,
}

impl MailNotifier {
    /// 创建通知器并立即开始连接
    pub fn spawn(config: NotifierConfig) -> (JoinHandle<()>, mpsc::Receiver<NotifierEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let notifier = MailNotifier { config, events: tx };

        let handle = tokio::spawn(async move { notifier.run().await });
        (handle, rx)
    }

    async fn run(self) {
        info!(
            "Starting mail notifier for {} on {}",
            self.config.username,
            self.config.resolved_host()
        );

        let client = ImapClient::new(
            self.config.resolved_host(),
            self.config.port,
            self.config.username.clone(),
            self.config.password.clone(),
            self.config.accept_invalid_certs,
        );

        let session = match client.connect().await {
            Ok(session) => session,
            Err(e) => {
                error!("IMAP login failed: {}", e);
                self.emit(NotifierEvent::Login(LoginStatus { success: false }))
                    .await;
                return;
            }
        };

        if let Err(e) = self.watch_mailbox(session).await {
            error!("Mail notifier stopped: {}", e);
            self.emit(NotifierEvent::Error(e)).await;
        }
    }

    /// 以只读方式打开邮箱并进入 IDLE 循环
    async fn watch_mailbox(&self, mut session: ImapSession) -> NotifierResult<()> {
        let mailbox = match session.examine(&self.config.mailbox).await {
            Ok(mailbox) => mailbox,
            Err(e) => {
                self.emit(NotifierEvent::Error(e.into())).await;
                return Ok(());
            }
        };

        info!(
            "Mailbox {} opened read-only, {} messages",
            self.config.mailbox, mailbox.exists
        );
        let mut state = SessionState::new(mailbox.exists);
        self.emit(NotifierEvent::Login(LoginStatus { success: true }))
            .await;

        loop {
            let mut idle = session.idle();
            idle.init().await?;
            let (idle_wait, _interrupt) = idle.wait_with_timeout(IDLE_TIMEOUT);
            let response = idle_wait.await?;
            session = idle.done().await?;

            match response {
                IdleResponse::Timeout => {
                    debug!("IDLE timeout elapsed, re-issuing");
                }
                IdleResponse::ManualInterrupt => {
                    debug!("IDLE interrupted, re-issuing");
                }
                IdleResponse::NewData(data) => {
                    let mut count = match data.parsed() {
                        Response::MailboxData(MailboxDatum::Exists(count)) => Some(*count),
                        _ => None,
                    };

                    // An EXISTS may also land in the unsolicited queue when the
                    // wake-up was caused by another untagged response
                    while let Ok(unsolicited) = session.unsolicited_responses.try_recv() {
                        if let UnsolicitedResponse::Exists(n) = unsolicited {
                            count = Some(n);
                        }
                    }

                    if let Some(count) = count {
                        debug!("Mailbox now reports {} messages", count);
                        if let Some(range) = state.on_exists(count) {
                            self.fetch_and_emit(&mut session, &range).await;
                        }
                    }
                }
            }
        }
    }

    /// 抓取新邮件并逐封发出事件
    async fn fetch_and_emit(&self, session: &mut ImapSession, range: &str) {
        let bodies = match Self::fetch_bodies(session, range).await {
            Ok(bodies) => bodies,
            Err(e) => {
                self.emit(NotifierEvent::Error(e)).await;
                return;
            }
        };

        for raw in bodies {
            self.process_message(&raw).await;
        }
    }

    /// 按序列号区间抓取完整报文
    async fn fetch_bodies(session: &mut ImapSession, range: &str) -> NotifierResult<Vec<Vec<u8>>> {
        info!("Fetching messages {}", range);
        let mut fetch_stream = session.fetch(range, "RFC822").await?;

        let mut bodies = Vec::new();
        while let Some(fetch) = fetch_stream.next().await {
            let fetch = fetch?;
            if let Some(body) = fetch.body() {
                bodies.push(body.to_vec());
            }
        }

        Ok(bodies)
    }

    /// 解析报文并发出 mail 事件，随后异步保存附件
    async fn process_message(&self, raw: &[u8]) {
        let parsed = match MessageParser::default().parse(raw) {
            Some(parsed) => parsed,
            None => {
                self.emit(NotifierEvent::Error(NotifierError::Parse(
                    "failed to parse message body".to_string(),
                )))
                .await;
                return;
            }
        };

        let attachments = AttachmentHandler::extract_attachments(&parsed);
        let record = EmailParser::to_record(&parsed, &attachments, &self.config);

        info!(
            "New mail from {} with {} attachment(s)",
            record.from.email,
            record.attachments.len()
        );

        // The mail event goes out before any attachment write is awaited
        self.emit(NotifierEvent::Mail(record)).await;

        if !attachments.is_empty() {
            AttachmentSaver::spawn_writes(&self.config, attachments, self.events.clone());
        }
    }

    async fn emit(&self, event: NotifierEvent) {
        let _ = self.events.send(event).await;
    }
}
