//! SMTP 配送実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! STARTTLS を必須とし、平文のまま認証情報を送ることはない。

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use mailhub_domain::notification::{BodyFormat, DeliveryOutcome, EmailMessage, NotificationError};
use mailhub_shared::event_log::error as log_error;

use super::MailTransport;
use crate::config::MailConfig;

/// SMTP 配送
///
/// 共有設定 `Arc<MailConfig>` だけを保持し、`deliver` のたびに
/// `AsyncSmtpTransport` を構築する。プール機能は使わないため、接続は
/// 送信完了（または失敗）時に `QUIT` されて破棄される。
pub struct SmtpMailTransport {
    config: Arc<MailConfig>,
}

impl SmtpMailTransport {
    /// 新しい SMTP 配送インスタンスを作成
    pub fn new(config: Arc<MailConfig>) -> Self {
        Self { config }
    }

    /// メッセージを構築して送信する
    async fn try_deliver(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let (account, secret) = self
            .config
            .credentials()
            .ok_or(NotificationError::NotConfigured)?;

        let message = build_message(account, email)?;

        // starttls_relay: TLS 必須（Tls::Required）。サーバーが STARTTLS を
        // 拒否した場合は認証前にエラーになる
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| NotificationError::SendFailed(format!("リレー設定不正: {e}")))?
            .port(self.config.port)
            .credentials(Credentials::new(
                account.to_string(),
                secret.expose().to_string(),
            ))
            .timeout(Some(self.config.timeout))
            .build();

        let deadline = self.config.delivery_deadline();
        tokio::time::timeout(deadline, transport.send(message))
            .await
            .map_err(|_| {
                NotificationError::SendFailed(format!(
                    "SMTP 送信タイムアウト: {}ms 以内に完了しませんでした",
                    deadline.as_millis()
                ))
            })?
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

/// `multipart/alternative` に本文 1 パートだけを持つメッセージを構築する
fn build_message(account: &str, email: &EmailMessage) -> Result<Message, NotificationError> {
    let from: Mailbox = account
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?;
    let to: Mailbox = email
        .to
        .as_str()
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?;

    let content_type = match email.format {
        BodyFormat::Html => ContentType::TEXT_HTML,
        BodyFormat::PlainText => ContentType::TEXT_PLAIN,
    };

    Message::builder()
        .from(from)
        .to(to)
        .subject(&email.subject)
        .multipart(
            MultiPart::alternative().singlepart(
                SinglePart::builder()
                    .header(content_type)
                    .body(email.body.clone()),
            ),
        )
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, message: &EmailMessage) -> DeliveryOutcome {
        match self.try_deliver(message).await {
            Ok(()) => {
                tracing::debug!(
                    to = %message.to,
                    relay = %self.config.host,
                    "SMTP リレーがメッセージを受理"
                );
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                let (category, kind) = match &e {
                    NotificationError::NotConfigured => (
                        log_error::category::CONFIGURATION,
                        log_error::kind::MISSING_CREDENTIALS,
                    ),
                    _ => (log_error::category::EXTERNAL_SERVICE, log_error::kind::SMTP),
                };
                tracing::warn!(
                    error.category = category,
                    error.kind = kind,
                    error = %e,
                    to = %message.to,
                    relay = %self.config.host,
                    "SMTP 配送に失敗"
                );
                DeliveryOutcome::from(e)
            }
        }
    }
}
