//! Noop 配送実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! `MAIL_BACKEND=noop` でローカル開発時に使用する。

use async_trait::async_trait;
use mailhub_domain::notification::{DeliveryOutcome, EmailMessage};

use super::MailTransport;

/// Noop 配送（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopMailTransport;

#[async_trait]
impl MailTransport for NoopMailTransport {
    async fn deliver(&self, message: &EmailMessage) -> DeliveryOutcome {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "Noop: メール送信をスキップ"
        );
        DeliveryOutcome::Delivered
    }
}
