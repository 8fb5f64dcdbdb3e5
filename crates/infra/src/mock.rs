//! # テスト用モック配送
//!
//! ユースケース・ハンドラテストで使用するインメモリのモック配送。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailhub-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mailhub_domain::notification::{DeliveryOutcome, EmailMessage};

use crate::notification::MailTransport;

/// 配送されたメッセージを記録するモック
///
/// `Clone` しても記録先は共有される。テストではクローンをサービスに渡し、
/// 手元に残したハンドルで送信内容と呼び出し回数を検証する。
#[derive(Clone)]
pub struct MockMailTransport {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    outcome: DeliveryOutcome,
}

impl MockMailTransport {
    /// 常に成功するモック
    pub fn new() -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            outcome: DeliveryOutcome::Delivered,
        }
    }

    /// 常に指定の理由で失敗するモック（認証拒否などの再現用）
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            outcome: DeliveryOutcome::failed(reason),
        }
    }

    /// 配送を試みたメッセージ
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// `deliver` の呼び出し回数
    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for MockMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn deliver(&self, message: &EmailMessage) -> DeliveryOutcome {
        self.sent.lock().unwrap().push(message.clone());
        self.outcome.clone()
    }
}
