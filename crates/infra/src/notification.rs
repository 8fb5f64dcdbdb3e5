//! # メール配送
//!
//! 1 通のメールをリレーへ届けるインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailTransport` trait で配送を抽象化
//! - **2 つの実装**: SMTP（本番）、Noop（ローカル開発）。テストでは [`crate::mock`] を使う
//! - **結果は値で返す**: 失敗は `DeliveryOutcome::Failed` に変換し、呼び出し元へ伝播させない
//! - **セッションは配送ごと**: 接続はプールせず、1 配送で開いて 1 配送で閉じる

mod noop;
mod smtp;

use async_trait::async_trait;
use mailhub_domain::notification::{DeliveryOutcome, EmailMessage};
pub use noop::NoopMailTransport;
pub use smtp::SmtpMailTransport;

/// メール配送トレイト
///
/// 通知基盤の中核。接続・暗号化・認証・送信・解放の 1 サイクルを抽象化する。
/// 実装はいかなる失敗もパニックやエラーとして返さず、`DeliveryOutcome` に変換する。
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// メールを 1 回だけ配送する（リトライしない）
    async fn deliver(&self, message: &EmailMessage) -> DeliveryOutcome;
}
