//! # Mailhub インフラ層
//!
//! メールリレーとの通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **送信設定**: リレーのホスト・ポート・アカウント（[`config::MailConfig`]）
//! - **配送**: 接続 → STARTTLS → 認証 → 送信 → 解放（[`notification::MailTransport`]）
//!
//! ## 依存関係
//!
//! ```text
//! mail-service → infra → domain
//!                  ↘
//!                   shared
//! ```
//!
//! ## 使用例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mailhub_domain::{email::Email, notification::EmailMessage};
//! use mailhub_infra::{
//!     config::MailConfig,
//!     notification::{MailTransport, SmtpMailTransport},
//! };
//!
//! # async fn run() {
//! let config = Arc::new(MailConfig::new("smtp.gmail.com", 587, None, None));
//! let transport = SmtpMailTransport::new(config);
//!
//! let message = EmailMessage::html(Email::new("a@x.com").unwrap(), "Hi", "<p>test</p>");
//! let outcome = transport.deliver(&message).await;
//! assert!(!outcome.succeeded());
//! # }
//! ```

pub mod config;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
