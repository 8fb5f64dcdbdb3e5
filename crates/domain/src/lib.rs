//! # Mailhub ドメイン層
//!
//! 通知メールの合成に必要なドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! mail-service → infra → domain
//! ```
//!
//! ドメイン層は SMTP や HTTP には一切依存しない。
//! 配送結果も例外ではなく値（[`notification::DeliveryOutcome`]）で表現する。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`email`] - メールアドレス値オブジェクト
//! - [`notification`] - 通知種別、メッセージ、配送結果
//!
//! ## 使用例
//!
//! ```rust
//! use mailhub_domain::{DomainError, email::Email};
//!
//! let email = Email::new("ali@example.com").unwrap();
//! assert_eq!(email.as_str(), "ali@example.com");
//!
//! assert!(matches!(
//!     Email::new("not-an-email"),
//!     Err(DomainError::Validation(_))
//! ));
//! ```

pub mod email;
pub mod error;
pub mod notification;

pub use error::DomainError;
