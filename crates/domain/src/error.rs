//! # ドメイン層エラー定義
//!
//! 入力値がドメインの不変条件を満たさない場合のエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 422 Unprocessable Entity | 入力値の検証失敗 |
//!
//! ## 使用例
//!
//! ```rust
//! use mailhub_domain::DomainError;
//!
//! fn validate_subject(subject: &str) -> Result<(), DomainError> {
//!     if subject.is_empty() {
//!         return Err(DomainError::Validation("件名は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、クライアントエラーとして返す。
/// 配送処理（`MailTransport`）まで到達することはない。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - 不正なメールアドレス形式
    /// - 負の金額
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
