//! # Mail Service エラー定義
//!
//! Mail Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use mailhub_domain::DomainError;
use mailhub_shared::ErrorResponse;
use thiserror::Error;

/// 配送失敗時にクライアントへ返す固定文言
pub const DELIVERY_FAILED_DETAIL: &str = "Email gönderilemedi";

/// Mail Service で発生するエラー
#[derive(Debug, Error)]
pub enum MailServiceError {
   /// リクエストの形式・値が不正（配送は試みない）
   #[error("不正なリクエスト: {0}")]
   Validation(String),

   /// 配送に失敗した（理由はログにのみ出力する）
   #[error("配送に失敗: {0}")]
   DeliveryFailed(String),
}

impl From<DomainError> for MailServiceError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => Self::Validation(msg),
      }
   }
}

impl IntoResponse for MailServiceError {
   fn into_response(self) -> Response {
      let body = match &self {
         MailServiceError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
         MailServiceError::DeliveryFailed(reason) => {
            tracing::error!(error = %reason, "メール配送に失敗");
            ErrorResponse::delivery_failed(DELIVERY_FAILED_DETAIL)
         }
      };

      let status =
         StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (status, Json(body)).into_response()
   }
}
