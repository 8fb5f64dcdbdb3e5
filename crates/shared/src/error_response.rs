//! # エラーレスポンス（RFC 9457 Problem Details + `success` フラグ）
//!
//! 通知 API のすべての失敗レスポンスで共通の構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - 上流アプリケーションは `success` と `detail` だけを見ればよい
//! - Problem Details のフィールド（`type` / `title` / `status`）は調査用に併記する

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://mailhub.example.com/errors";

/// エラーレスポンス
///
/// ```json
/// {
///   "success": false,
///   "type": "https://mailhub.example.com/errors/delivery-failed",
///   "title": "Delivery Failed",
///   "status": 500,
///   "detail": "Email gönderilemedi"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub success:    bool,
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   ///
   /// `error_type_suffix` はベース URI に付加される（例: `"delivery-failed"`）。
   pub fn new(
      error_type_suffix: &str,
      title: impl Into<String>,
      status: u16,
      detail: impl Into<String>,
   ) -> Self {
      Self {
         success: false,
         error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
         title: title.into(),
         status,
         detail: detail.into(),
      }
   }

   /// 404 Not Found
   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new("not-found", "Not Found", 404, detail)
   }

   /// 422 Validation Error
   pub fn validation_error(detail: impl Into<String>) -> Self {
      Self::new("validation-error", "Validation Error", 422, detail)
   }

   /// 500 Delivery Failed
   ///
   /// detail は呼び出し元が指定する固定文言。リレーの応答や資格情報は含めない。
   pub fn delivery_failed(detail: impl Into<String>) -> Self {
      Self::new("delivery-failed", "Delivery Failed", 500, detail)
   }
}
