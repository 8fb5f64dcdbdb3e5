//! # ヘルスチェックハンドラ
//!
//! Mail Service の稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /        サービス情報
//! GET /health  稼働状態と送信設定の有無
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "mail_configured": true
//! }
//! ```

use std::sync::Arc;

use axum::{Json, extract::State};
use mailhub_shared::{HealthResponse, ServiceInfoResponse};

/// サービス名（`GET /` で返す）
pub const SERVICE_NAME: &str = "Email Microservice";

/// ヘルスチェックの共有状態
pub struct HealthState {
    /// 送信アカウントとパスワードが両方設定されているか
    pub mail_configured: bool,
}

/// サービス情報エンドポイント
pub async fn root_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse::running(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
    ))
}

/// ヘルスチェックエンドポイント
///
/// 送信設定が欠けていても `healthy` を返す。設定の欠落は
/// `mail_configured: false` で事前に知らせる。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.mail_configured))
}
