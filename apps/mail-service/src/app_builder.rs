//! # Mail Service アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Json,
    Router,
    http::StatusCode,
    routing::{get, post},
};
use mailhub_shared::ErrorResponse;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        EmailState,
        HealthState,
        health_check,
        root_info,
        send_generic_email,
        send_order_email,
        send_welcome_email,
    },
    usecase::NotificationService,
};

/// ルーターを構築する
///
/// `mail_configured` は `/health` でそのまま返す。
pub fn build_app(service: NotificationService, mail_configured: bool) -> Router {
    let health_state = Arc::new(HealthState { mail_configured });
    let email_state = Arc::new(EmailState { service });

    Router::new()
        .route("/", get(root_info))
        .route("/health", get(health_check))
        .with_state(health_state)
        .route("/api/email/send", post(send_generic_email))
        .route("/api/email/welcome", post(send_welcome_email))
        .route("/api/email/order", post(send_order_email))
        .with_state(email_state)
        .fallback(not_found)
        // オリジンを制限しない（資格情報付きリクエストも許可）
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

/// 未定義のパスには共通形式の 404 を返す
async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("İstenen kaynak bulunamadı")),
    )
}

/// 待ち受けソケットを開く
///
/// ホスト名・IPv4・IPv6 のいずれも受け付ける（`::` は角括弧なしで渡す）。
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}
