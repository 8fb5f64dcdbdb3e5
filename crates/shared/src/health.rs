//! # ヘルスチェック共通型
//!
//! `GET /` と `GET /health` のレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// サービス情報レスポンス（`GET /`）
///
/// ## 使用例
///
/// ```
/// use mailhub_shared::ServiceInfoResponse;
///
/// let response = ServiceInfoResponse::running("Email Microservice", "1.0.0");
/// assert_eq!(response.status, "running");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    /// 稼働状態（常に `"running"`）
    pub status:  String,
    /// サービス名
    pub service: String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

impl ServiceInfoResponse {
    pub fn running(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status:  "running".to_string(),
            service: service.into(),
            version: version.into(),
        }
    }
}

/// ヘルスチェックレスポンス（`GET /health`）
///
/// `mail_configured` は送信アカウントとパスワードが両方設定されているかを示す。
/// 値そのものは決して含めない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"`）
    pub status:          String,
    /// メール送信設定が揃っているか
    pub mail_configured: bool,
}

impl HealthResponse {
    pub fn healthy(mail_configured: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            mail_configured,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_service_info_responseのserializeで正しいjson形状にする() {
        let response = ServiceInfoResponse::running("Email Microservice", "1.0.0");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "running",
                "service": "Email Microservice",
                "version": "1.0.0"
            })
        );
    }

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let json = serde_json::to_value(HealthResponse::healthy(false)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "mail_configured": false
            })
        );
    }
}
