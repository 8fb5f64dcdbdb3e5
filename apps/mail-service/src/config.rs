//! # Mail Service 設定
//!
//! 環境変数から Mail Service の設定を読み込む。
//! 起動時に一度だけ読み込み、以降は読み取り専用で共有する。

use std::{env, time::Duration};

use mailhub_infra::config::{DEFAULT_STEP_TIMEOUT, MailConfig};
use thiserror::Error;

/// ウェルカムメールの「買い物を始める」ボタンのデフォルトのリンク先
pub const DEFAULT_STOREFRONT_URL: &str = "http://13.60.76.224:8080/";

/// `MAIL_TIMEOUT_SECS` の上限（1 時間）
const MAX_TIMEOUT_SECS: u64 = 3600;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 数値であるべき環境変数が数値として解釈できない
    #[error("{name} は有効な数値である必要があります: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    /// `MAIL_BACKEND` が未知の値
    #[error("MAIL_BACKEND は smtp または noop である必要があります: {0:?}")]
    UnknownBackend(String),
}

/// 送信バックエンド
///
/// `MAIL_BACKEND` 環境変数で切り替える:
/// - `smtp`: メールリレー経由で送信（デフォルト）
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailBackend {
    #[default]
    Smtp,
    Noop,
}

impl MailBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "smtp" => Ok(Self::Smtp),
            "noop" => Ok(Self::Noop),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

/// Mail Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// バインドアドレス
    pub host:           String,
    /// ポート番号
    pub port:           u16,
    /// 送信バックエンド
    pub backend:        MailBackend,
    /// リレー接続設定
    pub mail:           MailConfig,
    /// ウェルカムメール内リンクの遷移先
    pub storefront_url: String,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 未設定の変数はデフォルト値にフォールバックする。
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout = match lookup("MAIL_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_timeout_secs(&value)?),
            None => DEFAULT_STEP_TIMEOUT,
        };

        let mail = MailConfig::new(
            lookup("MAIL_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            parse_number("MAIL_PORT", &lookup("MAIL_PORT").unwrap_or_else(|| "587".to_string()))?,
            lookup("MAIL_USER"),
            lookup("MAIL_PASS"),
        )
        .with_timeout(timeout);

        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number(
                "SERVER_PORT",
                &lookup("SERVER_PORT").unwrap_or_else(|| "8000".to_string()),
            )?,
            backend: lookup("MAIL_BACKEND")
                .map(|value| MailBackend::parse(&value))
                .transpose()?
                .unwrap_or_default(),
            mail,
            storefront_url: lookup("STOREFRONT_URL")
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_STOREFRONT_URL.to_string()),
        })
    }
}

fn parse_timeout_secs(value: &str) -> Result<u64, ConfigError> {
    let secs: u64 = parse_number("MAIL_TIMEOUT_SECS", value)?;
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidNumber {
            name:  "MAIL_TIMEOUT_SECS",
            value: value.to_string(),
        });
    }
    Ok(secs)
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServiceConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn 未設定の場合はデフォルト値を使う() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.backend, MailBackend::Smtp);
        assert_eq!(config.mail.host, "smtp.gmail.com");
        assert_eq!(config.mail.port, 587);
        assert_eq!(config.mail.timeout, Duration::from_secs(30));
        assert_eq!(config.storefront_url, DEFAULT_STOREFRONT_URL);
        assert!(!config.mail.is_configured());
    }

    #[test]
    fn 環境変数の値で上書きされる() {
        let config = load(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9000"),
            ("MAIL_HOST", "relay.example.com"),
            ("MAIL_PORT", "2587"),
            ("MAIL_USER", "shop@example.com"),
            ("MAIL_PASS", "app-password"),
            ("MAIL_TIMEOUT_SECS", "5"),
            ("MAIL_BACKEND", "noop"),
            ("STOREFRONT_URL", "https://shop.example.com/"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.backend, MailBackend::Noop);
        assert_eq!(config.mail.host, "relay.example.com");
        assert_eq!(config.mail.port, 2587);
        assert_eq!(config.mail.timeout, Duration::from_secs(5));
        assert_eq!(config.storefront_url, "https://shop.example.com/");
        assert!(config.mail.is_configured());
    }

    #[rstest]
    #[case("MAIL_PORT", "abc")]
    #[case("MAIL_PORT", "70000")]
    #[case("SERVER_PORT", "-1")]
    #[case("MAIL_TIMEOUT_SECS", "30s")]
    #[case("MAIL_TIMEOUT_SECS", "3601")]
    #[case("MAIL_TIMEOUT_SECS", "9223372036854775807")]
    fn 不正な数値はエラーになる(#[case] name: &str, #[case] value: &str) {
        let result = load(&[(name, value)]);

        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn タイムアウトの上限値は受け付ける() {
        let config = load(&[("MAIL_TIMEOUT_SECS", "3600")]).unwrap();

        assert_eq!(config.mail.timeout, Duration::from_secs(3600));
    }

    #[rstest]
    #[case("smtp", MailBackend::Smtp)]
    #[case("SMTP", MailBackend::Smtp)]
    #[case("noop", MailBackend::Noop)]
    #[case("", MailBackend::Smtp)]
    fn mail_backendをパースできる(#[case] value: &str, #[case] expected: MailBackend) {
        assert_eq!(MailBackend::parse(value), Ok(expected));
    }

    #[test]
    fn 未知のバックエンドはエラーになる() {
        assert_eq!(
            MailBackend::parse("ses"),
            Err(ConfigError::UnknownBackend("ses".to_string()))
        );
    }
}
