//! # メール送信設定
//!
//! リレーへの接続先と送信アカウント。プロセス起動時に一度だけ構築され、
//! `Arc<MailConfig>` としてすべての配送で読み取り専用に共有される。

use std::{fmt, time::Duration};

/// 各ネットワークステップ（接続・STARTTLS・認証・送信）のデフォルトタイムアウト
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// 1 配送あたりのネットワークステップ数
const DELIVERY_STEPS: u32 = 4;

/// 送信アカウントのパスワード
///
/// `Debug` / `Display` では値を出力しない。
#[derive(Clone, PartialEq, Eq)]
pub struct MailSecret(String);

impl MailSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 平文を取得する（認証時のみ使用する）
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// 起動ログ用のマスク表示（長さだけを伝える）
    pub fn masked(&self) -> String {
        "*".repeat(self.0.chars().count())
    }
}

impl fmt::Debug for MailSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MailSecret(***)")
    }
}

/// メール送信設定
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// リレーのホスト名
    pub host:    String,
    /// リレーのポート番号（STARTTLS 用の submission ポートを想定）
    pub port:    u16,
    /// 送信アカウント（`From` ヘッダーにも使う）
    pub account: Option<String>,
    /// 送信アカウントのパスワード
    pub secret:  Option<MailSecret>,
    /// ステップごとのタイムアウト
    pub timeout: Duration,
}

impl MailConfig {
    /// 新しい設定を作成する
    ///
    /// 空文字列のアカウント・パスワードは未設定として扱う。
    pub fn new(
        host: impl Into<String>,
        port: u16,
        account: Option<String>,
        secret: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            account: account.filter(|a| !a.is_empty()),
            secret: secret.filter(|s| !s.is_empty()).map(MailSecret::new),
            timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// タイムアウトを差し替える
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 1 配送全体の上限時間（ステップ数 × ステップごとのタイムアウト）
    ///
    /// 応答を返さないまま停止したリレーでもリクエストが無期限に待たないよう、
    /// lettre のステップ単位のタイムアウトに加えて配送全体をこの時間で打ち切る。
    pub fn delivery_deadline(&self) -> Duration {
        self.timeout.saturating_mul(DELIVERY_STEPS)
    }

    /// アカウントとパスワードが両方設定されているか
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// 認証に使う (アカウント, パスワード) の組
    pub fn credentials(&self) -> Option<(&str, &MailSecret)> {
        match (&self.account, &self.secret) {
            (Some(account), Some(secret)) => Some((account.as_str(), secret)),
            _ => None,
        }
    }
}
