//! # 配送イベントのログ規約
//!
//! 配送結果を 1 行 1 イベントで出し、`jq` で集計できるようにする。
//! フィールド名はドット区切り（`event.action`、`notification.kind`）で、
//! JSON 出力ではそのままフラットなキーになる。
//!
//! 配送結果だけを抜き出す例:
//!
//! ```bash
//! jq 'select(.["event.kind"] == "business_event") | {action: .["event.action"], to: .["notification.recipient"]}'
//! ```

/// 配送イベントを info レベルで出力する
///
/// `event.kind = "business_event"` を先頭に付ける。呼び出し側は
/// `event.category` / `event.action` / `event.result` を [`event`] の定数で渡す。
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// `event.*` フィールドに入れる値
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// `error.*` フィールドに入れる値
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（メールリレー）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// 設定不備
        pub const CONFIGURATION: &str = "configuration";
        /// テンプレート等の内部処理
        pub const INTERNAL: &str = "internal";
    }

    /// エラー種別
    pub mod kind {
        pub const SMTP: &str = "smtp";
        pub const MISSING_CREDENTIALS: &str = "missing_credentials";
        pub const TEMPLATE: &str = "template";
    }
}
