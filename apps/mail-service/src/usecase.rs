//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジック。
//!
//! - [`notification`] - 通知メールの合成と配送

pub mod notification;

pub use notification::{NotificationService, TemplateRenderer};
