//! # Mail Service ライブラリ
//!
//! 通知メール送信 API のハンドラ・ユースケース・ルーター構築を公開する。
//! 統合テストからは [`app_builder::build_app`] でルーターを組み立てる。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
