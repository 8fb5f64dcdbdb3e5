//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、本文の組み立てと配送は `NotificationService` に委譲

pub mod email;
pub mod extractor;
pub mod health;

pub use email::{EmailState, send_generic_email, send_order_email, send_welcome_email};
pub use extractor::ValidatedJson;
pub use health::{HealthState, health_check, root_info};
