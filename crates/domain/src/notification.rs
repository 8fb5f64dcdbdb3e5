//! # 通知
//!
//! 通知メールに関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationKind`] | 通知種別 | 汎用 / ウェルカム / 注文確認 |
//! | [`EmailMessage`] | メールメッセージ | 宛先・件名・本文。`MailTransport` に渡される |
//! | [`WelcomeData`] | ウェルカム通知データ | 会員登録直後に送る |
//! | [`OrderSummary`] | 注文サマリー | 注文確定時に送る。明細 [`OrderLineItem`] を所有する |
//! | [`DeliveryOutcome`] | 配送結果 | 成功 / 失敗の 2 値。例外ではなく値で返す |
//!
//! ## 設計方針
//!
//! - **結果は値で返す**: 配送失敗は `DeliveryOutcome::Failed` として呼び出し元に戻る
//! - **合計は再計算しない**: `OrderSummary::grand_total` は呼び出し元の値をそのまま使う
//! - **永続化しない**: すべての型のライフサイクルは 1 リクエスト

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{DomainError, email::Email};

/// 通知処理エラー
///
/// 配送層・テンプレート層の内部で使われ、サービス境界で
/// [`DeliveryOutcome::Failed`] に変換される。
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// 送信アカウントが設定されていない
    #[error("送信アカウントが設定されていません")]
    NotConfigured,
}

/// 通知種別
///
/// どのテンプレートを使うかを決める。構造化ログの `notification.kind` に出力される。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// 汎用メール: 呼び出し元が本文をそのまま渡す
    Generic,
    /// ウェルカムメール: 会員登録時
    Welcome,
    /// 注文確認メール: 注文確定時
    OrderConfirmation,
}

/// 本文の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    #[default]
    Html,
    PlainText,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力、または汎用メールの入力。
/// `MailTransport` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:      Email,
    /// 件名
    pub subject: String,
    /// 本文
    pub body:    String,
    /// 本文の形式
    pub format:  BodyFormat,
}

impl EmailMessage {
    /// HTML 本文のメッセージを作成する
    pub fn html(to: Email, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
            format: BodyFormat::Html,
        }
    }

    /// プレーンテキスト本文のメッセージを作成する
    pub fn plain_text(to: Email, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
            format: BodyFormat::PlainText,
        }
    }
}

/// ウェルカム通知データ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeData {
    /// ログイン用ユーザー名
    pub username:     String,
    /// 表示名（挨拶文に使う）
    pub display_name: String,
}

/// 注文明細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineItem {
    pub product_name: String,
    pub size:         String,
    pub quantity:     u32,
    pub unit_price:   Decimal,
    pub line_total:   Decimal,
}

impl OrderLineItem {
    /// 注文明細を作成する
    ///
    /// # エラー
    ///
    /// 単価・小計が負の場合は `DomainError::Validation` を返す。
    pub fn new(
        product_name: impl Into<String>,
        size: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        line_total: Decimal,
    ) -> Result<Self, DomainError> {
        ensure_non_negative("birim_fiyat", unit_price)?;
        ensure_non_negative("toplam_fiyat", line_total)?;

        Ok(Self {
            product_name: product_name.into(),
            size: size.into(),
            quantity,
            unit_price,
            line_total,
        })
    }
}

/// 注文サマリー
///
/// `grand_total` は明細から再計算せず、呼び出し元が渡した値を信頼する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id:         i64,
    pub customer_name:    String,
    pub store_name:       String,
    pub grand_total:      Decimal,
    pub shipping_address: String,
    pub order_date:       String,
    pub items:            Vec<OrderLineItem>,
}

impl OrderSummary {
    /// 注文サマリーを作成する
    ///
    /// # エラー
    ///
    /// 合計金額が負の場合は `DomainError::Validation` を返す。
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: i64,
        customer_name: impl Into<String>,
        store_name: impl Into<String>,
        grand_total: Decimal,
        shipping_address: impl Into<String>,
        order_date: impl Into<String>,
        items: Vec<OrderLineItem>,
    ) -> Result<Self, DomainError> {
        ensure_non_negative("toplam_tutar", grand_total)?;

        Ok(Self {
            order_id,
            customer_name: customer_name.into(),
            store_name: store_name.into(),
            grand_total,
            shipping_address: shipping_address.into(),
            order_date: order_date.into(),
            items,
        })
    }
}

fn ensure_non_negative(field: &str, value: Decimal) -> Result<(), DomainError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::Validation(format!(
            "{field} は 0 以上である必要があります"
        )));
    }
    Ok(())
}

/// 配送結果
///
/// `MailTransport` と `NotificationService` の戻り値。
/// 失敗は例外として伝播させず、このバリアントで呼び出し元に返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// リレーがメッセージを受理した
    Delivered,
    /// いずれかのステップで失敗した（`reason` に資格情報は含まれない）
    Failed { reason: String },
}

impl DeliveryOutcome {
    /// 失敗結果を作成する
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// 配送に成功したかどうか
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// 診断メッセージ
    pub fn message(&self) -> &str {
        match self {
            Self::Delivered => "delivered",
            Self::Failed { reason } => reason,
        }
    }
}

impl From<NotificationError> for DeliveryOutcome {
    fn from(error: NotificationError) -> Self {
        Self::failed(error.to_string())
    }
}
