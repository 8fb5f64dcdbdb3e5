//! # メール送信ハンドラ
//!
//! 上流アプリケーション（会員登録・注文処理）から呼ばれる送信 API。
//!
//! ## エンドポイント
//!
//! - `POST /api/email/send` - 汎用メール
//! - `POST /api/email/welcome` - ウェルカムメール
//! - `POST /api/email/order` - 注文確認メール
//!
//! リクエストの JSON フィールド名は上流アプリケーションとの契約のため変更しない。

use std::sync::Arc;

use axum::{Json, extract::State};
use mailhub_domain::{
   DomainError,
   email::Email,
   notification::{DeliveryOutcome, EmailMessage, OrderLineItem, OrderSummary, WelcomeData},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::ValidatedJson;
use crate::{error::MailServiceError, usecase::NotificationService};

/// 汎用メール送信成功時のメッセージ
pub const GENERIC_SENT_MESSAGE: &str = "Email başarıyla gönderildi";
/// ウェルカムメール送信成功時のメッセージ
pub const WELCOME_SENT_MESSAGE: &str = "Hoşgeldin emaili gönderildi";
/// 注文確認メール送信成功時のメッセージ
pub const ORDER_SENT_MESSAGE: &str = "Sipariş özeti emaili gönderildi";

const INVALID_EMAIL_MESSAGE: &str = "geçersiz e-posta adresi";

/// メール送信 API の共有状態
pub struct EmailState {
   pub service: NotificationService,
}

// --- リクエスト/レスポンス型 ---

fn default_is_html() -> bool {
   true
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
   if value.is_sign_negative() && !value.is_zero() {
      let mut error = ValidationError::new("non_negative");
      error.message = Some("0 veya daha büyük olmalıdır".into());
      return Err(error);
   }
   Ok(())
}

/// 汎用メール送信リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct SendEmailRequest {
   #[validate(email(message = "geçersiz e-posta adresi"))]
   pub to:      String,
   pub subject: String,
   pub body:    String,
   /// `false` の場合はプレーンテキストとして送る
   #[serde(default = "default_is_html")]
   pub is_html: bool,
}

/// ウェルカムメール送信リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct WelcomeEmailRequest {
   #[validate(email(message = "geçersiz e-posta adresi"))]
   pub to:            String,
   pub kullanici_adi: String,
   pub ad:            String,
}

/// 注文明細
#[derive(Debug, Deserialize, Validate)]
pub struct OrderItemRequest {
   pub urun_ad:      String,
   pub beden:        String,
   pub adet:         u32,
   #[validate(custom(function = "non_negative"))]
   pub birim_fiyat:  Decimal,
   #[validate(custom(function = "non_negative"))]
   pub toplam_fiyat: Decimal,
}

/// 注文確認メール送信リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct OrderEmailRequest {
   #[validate(email(message = "geçersiz e-posta adresi"))]
   pub to:              String,
   pub siparis_id:      i64,
   pub musteri_ad:      String,
   pub magaza_ad:       String,
   #[validate(custom(function = "non_negative"))]
   pub toplam_tutar:    Decimal,
   pub teslimat_adresi: String,
   pub siparis_tarihi:  String,
   #[validate(nested)]
   pub kalemler:        Vec<OrderItemRequest>,
}

impl OrderEmailRequest {
   fn into_summary(self) -> Result<OrderSummary, DomainError> {
      let items = self
         .kalemler
         .into_iter()
         .map(|item| {
            OrderLineItem::new(
               item.urun_ad,
               item.beden,
               item.adet,
               item.birim_fiyat,
               item.toplam_fiyat,
            )
         })
         .collect::<Result<Vec<_>, _>>()?;

      OrderSummary::new(
         self.siparis_id,
         self.musteri_ad,
         self.magaza_ad,
         self.toplam_tutar,
         self.teslimat_adresi,
         self.siparis_tarihi,
         items,
      )
   }
}

/// 送信成功レスポンス
#[derive(Debug, Serialize)]
pub struct EmailResponse {
   pub success: bool,
   pub message: String,
}

fn parse_recipient(to: &str) -> Result<Email, MailServiceError> {
   Email::new(to).map_err(|_| MailServiceError::Validation(format!("to: {INVALID_EMAIL_MESSAGE}")))
}

/// 配送結果を HTTP レスポンスに変換する
fn respond(
   outcome: DeliveryOutcome,
   message: &str,
) -> Result<Json<EmailResponse>, MailServiceError> {
   match outcome {
      DeliveryOutcome::Delivered => Ok(Json(EmailResponse {
         success: true,
         message: message.to_string(),
      })),
      DeliveryOutcome::Failed { reason } => Err(MailServiceError::DeliveryFailed(reason)),
   }
}

// --- ハンドラ ---

/// POST /api/email/send
///
/// 呼び出し元が用意した本文をそのまま送る。
pub async fn send_generic_email(
   State(state): State<Arc<EmailState>>,
   ValidatedJson(req): ValidatedJson<SendEmailRequest>,
) -> Result<Json<EmailResponse>, MailServiceError> {
   let to = parse_recipient(&req.to)?;
   let message = if req.is_html {
      EmailMessage::html(to, req.subject, req.body)
   } else {
      EmailMessage::plain_text(to, req.subject, req.body)
   };

   let outcome = state.service.send_generic(message).await;
   respond(outcome, GENERIC_SENT_MESSAGE)
}

/// POST /api/email/welcome
///
/// 会員登録直後に呼ばれる。
pub async fn send_welcome_email(
   State(state): State<Arc<EmailState>>,
   ValidatedJson(req): ValidatedJson<WelcomeEmailRequest>,
) -> Result<Json<EmailResponse>, MailServiceError> {
   let to = parse_recipient(&req.to)?;
   let data = WelcomeData {
      username:     req.kullanici_adi,
      display_name: req.ad,
   };

   let outcome = state.service.send_welcome(to, data).await;
   respond(outcome, WELCOME_SENT_MESSAGE)
}

/// POST /api/email/order
///
/// 注文確定時に呼ばれる。合計金額は明細から再計算しない。
pub async fn send_order_email(
   State(state): State<Arc<EmailState>>,
   ValidatedJson(req): ValidatedJson<OrderEmailRequest>,
) -> Result<Json<EmailResponse>, MailServiceError> {
   let to = parse_recipient(&req.to)?;
   let order = req.into_summary()?;

   let outcome = state.service.send_order_confirmation(to, order).await;
   respond(outcome, ORDER_SENT_MESSAGE)
}
