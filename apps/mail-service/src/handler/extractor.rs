//! # 検証付き JSON エクストラクタ
//!
//! JSON のデシリアライズと `validator` による検証をまとめて行い、
//! どちらかに失敗した場合は 422 の [`MailServiceError::Validation`] で拒否する。
//! 拒否されたリクエストは配送層に到達しない。

use axum::{
   Json,
   extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::MailServiceError;

/// 検証済みの JSON リクエストボディ
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
   T: DeserializeOwned + Validate + Send,
   S: Send + Sync,
{
   type Rejection = MailServiceError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let Json(value) = Json::<T>::from_request(req, state)
         .await
         .map_err(|rejection| MailServiceError::Validation(rejection.body_text()))?;

      value
         .validate()
         .map_err(|errors| MailServiceError::Validation(describe(&errors)))?;

      Ok(Self(value))
   }
}

/// 検証エラーを `field: message` 形式の 1 行にまとめる
///
/// ネストした構造体は `kalemler[0].birim_fiyat` のようなパスで表す。
fn describe(errors: &ValidationErrors) -> String {
   let mut messages = Vec::new();
   collect("", errors, &mut messages);
   messages.sort();
   messages.join(", ")
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
   for (field, kind) in errors.errors() {
      let path = if prefix.is_empty() {
         field.to_string()
      } else {
         format!("{prefix}.{field}")
      };

      match kind {
         ValidationErrorsKind::Field(field_errors) => {
            out.extend(field_errors.iter().map(|error| {
               let message = error.message.as_deref().unwrap_or(&*error.code);
               format!("{path}: {message}")
            }));
         }
         ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
         ValidationErrorsKind::List(items) => {
            for (index, inner) in items {
               collect(&format!("{path}[{index}]"), inner, out);
            }
         }
      }
   }
}
