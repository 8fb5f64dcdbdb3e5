//! # 通知サービス
//!
//! テンプレートレンダリング → 配送を統合するサービス。
//!
//! ## 設計方針
//!
//! - **結果は値で返す**: 各操作は `DeliveryOutcome` を返し、失敗をエラーとして伝播させない
//! - **状態を持たない**: 各呼び出しは独立しており、共有するのは読み取り専用の依存だけ
//! - **リトライしない**: 1 回の試行の結果をそのまま返す
//! - **依存性注入**: `MailTransport` は trait で抽象化

use std::sync::Arc;

use mailhub_domain::{
    email::Email,
    notification::{
        DeliveryOutcome,
        EmailMessage,
        NotificationKind,
        OrderSummary,
        WelcomeData,
    },
};
use mailhub_infra::notification::MailTransport;
use mailhub_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};

use super::{TemplateRenderer, template_renderer::TemplateData};

/// ウェルカムメールの件名
pub const WELCOME_SUBJECT: &str = "🎉 Mağaza Sistemine Hoş Geldiniz!";

/// 注文確認メールの件名
pub fn order_confirmation_subject(order_id: i64) -> String {
    format!("🛒 Sipariş Onayı - #{order_id}")
}

/// 通知サービス
///
/// 通知種別ごとに本文を用意し、`MailTransport` に 1 回だけ配送させる。
pub struct NotificationService {
    transport:         Arc<dyn MailTransport>,
    template_renderer: TemplateRenderer,
}

impl NotificationService {
    pub fn new(transport: Arc<dyn MailTransport>, template_renderer: TemplateRenderer) -> Self {
        Self {
            transport,
            template_renderer,
        }
    }

    /// 汎用メールを送信する
    ///
    /// 本文はレンダリングせず、呼び出し元が渡したものをそのまま配送する。
    pub async fn send_generic(&self, message: EmailMessage) -> DeliveryOutcome {
        self.deliver(NotificationKind::Generic, &message).await
    }

    /// ウェルカムメールを送信する
    pub async fn send_welcome(&self, to: Email, data: WelcomeData) -> DeliveryOutcome {
        self.render_and_deliver(to, WELCOME_SUBJECT.to_string(), TemplateData::Welcome(&data))
            .await
    }

    /// 注文確認メールを送信する
    pub async fn send_order_confirmation(&self, to: Email, order: OrderSummary) -> DeliveryOutcome {
        let subject = order_confirmation_subject(order.order_id);
        self.render_and_deliver(to, subject, TemplateData::OrderConfirmation(&order))
            .await
    }

    async fn render_and_deliver(
        &self,
        to: Email,
        subject: String,
        data: TemplateData<'_>,
    ) -> DeliveryOutcome {
        let kind = data.kind();

        let body = match self.template_renderer.render(data) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::INTERNAL,
                    error.kind = log_error::kind::TEMPLATE,
                    error = %e,
                    notification.kind = %kind,
                    "通知テンプレートのレンダリングに失敗"
                );
                let outcome = DeliveryOutcome::from(e);
                record(kind, &to, &subject, &outcome);
                return outcome;
            }
        };

        let message = EmailMessage::html(to, subject, body);
        self.deliver(kind, &message).await
    }

    async fn deliver(&self, kind: NotificationKind, message: &EmailMessage) -> DeliveryOutcome {
        let outcome = self.transport.deliver(message).await;
        record(kind, &message.to, &message.subject, &outcome);
        outcome
    }
}

/// 配送結果をビジネスイベントとして記録する
fn record(kind: NotificationKind, to: &Email, subject: &str, outcome: &DeliveryOutcome) {
    let kind: &str = kind.into();
    match outcome {
        DeliveryOutcome::Delivered => {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.result = event::result::SUCCESS,
                notification.kind = kind,
                notification.recipient = %to,
                notification.subject = subject,
                "✅ Email gönderildi"
            );
        }
        DeliveryOutcome::Failed { reason } => {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.result = event::result::FAILURE,
                notification.kind = kind,
                notification.recipient = %to,
                notification.subject = subject,
                error = %reason,
                "❌ Email gönderilemedi"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use mailhub_domain::notification::{BodyFormat, OrderLineItem};
    use mailhub_infra::mock::MockMailTransport;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    fn make_service(transport: MockMailTransport) -> NotificationService {
        let template_renderer = TemplateRenderer::new("http://shop.example.com/").unwrap();
        NotificationService::new(Arc::new(transport), template_renderer)
    }

    fn to() -> Email {
        Email::new("a@x.com").unwrap()
    }

    fn make_order() -> OrderSummary {
        let items = vec![
            OrderLineItem::new(
                "Keten Gömlek",
                "L",
                2,
                Decimal::from(50),
                Decimal::from(100),
            )
            .unwrap(),
            OrderLineItem::new("Kot Pantolon", "32", 1, Decimal::from(50), Decimal::from(50))
                .unwrap(),
        ];
        OrderSummary::new(
            42,
            "Ali Veli",
            "Merkez Mağaza",
            Decimal::new(15000, 2),
            "Atatürk Cad. 1, Ankara",
            "2026-10-19",
            items,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn 汎用メールは本文をそのまま配送する() {
        let transport = MockMailTransport::new();
        let service = make_service(transport.clone());

        let outcome = service
            .send_generic(EmailMessage::html(to(), "Hi", "<p>test</p>"))
            .await;

        assert!(outcome.succeeded());
        let sent = transport.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.as_str(), "a@x.com");
        assert_eq!(sent[0].subject, "Hi");
        assert_eq!(sent[0].body, "<p>test</p>");
        assert_eq!(sent[0].format, BodyFormat::Html);
    }

    #[tokio::test]
    async fn ウェルカムメールはユーザー名と表示名を含む() {
        let transport = MockMailTransport::new();
        let service = make_service(transport.clone());

        let outcome = service
            .send_welcome(
                to(),
                WelcomeData {
                    username:     "user1".to_string(),
                    display_name: "Ali".to_string(),
                },
            )
            .await;

        assert!(outcome.succeeded());
        let sent = transport.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, WELCOME_SUBJECT);
        assert!(sent[0].body.contains("user1"));
        assert!(sent[0].body.contains("Ali"));
    }

    #[tokio::test]
    async fn 注文確認メールは明細行と合計と注文番号を含む() {
        let transport = MockMailTransport::new();
        let service = make_service(transport.clone());

        let outcome = service.send_order_confirmation(to(), make_order()).await;

        assert!(outcome.succeeded());
        let sent = transport.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "🛒 Sipariş Onayı - #42");
        assert!(sent[0].subject.contains("42"));
        assert_eq!(
            sent[0].body.matches(r#"<tr class="order-item">"#).count(),
            2
        );
        assert!(sent[0].body.contains("150.00 TL"));
    }

    #[tokio::test]
    async fn 認証拒否はfailedとして返る() {
        let transport =
            MockMailTransport::failing("SMTP 送信失敗: permanent error (535): authentication failed");
        let service = make_service(transport.clone());

        let outcome = service
            .send_welcome(
                to(),
                WelcomeData {
                    username:     "user1".to_string(),
                    display_name: "Ali".to_string(),
                },
            )
            .await;

        assert!(!outcome.succeeded());
        assert!(outcome.message().contains("535"));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn 注文確認の件名に注文番号が入る() {
        assert_eq!(order_confirmation_subject(7), "🛒 Sipariş Onayı - #7");
    }
}
