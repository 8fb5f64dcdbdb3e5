//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールの HTML 本文を生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **自動エスケープ**: テンプレート名を `.html` で登録し、tera の autoescape で
//!   呼び出し元が渡したすべての文字列（氏名・住所・商品名）をエスケープする
//! - **金額は Rust 側で整形**: 小数 2 桁に丸めた文字列をコンテキストに渡す
//! - **純粋関数**: 同じ入力からは常にバイト単位で同一の HTML を返す

use mailhub_domain::notification::{
    NotificationError,
    NotificationKind,
    OrderLineItem,
    OrderSummary,
    WelcomeData,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tera::{Context, Tera};

/// 金額の後ろに付ける通貨表記
pub const CURRENCY_SUFFIX: &str = "TL";

const WELCOME_TEMPLATE: &str = "welcome.html";
const ORDER_CONFIRMATION_TEMPLATE: &str = "order_confirmation.html";

/// レンダリング対象
///
/// 通知種別ごとに必要なデータを持つ。
#[derive(Debug, Clone, Copy)]
pub enum TemplateData<'a> {
    /// 汎用メール: 呼び出し元の本文をそのまま使う
    Generic(&'a str),
    /// ウェルカムメール
    Welcome(&'a WelcomeData),
    /// 注文確認メール
    OrderConfirmation(&'a OrderSummary),
}

impl TemplateData<'_> {
    /// 通知種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Generic(_) => NotificationKind::Generic,
            Self::Welcome(_) => NotificationKind::Welcome,
            Self::OrderConfirmation(_) => NotificationKind::OrderConfirmation,
        }
    }
}

/// テンプレートに渡す注文明細
#[derive(Debug, Serialize)]
struct OrderItemView<'a> {
    product_name: &'a str,
    size:         &'a str,
    quantity:     u32,
    line_total:   String,
}

impl<'a> From<&'a OrderLineItem> for OrderItemView<'a> {
    fn from(item: &'a OrderLineItem) -> Self {
        Self {
            product_name: &item.product_name,
            size:         &item.size,
            quantity:     item.quantity,
            line_total:   format_amount(item.line_total),
        }
    }
}

/// 金額を小数 2 桁の文字列にする（`150` → `"150.00"`）
///
/// 2 桁を超える精度は 0 から遠い方向に丸める。
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、通知データから HTML 本文を生成する。
pub struct TemplateRenderer {
    engine:         Tera,
    storefront_url: String,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `storefront_url` はウェルカムメールの「買い物を始める」ボタンのリンク先。
    pub fn new(storefront_url: impl Into<String>) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                ("footer.html", include_str!("../../../templates/footer.html")),
                (
                    WELCOME_TEMPLATE,
                    include_str!("../../../templates/welcome.html"),
                ),
                (
                    ORDER_CONFIRMATION_TEMPLATE,
                    include_str!("../../../templates/order_confirmation.html"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self {
            engine,
            storefront_url: storefront_url.into(),
        })
    }

    /// 通知データから本文を生成する
    pub fn render(&self, data: TemplateData<'_>) -> Result<String, NotificationError> {
        match data {
            TemplateData::Generic(body) => Ok(body.to_string()),
            TemplateData::Welcome(welcome) => self.render_welcome(welcome),
            TemplateData::OrderConfirmation(order) => self.render_order_confirmation(order),
        }
    }

    fn render_welcome(&self, data: &WelcomeData) -> Result<String, NotificationError> {
        let mut context = Context::new();
        context.insert("display_name", &data.display_name);
        context.insert("username", &data.username);
        context.insert("storefront_url", &self.storefront_url);

        self.render_template(WELCOME_TEMPLATE, &context)
    }

    fn render_order_confirmation(&self, order: &OrderSummary) -> Result<String, NotificationError> {
        let items: Vec<OrderItemView<'_>> = order.items.iter().map(OrderItemView::from).collect();

        let mut context = Context::new();
        context.insert("order_id", &order.order_id);
        context.insert("customer_name", &order.customer_name);
        context.insert("store_name", &order.store_name);
        context.insert("order_date", &order.order_date);
        context.insert("shipping_address", &order.shipping_address);
        context.insert("items", &items);
        // 合計は明細から再計算しない
        context.insert("grand_total", &format_amount(order.grand_total));
        context.insert("currency", CURRENCY_SUFFIX);

        self.render_template(ORDER_CONFIRMATION_TEMPLATE, &context)
    }

    fn render_template(&self, name: &str, context: &Context) -> Result<String, NotificationError> {
        self.engine
            .render(name, context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))
    }
}
