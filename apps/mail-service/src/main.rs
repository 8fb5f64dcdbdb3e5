//! # Mail Service サーバー
//!
//! 上流アプリケーションから HTTP で通知リクエストを受け取り、
//! 本文を組み立ててメールリレー経由で配送する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SERVER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SERVER_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `MAIL_HOST` | No | リレーのホスト（デフォルト: `smtp.gmail.com`） |
//! | `MAIL_PORT` | No | リレーのポート（デフォルト: `587`） |
//! | `MAIL_USER` | No | 送信アカウント。未設定の場合、送信はすべて失敗する |
//! | `MAIL_PASS` | No | 送信アカウントのパスワード |
//! | `MAIL_TIMEOUT_SECS` | No | ネットワークステップごとのタイムアウト（デフォルト: `30`） |
//! | `MAIL_BACKEND` | No | `smtp`（デフォルト）または `noop` |
//! | `STOREFRONT_URL` | No | ウェルカムメールのリンク先 |
//! | `LOG_FORMAT` | No | `pretty`（デフォルト）または `json` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（実際には送信しない）
//! MAIL_BACKEND=noop cargo run -p mailhub-mail-service
//!
//! # 本番環境
//! MAIL_USER=shop@example.com MAIL_PASS=... cargo run -p mailhub-mail-service --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use mailhub_infra::notification::{MailTransport, NoopMailTransport, SmtpMailTransport};
use mailhub_mail_service::{
    app_builder::{bind_listener, build_app},
    config::{MailBackend, ServiceConfig},
    usecase::{NotificationService, TemplateRenderer},
};
use mailhub_shared::observability::{LogFormat, init_tracing};

const NOT_SET: &str = "NOT SET";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    let config = ServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    // 起動バナー（パスワードは文字数分のアスタリスクのみ）
    tracing::info!("🚀 Email Microservice başlatılıyor...");
    tracing::info!(
        "📧 Mail User: {}",
        config.mail.account.as_deref().unwrap_or(NOT_SET)
    );
    tracing::info!(
        "🔐 Mail Pass: {}",
        config
            .mail
            .secret
            .as_ref()
            .map_or_else(|| NOT_SET.to_string(), |secret| secret.masked())
    );

    let mail_configured = config.mail.is_configured();
    if !mail_configured {
        tracing::warn!("MAIL_USER / MAIL_PASS が未設定です。送信はすべて失敗します");
    }

    // 配送バックエンドの選択
    let transport: Arc<dyn MailTransport> = match config.backend {
        MailBackend::Smtp => {
            tracing::info!(
                relay = %config.mail.host,
                port = config.mail.port,
                "SMTP 配送を使用します"
            );
            Arc::new(SmtpMailTransport::new(Arc::new(config.mail.clone())))
        }
        MailBackend::Noop => {
            tracing::info!("Noop 配送を使用します（メールは送信されません）");
            Arc::new(NoopMailTransport)
        }
    };

    let template_renderer = TemplateRenderer::new(config.storefront_url.clone())
        .context("テンプレートの読み込みに失敗しました")?;
    let service = NotificationService::new(transport, template_renderer);

    let app = build_app(service, mail_configured);

    let listener = bind_listener(&config.host, config.port)
        .await
        .with_context(|| format!("{}:{} にバインドできませんでした", config.host, config.port))?;
    tracing::info!(
        "Mail Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました。処理中のリクエストを完了して停止します");
}
