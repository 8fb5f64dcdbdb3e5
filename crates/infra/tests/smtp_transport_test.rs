//! # SMTP 配送の統合テスト
//!
//! ローカルに立てた最小限の偽リレーに対して `SmtpMailTransport` を動かし、
//! 失敗が `DeliveryOutcome::Failed` に変換されることを検証する。
//!
//! - 接続拒否 → Failed
//! - STARTTLS 非対応のリレー → 認証情報を送らずに Failed
//! - 応答しないリレー → 配送全体の上限時間で Failed
//! - 巨大なタイムアウト設定 → パニックせず Failed

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use mailhub_domain::{email::Email, notification::EmailMessage};
use mailhub_infra::{
    config::MailConfig,
    notification::{MailTransport, SmtpMailTransport},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
};

const SECRET: &str = "very-secret-app-password";

fn make_message() -> EmailMessage {
    EmailMessage::html(
        Email::new("ali@example.com").unwrap(),
        "Hi",
        "<p>test</p>",
    )
}

fn make_transport(addr: SocketAddr) -> SmtpMailTransport {
    let config = MailConfig::new(
        addr.ip().to_string(),
        addr.port(),
        Some("shop@example.com".to_string()),
        Some(SECRET.to_string()),
    )
    .with_timeout(Duration::from_millis(300));
    SmtpMailTransport::new(Arc::new(config))
}

/// STARTTLS を広告しない偽リレーを起動する
///
/// 受信したコマンド行を記録し、EHLO 以外には 502 を返す。
async fn spawn_plaintext_relay() -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        if writer
            .write_all(b"220 fake.relay ESMTP ready\r\n")
            .await
            .is_err()
        {
            return;
        }

        while let Ok(Some(line)) = lines.next_line().await {
            log.lock().unwrap().push(line.clone());
            let command = line.to_ascii_uppercase();
            let reply: &[u8] = if command.starts_with("EHLO") || command.starts_with("HELO") {
                b"250-fake.relay\r\n250 AUTH PLAIN LOGIN\r\n"
            } else if command.starts_with("QUIT") {
                b"221 bye\r\n"
            } else {
                b"502 5.5.1 command not implemented\r\n"
            };
            if writer.write_all(reply).await.is_err() || command.starts_with("QUIT") {
                break;
            }
        }
    });

    (addr, received)
}

#[tokio::test]
async fn test_接続拒否はfailedになる() {
    // 空きポートを確保してすぐ閉じる
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = make_transport(addr).deliver(&make_message()).await;

    assert!(!outcome.succeeded());
    assert!(!outcome.message().contains(SECRET));
}

#[tokio::test]
async fn test_starttls非対応のリレーには認証情報を送らない() {
    let (addr, received) = spawn_plaintext_relay().await;

    let outcome = make_transport(addr).deliver(&make_message()).await;

    assert!(!outcome.succeeded(), "平文のリレーでは配送が成功しないこと");
    assert!(!outcome.message().contains(SECRET));

    let received = received.lock().unwrap().clone();
    assert!(
        received
            .iter()
            .all(|line| !line.to_ascii_uppercase().starts_with("AUTH")),
        "暗号化前に AUTH コマンドが送られないこと: {received:?}"
    );
    assert!(
        received
            .iter()
            .all(|line| !line.to_ascii_uppercase().starts_with("MAIL FROM")),
        "暗号化前に MAIL FROM が送られないこと: {received:?}"
    );
}

#[tokio::test]
async fn test_応答しないリレーは上限時間内にfailedになる() {
    // 接続は受け付けるが挨拶を返さない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let Ok((_stream, _)) = listener.accept().await else {
            return;
        };
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let started = Instant::now();
    let outcome = make_transport(addr).deliver(&make_message()).await;

    assert!(!outcome.succeeded());
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "配送全体の上限時間で打ち切られること"
    );
}

#[tokio::test]
async fn test_巨大なタイムアウト設定でもパニックせずfailedになる() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = MailConfig::new(
        addr.ip().to_string(),
        addr.port(),
        Some("shop@example.com".to_string()),
        Some(SECRET.to_string()),
    )
    .with_timeout(Duration::from_secs(u64::MAX / 2));
    let transport = SmtpMailTransport::new(Arc::new(config));

    let outcome = transport.deliver(&make_message()).await;

    assert!(!outcome.succeeded());
}
