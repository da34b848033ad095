//! 通知モジュール
//!
//! 通知は一つずつ独立したタイマーを持ち、表示から3秒後に消える。
//! 後から出た通知が先の通知を消すことはない。

use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// 通知の表示時間
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Local>,
    expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// 通知の描画先
pub trait NotificationSink: Send + Sync {
    fn show(&self, notification: &Notification);
    fn dismiss(&self, notification: &Notification);
}

/// ターミナルに出力
#[derive(Debug, Default)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn show(&self, notification: &Notification) {
        match notification.severity {
            Severity::Error | Severity::Warning => eprintln!("{}", notification.message),
            Severity::Info | Severity::Success => println!("{}", notification.message),
        }
    }

    fn dismiss(&self, notification: &Notification) {
        tracing::debug!(id = notification.id, "notification expired");
    }
}

/// 表示・消去の履歴をメモリに残す
#[derive(Debug, Default)]
pub struct MemorySink {
    shown: Mutex<Vec<(Severity, String)>>,
    dismissed: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn shown(&self) -> Vec<(Severity, String)> {
        lock(&self.shown).clone()
    }

    pub fn dismissed(&self) -> Vec<String> {
        lock(&self.dismissed).clone()
    }
}

impl NotificationSink for MemorySink {
    fn show(&self, notification: &Notification) {
        lock(&self.shown).push((notification.severity, notification.message.clone()));
    }

    fn dismiss(&self, notification: &Notification) {
        lock(&self.dismissed).push(notification.message.clone());
    }
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    items: Vec<Notification>,
}

/// 通知サービス
#[derive(Clone)]
pub struct Notifier {
    board: Arc<Mutex<Board>>,
    sink: Arc<dyn NotificationSink>,
    display_for: Duration,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_duration(sink, DISPLAY_DURATION)
    }

    pub fn with_duration(sink: Arc<dyn NotificationSink>, display_for: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::default())),
            sink,
            display_for,
        }
    }

    /// 通知を出し、表示時間後の消去を予約する
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        self.prune_expired();

        let notification = {
            let mut board = lock(&self.board);
            board.next_id += 1;
            let notification = Notification {
                id: board.next_id,
                message: message.into(),
                severity,
                created_at: Local::now(),
                expires_at: Instant::now() + self.display_for,
            };
            board.items.push(notification.clone());
            notification
        };

        tracing::debug!(id = notification.id, severity = severity.as_str(), "notify: {}", notification.message);
        self.sink.show(&notification);

        // ランタイム外では消去を予約しない（visibleは期限で判定する）
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let board = Arc::clone(&self.board);
            let sink = Arc::clone(&self.sink);
            let id = notification.id;
            let expires_at = notification.expires_at;
            handle.spawn(async move {
                tokio::time::sleep_until(expires_at).await;
                let removed = {
                    let mut board = lock(&board);
                    board
                        .items
                        .iter()
                        .position(|n| n.id == id)
                        .map(|pos| board.items.remove(pos))
                };
                if let Some(notification) = removed {
                    sink.dismiss(&notification);
                }
            });
        }

        notification.id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Error)
    }

    /// 現在表示中の通知
    pub fn visible(&self) -> Vec<Notification> {
        self.prune_expired();
        lock(&self.board).items.clone()
    }

    /// 期限切れの通知を消す（消去タスクより先に期限を迎えた分も含む）
    fn prune_expired(&self) {
        let now = Instant::now();
        let expired: Vec<Notification> = {
            let mut board = lock(&self.board);
            let (expired, alive): (Vec<Notification>, Vec<Notification>) = std::mem::take(&mut board.items)
                .into_iter()
                .partition(|n| n.is_expired(now));
            board.items = alive;
            expired
        };

        for notification in &expired {
            self.sink.dismiss(notification);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
