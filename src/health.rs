//! 起動時の接続確認
//!
//! 他の処理を待たせない。失敗しても警告を出すだけ。

use crate::api::IntakeApi;
use crate::notify::Notifier;
use intake_common::HealthReport;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const UNREACHABLE_MESSAGE: &str = "⚠️ サーバーに接続できません。backendが起動しているか確認してください";

/// コマンド終了時に確認結果を待つ上限
pub const SETTLE_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    Healthy(HealthReport),
    Unreachable(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy(_))
    }
}

#[derive(Clone)]
pub struct HealthProbe {
    api: Arc<dyn IntakeApi>,
    notifier: Notifier,
}

impl HealthProbe {
    pub fn new(api: Arc<dyn IntakeApi>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    pub async fn check(&self) -> HealthStatus {
        match self.api.health().await {
            Ok(report) => {
                tracing::info!(status = %report.status, service = %report.service, "API health ok");
                HealthStatus::Healthy(report)
            }
            Err(e) => {
                tracing::error!("API connection failed: {}", e);
                self.notifier.warning(UNREACHABLE_MESSAGE);
                HealthStatus::Unreachable(e.to_string())
            }
        }
    }

    /// バックグラウンドで一度だけ確認する
    pub fn spawn(self) -> HealthTask {
        HealthTask {
            handle: tokio::spawn(async move { self.check().await }),
        }
    }
}

/// 実行中の接続確認
///
/// 捨てずに `settle` で終わらせる。
#[must_use]
pub struct HealthTask {
    handle: JoinHandle<HealthStatus>,
}

impl HealthTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 結果を `grace` まで待ち、間に合わなければ中断する
    pub async fn settle(mut self, grace: Duration) -> Option<HealthStatus> {
        match tokio::time::timeout(grace, &mut self.handle).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(e)) => {
                tracing::warn!("health probe task failed: {}", e);
                None
            }
            Err(_) => {
                self.handle.abort();
                tracing::debug!("health probe still pending, aborted");
                None
            }
        }
    }
}
