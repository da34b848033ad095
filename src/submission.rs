//! 一括送信
//!
//! 選択ファイルを読み込み、分類サービスへ1回のリクエストで送る。
//! 結果は常に丸ごと置き換え（前回結果とはマージしない）。

use crate::api::{IntakeApi, UploadPart};
use crate::error::SubmissionError;
use crate::selection::SelectedFile;
use intake_common::ProcessedDocument;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct SubmitOptions {
    pub auto_classify: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self { auto_classify: true }
    }
}

/// 送信結果
#[derive(Debug, Clone, Default)]
pub struct SubmissionOutcome {
    pub documents: Vec<ProcessedDocument>,
    /// サーバーが報告したファイル単位のエラー
    pub file_errors: Vec<String>,
}

/// 送信中フラグ
///
/// キューではない。送信中に再度送ろうとした場合は呼び出し側が弾く。
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    busy: Rc<Cell<bool>>,
}

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// フラグを立てる（既に立っていれば None）
    pub fn acquire(&self) -> Option<BusyGuard> {
        if self.busy.replace(true) {
            return None;
        }
        Some(BusyGuard { busy: Rc::clone(&self.busy) })
    }
}

/// drop時にフラグを下ろす
#[derive(Debug)]
pub struct BusyGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

/// 一括送信クライアント
#[derive(Clone)]
pub struct BatchSubmitter {
    api: Arc<dyn IntakeApi>,
}

impl BatchSubmitter {
    pub fn new(api: Arc<dyn IntakeApi>) -> Self {
        Self { api }
    }

    pub async fn submit(
        &self,
        files: &[SelectedFile],
        options: SubmitOptions,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        // 読めないファイルがあれば送信せずに失敗（部分送信しない）
        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            let bytes = tokio::fs::read(&file.path).await.map_err(|source| {
                SubmissionError::ReadFile {
                    path: file.path.display().to_string(),
                    source,
                }
            })?;
            parts.push(UploadPart {
                file_name: file.file_name.clone(),
                bytes,
            });
        }

        tracing::info!(files = parts.len(), auto_classify = options.auto_classify, "submitting batch");

        let response = self.api.process_batch(parts, options.auto_classify).await?;

        if response.skipped > 0 {
            tracing::warn!(skipped = response.skipped, "malformed documents in response were skipped");
        }
        for error in &response.errors {
            tracing::warn!("server reported file error: {}", error);
        }
        tracing::info!(
            documents = response.documents.len(),
            failed = response.failed_count,
            "batch processed"
        );

        Ok(SubmissionOutcome {
            documents: response.documents,
            file_errors: response.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_flag_guard_releases() {
        let flag = BusyFlag::default();
        assert!(!flag.is_busy());

        {
            let _guard = flag.acquire().expect("最初は取得できる");
            assert!(flag.is_busy());
            assert!(flag.acquire().is_none(), "送信中は二重取得できない");
        }

        assert!(!flag.is_busy());
        assert!(flag.acquire().is_some());
    }

    #[test]
    fn test_busy_flag_shared_between_clones() {
        let flag = BusyFlag::default();
        let other = flag.clone();
        let _guard = flag.acquire().unwrap();
        assert!(other.is_busy());
    }

    #[test]
    fn test_submit_options_default() {
        assert!(SubmitOptions::default().auto_classify);
    }
}
