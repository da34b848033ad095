pub mod csv;
pub mod pdf;

use crate::api::IntakeApi;
use crate::error::ExportError;
use crate::notify::Notifier;
use chrono::Utc;
use intake_common::{Category, ExportRequest, ProcessedDocument};
use std::path::PathBuf;
use std::sync::Arc;

/// CSVエクスポート
///
/// 同時に複数のエクスポートが走っても排他しない。
#[derive(Clone)]
pub struct ExportCoordinator {
    api: Arc<dyn IntakeApi>,
    notifier: Notifier,
    download_dir: PathBuf,
}

impl ExportCoordinator {
    pub fn new(api: Arc<dyn IntakeApi>, notifier: Notifier, download_dir: PathBuf) -> Self {
        Self {
            api,
            notifier,
            download_dir,
        }
    }

    /// 書類一覧をCSVで出力してダウンロード先に保存
    ///
    /// 書類が無ければ通信せずに警告を出して `Ok(None)` を返す。
    pub async fn export_csv(
        &self,
        documents: &[ProcessedDocument],
        include_categories: &[Category],
    ) -> Result<Option<PathBuf>, ExportError> {
        if documents.is_empty() {
            self.notifier.warning("⚠️ エクスポートするデータがありません");
            return Ok(None);
        }

        match self.request_and_save(documents, include_categories).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "csv exported");
                self.notifier.success("✅ CSVファイルをダウンロードしました");
                Ok(Some(path))
            }
            Err(e) => {
                tracing::error!("Export error: {}", e);
                self.notifier.error("❌ CSVエクスポート中にエラーが発生しました");
                Err(e)
            }
        }
    }

    async fn request_and_save(
        &self,
        documents: &[ProcessedDocument],
        include_categories: &[Category],
    ) -> Result<PathBuf, ExportError> {
        let request = ExportRequest::csv(documents, include_categories);
        tracing::debug!(documents = request.document_ids.len(), "requesting csv export");

        let bytes = self.api.export_csv(&request).await?;
        let file_name = csv::download_file_name(Utc::now());
        let path = csv::save_artifact(&self.download_dir, &file_name, &bytes).await?;
        Ok(path)
    }

    pub async fn export_pdf(&self, documents: &[ProcessedDocument]) -> Result<PathBuf, ExportError> {
        pdf::export_pdf(documents).await
    }
}
