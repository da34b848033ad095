//! 分類サービスAPI
//!
//! エンドポイント（すべて base URL 配下）:
//! - GET  /health
//! - POST /ocr/process-batch（multipart: files[], auto_classify）
//! - POST /documents/export/csv（JSON）

mod http;

pub use http::HttpIntakeApi;

use crate::error::{ExportError, HealthError, SubmissionError};
use async_trait::async_trait;
use intake_common::{BatchResponse, ExportRequest, HealthReport};

/// multipartの1ファイル分
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait IntakeApi: Send + Sync {
    /// 書類を一括送信して分類結果を受け取る
    async fn process_batch(
        &self,
        files: Vec<UploadPart>,
        auto_classify: bool,
    ) -> Result<BatchResponse, SubmissionError>;

    /// エクスポート成果物（CSVバイト列）を取得
    async fn export_csv(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError>;

    async fn health(&self) -> Result<HealthReport, HealthError>;
}
