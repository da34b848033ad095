use crate::error::ExportError;
use intake_common::ProcessedDocument;
use std::path::PathBuf;

// TODO: サーバー側に /documents/export/pdf ができたらCSVと同じ経路で実装する
pub async fn export_pdf(_documents: &[ProcessedDocument]) -> Result<PathBuf, ExportError> {
    Err(ExportError::PdfUnsupported)
}
