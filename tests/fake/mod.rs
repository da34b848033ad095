//! テスト用の偽API

#![allow(dead_code)]

use async_trait::async_trait;
use intake::api::{IntakeApi, UploadPart};
use intake::error::{ExportError, HealthError, SubmissionError};
use intake_common::{BatchResponse, ExportRequest, HealthReport, ProcessedDocument};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 送信ごとの応答
pub enum FakeBatch {
    Ok(BatchResponse),
    Status(u16),
}

#[derive(Default)]
pub struct FakeApi {
    pub batches: Mutex<VecDeque<FakeBatch>>,
    pub submit_calls: AtomicUsize,
    pub export_calls: AtomicUsize,
    pub uploaded: Mutex<Vec<(Vec<String>, bool)>>,
    pub last_export: Mutex<Option<Value>>,
    pub export_status: Option<u16>,
    pub healthy: bool,
    /// health が応答を返さない
    pub health_hangs: bool,
}

impl FakeApi {
    pub fn healthy() -> Self {
        Self { healthy: true, ..Default::default() }
    }

    pub fn push_documents(&self, documents: Vec<ProcessedDocument>) {
        let response = BatchResponse {
            success: true,
            processed_count: documents.len(),
            documents,
            ..Default::default()
        };
        self.push(FakeBatch::Ok(response));
    }

    pub fn push(&self, batch: FakeBatch) {
        self.batches.lock().unwrap().push_back(batch);
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn export_count(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntakeApi for FakeApi {
    async fn process_batch(
        &self,
        files: Vec<UploadPart>,
        auto_classify: bool,
    ) -> Result<BatchResponse, SubmissionError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        let names = files.iter().map(|f| f.file_name.clone()).collect();
        self.uploaded.lock().unwrap().push((names, auto_classify));

        match self.batches.lock().unwrap().pop_front() {
            Some(FakeBatch::Ok(response)) => Ok(response),
            Some(FakeBatch::Status(code)) => Err(SubmissionError::Status(code)),
            None => Ok(BatchResponse::default()),
        }
    }

    async fn export_csv(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_export.lock().unwrap() = Some(serde_json::to_value(request).unwrap());

        if let Some(code) = self.export_status {
            return Err(ExportError::Status(code));
        }
        Ok(format!("区分,元ファイル\n件数,{}\n", request.document_ids.len()).into_bytes())
    }

    async fn health(&self) -> Result<HealthReport, HealthError> {
        if self.health_hangs {
            std::future::pending::<()>().await;
        }
        if self.healthy {
            Ok(HealthReport {
                status: "healthy".into(),
                ..Default::default()
            })
        } else {
            Err(HealthError::Status(503))
        }
    }
}

pub fn document(id: &str, category: &str, data: Value) -> ProcessedDocument {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "category": category,
        "original_filename": format!("{}.pdf", id),
        "extracted_data": data,
    }))
    .unwrap()
}
