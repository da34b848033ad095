use super::{IntakeApi, UploadPart};
use crate::error::{ExportError, HealthError, IntakeError, Result, SubmissionError};
use async_trait::async_trait;
use intake_common::{BatchResponse, ExportRequest, HealthReport};
use reqwest::multipart::{Form, Part};

const USER_AGENT: &str = concat!("inheritance-intake/", env!("CARGO_PKG_VERSION"));

/// reqwestによるAPI実装
///
/// タイムアウトは設定しない（トランスポートの既定値のまま）。
#[derive(Debug, Clone)]
pub struct HttpIntakeApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIntakeApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IntakeError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl IntakeApi for HttpIntakeApi {
    async fn process_batch(
        &self,
        files: Vec<UploadPart>,
        auto_classify: bool,
    ) -> std::result::Result<BatchResponse, SubmissionError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", Part::bytes(file.bytes).file_name(file.file_name));
        }
        form = form.text("auto_classify", if auto_classify { "true" } else { "false" });

        let response = self
            .client
            .post(self.url("/ocr/process-batch"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status(status.as_u16()));
        }

        // 本文が壊れていても失敗にしない
        let body = response.bytes().await?;
        Ok(BatchResponse::decode(&body))
    }

    async fn export_csv(&self, request: &ExportRequest) -> std::result::Result<Vec<u8>, ExportError> {
        let response = self
            .client
            .post(self.url("/documents/export/csv"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn health(&self) -> std::result::Result<HealthReport, HealthError> {
        let response = self.client.get(self.url("/health")).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HealthError::Status(status.as_u16()));
        }

        Ok(response.json::<HealthReport>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpIntakeApi::new("http://localhost:8000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000/api");
        assert_eq!(api.url("/health"), "http://localhost:8000/api/health");
    }
}
