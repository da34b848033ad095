//! ワイヤ型定義
//!
//! - ProcessedDocument: 分類サービスが返す処理済み書類
//! - BatchResponse: 一括処理レスポンス（不完全なレスポンスも許容）
//! - ExportRequest: CSVエクスポート要求
//! - HealthReport: ヘルスチェック応答

use crate::category::{Category, CategoryCode};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 処理済み書類（クライアント側では変更しない）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub category: CategoryCode,

    #[serde(default)]
    pub original_filename: String,

    /// 文字列・配列・オブジェクトのいずれも来うる
    #[serde(default)]
    pub extracted_data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub manual_edits: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProcessedDocument {
    /// 抽出データを整形済みJSONで返す（詳細表示用）
    pub fn extracted_data_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.extracted_data)?)
    }
}

/// 一括処理レスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchResponse {
    pub success: bool,
    pub processed_count: usize,
    pub failed_count: usize,
    pub documents: Vec<ProcessedDocument>,
    pub errors: Vec<String>,

    /// 形式不正で読み飛ばした書類の件数（受信側でのみ使用）
    #[serde(skip)]
    pub skipped: usize,
}

impl BatchResponse {
    /// レスポンス本文を寛容にデコード
    ///
    /// JSONとして読めない、`documents` が無い、要素の形が不正、などの場合も
    /// 失敗させず、読めた分だけを返す。
    pub fn decode(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };

        let mut response = Self {
            success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
            processed_count: count_field(&value, "processed_count"),
            failed_count: count_field(&value, "failed_count"),
            ..Default::default()
        };

        if let Some(items) = value.get("documents").and_then(Value::as_array) {
            for item in items {
                match serde_json::from_value::<ProcessedDocument>(item.clone()) {
                    Ok(doc) => response.documents.push(doc),
                    Err(_) => response.skipped += 1,
                }
            }
        }

        if let Some(errors) = value.get("errors").and_then(Value::as_array) {
            response.errors = errors
                .iter()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
        }

        response
    }
}

fn count_field(value: &Value, key: &str) -> usize {
    value
        .get(key)
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(0)
}

/// CSVエクスポート要求
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    pub document_ids: Vec<String>,

    /// 空なら全区分（送信しない）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_categories: Vec<Category>,

    pub output_format: String,
}

impl ExportRequest {
    pub fn csv(documents: &[ProcessedDocument], include_categories: &[Category]) -> Self {
        Self {
            document_ids: documents.iter().map(|d| d.id.clone()).collect(),
            include_categories: include_categories.to_vec(),
            output_format: "csv".to_string(),
        }
    }
}

/// ヘルスチェック応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_processed_document_deserialize() {
        let json = r#"{
            "id": "L_registry.pdf_1700000000.0",
            "category": "LAND_BUILDING",
            "original_filename": "registry.pdf",
            "extracted_data": {"prefecture": "東京都", "city": "港区"},
            "ocr_confidence": 0.95
        }"#;

        let doc: ProcessedDocument = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(doc.id, "L_registry.pdf_1700000000.0");
        assert_eq!(doc.category.category(), Some(Category::LandBuilding));
        assert_eq!(doc.original_filename, "registry.pdf");
        assert_eq!(doc.ocr_confidence, Some(0.95));
        assert!(doc.manual_edits.is_empty());
    }

    #[test]
    fn test_processed_document_missing_fields() {
        let doc: ProcessedDocument = serde_json::from_str(r#"{"id": "x"}"#).expect("デシリアライズ失敗");
        assert_eq!(doc.id, "x");
        assert_eq!(doc.category, CategoryCode::Known(Category::Unknown));
        assert_eq!(doc.extracted_data, Value::Null);
    }

    #[test]
    fn test_batch_response_decode_full() {
        let body = json!({
            "success": true,
            "processed_count": 2,
            "failed_count": 1,
            "documents": [
                {"id": "1", "category": "L", "original_filename": "a.pdf", "extracted_data": "text"},
                {"id": "2", "category": "DEPOSIT", "original_filename": "b.jpg", "extracted_data": [1, 2]}
            ],
            "errors": ["c.txt: Unsupported file type: c.txt"]
        });

        let response = BatchResponse::decode(body.to_string().as_bytes());
        assert!(response.success);
        assert_eq!(response.processed_count, 2);
        assert_eq!(response.failed_count, 1);
        assert_eq!(response.documents.len(), 2);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.skipped, 0);
    }

    #[test]
    fn test_batch_response_decode_missing_documents() {
        let response = BatchResponse::decode(br#"{"success": true}"#);
        assert!(response.documents.is_empty());
    }

    #[test]
    fn test_batch_response_decode_not_json() {
        let response = BatchResponse::decode(b"<html>502 Bad Gateway</html>");
        assert!(response.documents.is_empty());
        assert!(!response.success);
    }

    #[test]
    fn test_batch_response_decode_skips_malformed_items() {
        let body = json!({
            "documents": [
                {"id": "ok", "category": "S"},
                "not an object",
                {"id": 12}
            ]
        });

        let response = BatchResponse::decode(body.to_string().as_bytes());
        assert_eq!(response.documents.len(), 1);
        assert_eq!(response.documents[0].id, "ok");
        assert_eq!(response.skipped, 2);
    }

    #[test]
    fn test_export_request_serialize() {
        let docs = vec![
            ProcessedDocument { id: "a".into(), ..Default::default() },
            ProcessedDocument { id: "b".into(), ..Default::default() },
        ];

        let request = ExportRequest::csv(&docs, &[]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"document_ids": ["a", "b"], "output_format": "csv"}));

        let request = ExportRequest::csv(&docs, &[Category::Deposit, Category::ListedStock]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["include_categories"], json!(["D", "S"]));
    }

    #[test]
    fn test_extracted_data_pretty() {
        let doc = ProcessedDocument {
            extracted_data: json!({"balance": 1000}),
            ..Default::default()
        };
        let pretty = doc.extracted_data_pretty().unwrap();
        assert!(pretty.contains("\"balance\": 1000"));
    }
}
