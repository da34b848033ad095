//! 集計モジュール
//!
//! 処理済み書類の集合から、区分別件数と表示用の行を作る。
//! 件数は常に現在の書類集合から再計算する（差分更新しない）。

use crate::category::Category;
use crate::types::ProcessedDocument;
use serde::Serialize;
use serde_json::Value;

/// 文字列プレビューの最大文字数
pub const PREVIEW_MAX_CHARS: usize = 50;

/// データが無い場合の表示
pub const NO_DATA: &str = "データなし";

/// サマリー表示の件数（土地・建物 / 預貯金 / 株式の3区分のみ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub land: usize,
    pub deposit: usize,
    pub stock: usize,
}

/// 結果テーブルの1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub id: String,
    pub category_label: String,
    pub original_filename: String,
    pub preview: String,
}

/// 集計結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSummary {
    pub counts: CategoryCounts,
    pub rows: Vec<DisplayRow>,
}

impl ResultSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 書類集合を集計
pub fn aggregate(documents: &[ProcessedDocument]) -> ResultSummary {
    let mut summary = ResultSummary {
        counts: CategoryCounts::default(),
        rows: Vec::with_capacity(documents.len()),
    };

    for doc in documents {
        // 3区分以外は件数に含めない（行には表示する）
        match doc.category.category() {
            Some(Category::LandBuilding) => summary.counts.land += 1,
            Some(Category::Deposit) => summary.counts.deposit += 1,
            Some(Category::ListedStock) => summary.counts.stock += 1,
            _ => {}
        }

        summary.rows.push(DisplayRow {
            id: doc.id.clone(),
            category_label: doc.category.label().to_string(),
            original_filename: doc.original_filename.clone(),
            preview: data_preview(&doc.extracted_data),
        });
    }

    summary
}

/// 抽出データのプレビュー文字列
///
/// どんな形のデータでも失敗しない。
pub fn data_preview(data: &Value) -> String {
    match data {
        Value::String(text) => {
            let head: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
            format!("{}...", head)
        }
        Value::Array(items) if !items.is_empty() => format!("{}件のデータ", items.len()),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().take(3).map(String::as_str).collect();
            format!("{}...", keys.join(", "))
        }
        _ => NO_DATA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryCode;
    use serde_json::json;

    fn doc(id: &str, category: &str, data: Value) -> ProcessedDocument {
        ProcessedDocument {
            id: id.to_string(),
            category: CategoryCode::parse(category),
            original_filename: format!("{}.pdf", id),
            extracted_data: data,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_counts_aliases() {
        let docs = vec![
            doc("1", "LAND_BUILDING", Value::Null),
            doc("2", "L", Value::Null),
            doc("3", "LISTED_STOCK", Value::Null),
        ];

        let summary = aggregate(&docs);
        assert_eq!(summary.counts, CategoryCounts { land: 2, deposit: 0, stock: 1 });
        assert_eq!(summary.rows.len(), 3);
    }

    #[test]
    fn test_aggregate_other_categories_not_counted() {
        let docs = vec![
            doc("1", "T", Value::Null),
            doc("2", "DEBT", Value::Null),
            doc("3", "PB", Value::Null),
            doc("4", "DEPOSIT", Value::Null),
        ];

        let summary = aggregate(&docs);
        assert_eq!(summary.counts, CategoryCounts { land: 0, deposit: 1, stock: 0 });

        // 行には全区分が出る
        let labels: Vec<&str> = summary.rows.iter().map(|r| r.category_label.as_str()).collect();
        assert_eq!(labels, vec!["通帳", "債務", "PB", "預貯金"]);
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.counts, CategoryCounts::default());
    }

    #[test]
    fn test_aggregate_keeps_order() {
        let docs = vec![
            doc("b", "S", json!("x")),
            doc("a", "L", json!("y")),
        ];

        let summary = aggregate(&docs);
        assert_eq!(summary.rows[0].id, "b");
        assert_eq!(summary.rows[0].original_filename, "b.pdf");
        assert_eq!(summary.rows[1].id, "a");
    }

    #[test]
    fn test_preview_mapping_first_three_keys() {
        let data = json!({"a": 1, "b": 2, "c": 3, "d": 4});
        assert_eq!(data_preview(&data), "a, b, c...");
    }

    #[test]
    fn test_preview_mapping_keeps_received_order() {
        let data: Value = serde_json::from_str(r#"{"z": 1, "y": 2, "x": 3, "w": 4}"#).unwrap();
        assert_eq!(data_preview(&data), "z, y, x...");
    }

    #[test]
    fn test_preview_long_string() {
        let text = "x".repeat(100);
        let preview = data_preview(&json!(text));
        assert_eq!(preview, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_preview_multibyte_string() {
        let text = "相".repeat(60);
        let preview = data_preview(&json!(text));
        assert_eq!(preview.chars().count(), 53);
        assert!(preview.starts_with(&"相".repeat(50)));
    }

    #[test]
    fn test_preview_sequence() {
        assert_eq!(data_preview(&json!([1, 2, 3])), "3件のデータ");
    }

    #[test]
    fn test_preview_no_data() {
        assert_eq!(data_preview(&Value::Null), NO_DATA);
        assert_eq!(data_preview(&json!([])), NO_DATA);
        assert_eq!(data_preview(&json!(42)), NO_DATA);
        assert_eq!(data_preview(&json!(true)), NO_DATA);
    }
}
