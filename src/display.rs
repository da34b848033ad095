//! ターミナル表示

use crate::selection::SelectedFile;
use indicatif::{ProgressBar, ProgressStyle};
use intake_common::ResultSummary;
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;

/// 選択ファイル一覧
pub fn render_selection(files: &[SelectedFile]) -> String {
    if files.is_empty() {
        return "ファイルが選択されていません".to_string();
    }

    let mut out = String::new();
    for (index, file) in files.iter().enumerate() {
        let _ = writeln!(out, "  [{}] 📄 {}", index + 1, file.file_name);
    }
    out
}

/// 集計と結果テーブル
pub fn render_summary(summary: &ResultSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 集計");
    let _ = writeln!(out, "  土地・建物: {}件", summary.counts.land);
    let _ = writeln!(out, "  預貯金:     {}件", summary.counts.deposit);
    let _ = writeln!(out, "  株式:       {}件", summary.counts.stock);
    let _ = writeln!(out);

    if summary.rows.is_empty() {
        let _ = writeln!(out, "処理結果はありません");
        return out;
    }

    let _ = writeln!(out, "📋 処理結果 ({}件)", summary.rows.len());
    for (index, row) in summary.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{}] {} | {} | {}",
            index + 1,
            row.category_label,
            row.original_filename,
            row.preview
        );
    }
    out
}

/// 処理中スピナーを表示しながら待つ
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_common::{CategoryCounts, DisplayRow};
    use std::path::PathBuf;

    #[test]
    fn test_render_selection_empty() {
        assert_eq!(render_selection(&[]), "ファイルが選択されていません");
    }

    #[test]
    fn test_render_selection_numbered() {
        let files = vec![
            SelectedFile { path: PathBuf::from("a.pdf"), file_name: "a.pdf".into() },
            SelectedFile { path: PathBuf::from("b.jpg"), file_name: "b.jpg".into() },
        ];
        let out = render_selection(&files);
        assert!(out.contains("[1] 📄 a.pdf"));
        assert!(out.contains("[2] 📄 b.jpg"));
    }

    #[test]
    fn test_render_summary() {
        let summary = ResultSummary {
            counts: CategoryCounts { land: 2, deposit: 0, stock: 1 },
            rows: vec![DisplayRow {
                id: "1".into(),
                category_label: "土地・建物".into(),
                original_filename: "deed.pdf".into(),
                preview: "a, b, c...".into(),
            }],
        };

        let out = render_summary(&summary);
        assert!(out.contains("土地・建物: 2件"));
        assert!(out.contains("株式:       1件"));
        assert!(out.contains("[1] 土地・建物 | deed.pdf | a, b, c..."));
    }

    #[test]
    fn test_render_summary_empty() {
        let out = render_summary(&ResultSummary::default());
        assert!(out.contains("処理結果はありません"));
    }
}
