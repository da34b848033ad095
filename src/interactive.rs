//! 対話モード
//!
//! 操作: ファイル追加 / フォルダ追加 / 削除 / 一覧 / 送信 / 詳細 / 編集 / CSV / PDF / 終了

use crate::display;
use crate::error::{IntakeError, Result};
use crate::selection::SelectedFile;
use crate::session::{ActionOutcome, RowAction, SessionController};
use dialoguer::{Input, Select};
use std::path::PathBuf;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddFiles,
    AddFolder,
    RemoveFile,
    ListFiles,
    Submit,
    ViewDocument,
    EditDocument,
    ExportCsv,
    ExportPdf,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 10] = [
        MenuAction::AddFiles,
        MenuAction::AddFolder,
        MenuAction::RemoveFile,
        MenuAction::ListFiles,
        MenuAction::Submit,
        MenuAction::ViewDocument,
        MenuAction::EditDocument,
        MenuAction::ExportCsv,
        MenuAction::ExportPdf,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddFiles => "📄 ファイルを追加",
            MenuAction::AddFolder => "📁 フォルダを追加（ドロップ）",
            MenuAction::RemoveFile => "✖️ ファイルを削除",
            MenuAction::ListFiles => "📋 選択中のファイル",
            MenuAction::Submit => "🚀 書類を処理",
            MenuAction::ViewDocument => "👁️ 詳細",
            MenuAction::EditDocument => "✏️ 編集",
            MenuAction::ExportCsv => "📥 CSVエクスポート",
            MenuAction::ExportPdf => "📄 PDFエクスポート",
            MenuAction::Quit => "終了",
        }
    }

    /// 今の状態で選べるか
    pub fn enabled(&self, controller: &SessionController) -> bool {
        match self {
            MenuAction::Submit => controller.can_submit(),
            MenuAction::RemoveFile => !controller.state().selection.is_empty(),
            MenuAction::ViewDocument | MenuAction::EditDocument => {
                !controller.state().documents().is_empty()
            }
            _ => true,
        }
    }
}

pub async fn run_interactive(controller: &mut SessionController) -> Result<()> {
    println!("操作を選んでください（Escで終了）\n");

    loop {
        let actions: Vec<MenuAction> = MenuAction::ALL
            .iter()
            .copied()
            .filter(|a| a.enabled(controller))
            .collect();
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();

        let Some(choice) = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        match actions[choice] {
            MenuAction::AddFiles => {
                let raw: String = Input::new()
                    .with_prompt("ファイルパス（カンマ区切りで複数可）")
                    .interact_text()?;
                let mut files = Vec::new();
                for path in split_paths(&raw) {
                    match SelectedFile::from_path(&path) {
                        Ok(file) => files.push(file),
                        Err(e) => eprintln!("  {}", e),
                    }
                }
                println!("✔ {}件を追加\n", files.len());
                controller.add_files(files);
            }
            MenuAction::AddFolder => {
                let raw: String = Input::new().with_prompt("フォルダパス").interact_text()?;
                match SelectedFile::expand_drop(&PathBuf::from(raw.trim())) {
                    Ok(files) => {
                        println!("✔ {}件を追加\n", files.len());
                        controller.add_files(files);
                    }
                    Err(e) => eprintln!("  {}\n", e),
                }
            }
            MenuAction::RemoveFile => {
                let names: Vec<&str> = controller
                    .state()
                    .selection
                    .files()
                    .iter()
                    .map(|f| f.file_name.as_str())
                    .collect();
                if let Some(index) = Select::new()
                    .with_prompt("削除するファイル")
                    .items(&names)
                    .interact_opt()?
                {
                    if let Some(removed) = controller.remove_file(index) {
                        println!("✔ 削除: {}\n", removed.file_name);
                    }
                }
            }
            MenuAction::ListFiles => {
                println!("{}", display::render_selection(controller.state().selection.files()));
            }
            MenuAction::Submit => {
                let result = display::with_spinner("書類を処理中...", controller.submit()).await;
                match result {
                    Ok(Some(summary)) => println!("\n{}", display::render_summary(&summary)),
                    Ok(None) => {}
                    // 通知済み。選択は残っているので再送できる
                    Err(IntakeError::SubmissionFailed(_)) => {}
                    Err(e) => return Err(e),
                }
            }
            MenuAction::ViewDocument => {
                if let Some(id) = pick_document(controller)? {
                    if let Some(ActionOutcome::Detail { original_filename, extracted_data }) =
                        controller.dispatch(&id, RowAction::View)?
                    {
                        println!("\n👁️ {}\n{}\n", original_filename, extracted_data);
                    }
                }
            }
            MenuAction::EditDocument => {
                if let Some(id) = pick_document(controller)? {
                    controller.dispatch(&id, RowAction::Edit)?;
                }
            }
            MenuAction::ExportCsv => match controller.export_csv(&[]).await {
                Ok(Some(path)) => println!("  保存先: {}\n", path.display()),
                Ok(None) => {}
                Err(IntakeError::ExportFailed(_)) => {}
                Err(e) => return Err(e),
            },
            MenuAction::ExportPdf => {
                controller.export_pdf().await?;
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

fn pick_document(controller: &SessionController) -> Result<Option<String>> {
    let summary = controller.summary();
    let labels: Vec<String> = summary
        .rows
        .iter()
        .map(|row| format!("{} | {}", row.category_label, row.original_filename))
        .collect();

    let choice = Select::new()
        .with_prompt("書類")
        .items(&labels)
        .interact_opt()?;

    Ok(choice.map(|index| summary.rows[index].id.clone()))
}

/// カンマ区切りのパス入力を分解
pub fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_paths() {
        let paths = split_paths(" a.pdf, scans/b.jpg ,,");
        assert_eq!(paths, vec![PathBuf::from("a.pdf"), PathBuf::from("scans/b.jpg")]);
    }

    #[test]
    fn test_menu_labels_unique() {
        let mut labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }
}
