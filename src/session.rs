//! セッション管理
//!
//! 選択ファイル・処理結果・送信中フラグ・行アクション表を一つの状態にまとめ、
//! コントローラーだけが更新する。

use crate::api::IntakeApi;
use crate::error::{ExportError, IntakeError, Result};
use crate::export::ExportCoordinator;
use crate::notify::Notifier;
use crate::selection::{FileSelection, SelectedFile};
use crate::submission::{BatchSubmitter, BusyFlag, SubmitOptions};
use intake_common::{aggregate, Category, ProcessedDocument, ResultSummary};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// 結果行に対する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    View,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// 抽出データの詳細（整形済みJSON）
    Detail {
        original_filename: String,
        extracted_data: String,
    },
    /// 編集は未実装
    EditPending,
}

/// 書類ID → 結果集合内の位置
#[derive(Debug, Clone, Default)]
struct ActionTable {
    by_id: HashMap<String, usize>,
}

impl ActionTable {
    fn register(documents: &[ProcessedDocument]) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| (doc.id.clone(), index))
            .collect();
        Self { by_id }
    }

    fn lookup(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

/// セッション状態
#[derive(Debug, Default)]
pub struct SessionState {
    pub selection: FileSelection,
    documents: Vec<ProcessedDocument>,
    actions: ActionTable,
    busy: BusyFlag,
}

impl SessionState {
    pub fn documents(&self) -> &[ProcessedDocument] {
        &self.documents
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// 結果集合を丸ごと置き換え、行アクション表を登録し直す
    fn replace_documents(&mut self, documents: Vec<ProcessedDocument>) {
        self.actions = ActionTable::register(&documents);
        self.documents = documents;
    }

    fn document(&self, id: &str) -> Option<&ProcessedDocument> {
        self.actions.lookup(id).and_then(|index| self.documents.get(index))
    }
}

pub struct SessionController {
    state: SessionState,
    submitter: BatchSubmitter,
    exporter: ExportCoordinator,
    notifier: Notifier,
    options: SubmitOptions,
}

impl SessionController {
    pub fn new(
        api: Arc<dyn IntakeApi>,
        notifier: Notifier,
        download_dir: PathBuf,
        options: SubmitOptions,
    ) -> Self {
        Self {
            state: SessionState::default(),
            submitter: BatchSubmitter::new(Arc::clone(&api)),
            exporter: ExportCoordinator::new(api, notifier.clone(), download_dir),
            notifier,
            options,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// 送信中フラグ（表示側で参照する）
    pub fn busy_flag(&self) -> BusyFlag {
        self.state.busy.clone()
    }

    pub fn add_files(&mut self, files: Vec<SelectedFile>) {
        self.state.selection.add(files);
    }

    pub fn replace_files(&mut self, files: Vec<SelectedFile>) {
        self.state.selection.replace(files);
    }

    pub fn remove_file(&mut self, index: usize) -> Option<SelectedFile> {
        self.state.selection.remove_at(index)
    }

    pub fn can_submit(&self) -> bool {
        !self.state.selection.is_empty() && !self.state.is_busy()
    }

    /// 選択中のファイルを送信して結果を置き換える
    ///
    /// 失敗しても選択と前回の結果はそのまま残る（再選択せずに再送できる）。
    /// 送信中の呼び出しは `Ok(None)` で弾く。
    pub async fn submit(&mut self) -> Result<Option<ResultSummary>> {
        if self.state.selection.is_empty() {
            return Err(IntakeError::NoFilesSelected);
        }

        let Some(_guard) = self.state.busy.acquire() else {
            self.notifier.warning("⏳ 処理中です。完了までお待ちください");
            return Ok(None);
        };

        let files = self.state.selection.files().to_vec();
        match self.submitter.submit(&files, self.options).await {
            Ok(outcome) => {
                self.state.replace_documents(outcome.documents);
                if !outcome.file_errors.is_empty() {
                    self.notifier.warning(format!(
                        "⚠️ {}件のファイルを処理できませんでした",
                        outcome.file_errors.len()
                    ));
                }
                self.notifier.success("✅ 処理が完了しました！");
                Ok(Some(self.summary()))
            }
            Err(e) => {
                tracing::error!("Processing error: {}", e);
                self.notifier.error("❌ 処理中にエラーが発生しました");
                Err(IntakeError::SubmissionFailed(e))
            }
        }
    }

    /// 現在の結果集合から集計（毎回再計算）
    pub fn summary(&self) -> ResultSummary {
        aggregate(&self.state.documents)
    }

    pub async fn export_csv(&self, include_categories: &[Category]) -> Result<Option<PathBuf>> {
        Ok(self
            .exporter
            .export_csv(&self.state.documents, include_categories)
            .await?)
    }

    pub async fn export_pdf(&self) -> Result<Option<PathBuf>> {
        match self.exporter.export_pdf(&self.state.documents).await {
            Ok(path) => Ok(Some(path)),
            Err(ExportError::PdfUnsupported) => {
                self.notifier.info("📄 PDF出力は準備中です");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 行アクションを実行（未知のIDは何もしない）
    pub fn dispatch(&self, id: &str, action: RowAction) -> Result<Option<ActionOutcome>> {
        let Some(doc) = self.state.document(id) else {
            tracing::debug!(id, "row action for unknown document ignored");
            return Ok(None);
        };

        match action {
            RowAction::View => {
                tracing::debug!(id, "view document");
                Ok(Some(ActionOutcome::Detail {
                    original_filename: doc.original_filename.clone(),
                    extracted_data: doc.extracted_data_pretty()?,
                }))
            }
            RowAction::Edit => {
                tracing::debug!(id, "edit document");
                self.notifier.info("✏️ 編集機能は実装中です");
                Ok(Some(ActionOutcome::EditPending))
            }
        }
    }
}
