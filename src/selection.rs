//! 送信前のファイル選択
//!
//! 選択順を保持する。重複・種類・サイズのチェックはしない（サーバー側で判定）。

use crate::error::{IntakeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 選択されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedFile {
    /// ファイル選択（パス指定）
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IntakeError::FileNotFound(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }

    /// ドロップされたパス
    ///
    /// ファイルならそのまま、フォルダなら直下のファイルを名前順で返す。
    pub fn expand_drop(path: &Path) -> Result<Vec<Self>> {
        if path.is_file() {
            return Ok(vec![Self::from_path(path)?]);
        }
        if !path.is_dir() {
            return Err(IntakeError::FileNotFound(path.display().to_string()));
        }

        let mut files: Vec<Self> = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)  // 直下のみ（再帰しない）
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| Self::from_path(e.path()).ok())
            .collect();

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    /// 複数パスをまとめて展開（CLI引数用）
    pub fn collect(paths: &[PathBuf]) -> Result<Vec<Self>> {
        let mut files = Vec::new();
        for path in paths {
            files.extend(Self::expand_drop(path)?);
        }
        Ok(files)
    }
}

/// 選択中のファイル一覧
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に追加
    pub fn add(&mut self, files: impl IntoIterator<Item = SelectedFile>) {
        self.files.extend(files);
    }

    /// 一覧を丸ごと置き換え
    pub fn replace(&mut self, files: impl IntoIterator<Item = SelectedFile>) {
        self.files = files.into_iter().collect();
    }

    /// 指定位置を削除（範囲外なら何もしない）
    pub fn remove_at(&mut self, index: usize) -> Option<SelectedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }
}
