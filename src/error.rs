use thiserror::Error;

/// 一括送信の失敗（通信エラー・2xx以外）
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("ファイルを読み込めません: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("サーバーエラー: HTTP {0}")]
    Status(u16),
}

/// エクスポートの失敗
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("サーバーエラー: HTTP {0}")]
    Status(u16),

    #[error("ファイル保存エラー: {0}")]
    Write(#[from] std::io::Error),

    #[error("PDF出力は未対応です")]
    PdfUnsupported,
}

/// ヘルスチェックの失敗（致命的ではない）
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("サーバーエラー: HTTP {0}")]
    Status(u16),
}

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ファイルが選択されていません")]
    NoFilesSelected,

    #[error("書類の処理に失敗しました: {0}")]
    SubmissionFailed(#[from] SubmissionError),

    #[error("エクスポートに失敗しました: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("サーバーに接続できません: {0}")]
    HealthCheckFailed(#[from] HealthError),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] intake_common::Error),
}

pub type Result<T> = std::result::Result<T, IntakeError>;

impl IntakeError {
    /// 終了時に表示するメッセージ
    ///
    /// 送信・エクスポートの失敗は通知済みなので `None`。
    /// 通信エラーの詳細は表示しない（ログのみ）。
    pub fn user_message(&self) -> Option<String> {
        match self {
            IntakeError::SubmissionFailed(_) | IntakeError::ExportFailed(_) => None,
            IntakeError::HealthCheckFailed(_) => Some(crate::health::UNREACHABLE_MESSAGE.to_string()),
            other => Some(format!("❌ {}", other)),
        }
    }
}
