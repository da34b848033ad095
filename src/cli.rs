use clap::{Parser, Subcommand};
use intake_common::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "相続税申告書類の取込・分類・CSV出力クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIの接続先（設定ファイルより優先）
    #[arg(long, global = true, env = "INTAKE_API_BASE_URL")]
    pub base_url: Option<String>,

    /// 実行環境のホスト名（設定ファイルのhostより優先）
    #[arg(long, global = true, env = "INTAKE_HOST")]
    pub host: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 書類を一括送信して分類結果を表示
    Process {
        /// 書類ファイル、またはフォルダ（直下のファイルをすべて選択）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 自動分類を行わない
        #[arg(long)]
        no_auto_classify: bool,

        /// 処理後にエクスポート (csv/pdf)
        #[arg(short, long)]
        export: Option<ExportFormat>,

        /// エクスポートの保存先（デフォルト: 設定のダウンロード先）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// エクスポート対象の区分（L / LAND_BUILDING など、複数指定可）
        #[arg(short, long = "category")]
        categories: Vec<Category>,

        /// 処理結果をJSONで保存
        #[arg(long)]
        save_json: Option<PathBuf>,
    },

    /// 対話モードで選択・送信・エクスポート
    Interactive {
        /// エクスポートの保存先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// サーバーへの接続を確認
    Health,

    /// 設定を表示/編集
    Config {
        /// 実行環境のホスト名（localhost なら開発用API）
        #[arg(long)]
        set_host: Option<String>,

        /// CSVの保存先を設定
        #[arg(long)]
        set_download_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(format!("Unknown format: {}. Use csv or pdf", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}
