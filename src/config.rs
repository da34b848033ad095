use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 開発環境のAPI
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8000/api";

/// 本番環境のAPI
pub const DEPLOYED_API_BASE_URL: &str = "https://inhtaxautopj.up.railway.app/api";

const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// ホスト名から接続先を決める
pub fn base_url_for_host(host: &str) -> &'static str {
    if LOCAL_HOSTS.contains(&host.trim()) {
        LOCAL_API_BASE_URL
    } else {
        DEPLOYED_API_BASE_URL
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 実行環境のホスト名（localhost なら開発用APIに接続）
    pub host: String,
    /// 接続先を直接指定（hostより優先）
    pub base_url: Option<String>,
    /// CSVの保存先
    pub download_dir: Option<PathBuf>,
    pub auto_classify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| IntakeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("inheritance-intake").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            host: "localhost".into(),
            base_url: None,
            download_dir: None,
            auto_classify: true,
        }
    }

    /// 接続先を解決（起動時に一度だけ呼ぶ）
    ///
    /// 優先順位: --base-url / INTAKE_API_BASE_URL > 設定ファイルのbase_url > --host / INTAKE_HOST > 設定ファイルのhost
    pub fn resolve_base_url(&self, base_url_override: Option<&str>, host_override: Option<&str>) -> String {
        let explicit = base_url_override
            .filter(|url| !url.trim().is_empty())
            .or(self.base_url.as_deref());
        if let Some(url) = explicit {
            return trim_base_url(url);
        }

        let host = host_override.unwrap_or(&self.host);
        base_url_for_host(host).to_string()
    }

    /// CSVの保存先（未設定ならOSのダウンロードフォルダ、無ければカレント）
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_host(&mut self, host: String) -> Result<()> {
        self.host = host;
        self.save()
    }

    pub fn set_download_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.download_dir = Some(dir);
        self.save()
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
