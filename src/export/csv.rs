use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "inheritance_data";

/// ダウンロードファイル名（ISO-8601の先頭10文字 = 日付）
pub fn download_file_name(now: DateTime<Utc>) -> String {
    let timestamp = now.to_rfc3339();
    format!("{}_{}.csv", FILE_PREFIX, &timestamp[..10])
}

/// 成果物を保存
///
/// 同じ日に複数回出力した場合は上書きになる。
pub async fn save_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
