//! 設定
//!
//! 履歴エンジンの設定と、コマンドライン引数から組み立てるセッションオプション。

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// 永続化レコードの既定キー
pub const DEFAULT_STORAGE_KEY: &str = "zypher_history";

/// 連続入力を1つの操作にまとめる既定の間隔（ミリ秒）
pub const DEFAULT_COALESCE_WINDOW_MS: u64 = 1000;

/// リプレイ時のフレーム間隔（ミリ秒）
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 800;

/// 履歴エンジンの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// 永続化レコードのキー
    pub storage_key: String,
    /// 連続入力をまとめる時間窓
    pub coalesce_window: Duration,
    /// リプレイのフレーム間隔
    pub replay_interval: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            coalesce_window: Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS),
            replay_interval: Duration::from_millis(DEFAULT_REPLAY_INTERVAL_MS),
        }
    }
}

/// セッション起動時のオプション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// 履歴の保存先ディレクトリ（未指定時はデータディレクトリ配下）
    pub history_dir: Option<PathBuf>,
    /// デバッグログ出力先
    pub debug_log_path: Option<PathBuf>,
    /// 連続入力をまとめる時間窓（ミリ秒）
    pub coalesce_window_ms: Option<u64>,
}

impl SessionOptions {
    pub fn resolve_history_dir(&self) -> Option<PathBuf> {
        match &self.history_dir {
            Some(path) => Some(path.clone()),
            None => default_history_dir(),
        }
    }

    /// 検証済みの履歴設定へ変換
    pub fn to_history_config(&self) -> Result<HistoryConfig> {
        let mut config = HistoryConfig::default();
        if let Some(ms) = self.coalesce_window_ms {
            if ms == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "coalesce-ms".to_string(),
                    value: ms.to_string(),
                }
                .into());
            }
            config.coalesce_window = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

fn default_history_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("zypher-fold"))
}

/// `~` や環境変数を展開してパスに変換
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|err| ConfigError::InvalidValue {
        key: "path".to_string(),
        value: err.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
