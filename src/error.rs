//! エラーハンドリングシステム
//!
//! 履歴エンジン全体で使用される統一されたエラー型を定義する。
//! 履歴エンジンには致命的エラーが存在しない：永続化の失敗は警告として報告し、
//! メモリ上の状態を正として処理を継続する。

use thiserror::Error;

/// クレート全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZypherError {
    /// 永続化ストレージのエラー
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 入力処理エラー
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// シリアライズ／デシリアライズのエラー
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// ストレージ固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Storage quota exceeded: {requested} bytes requested, {limit} bytes allowed")]
    QuotaExceeded { limit: usize, requested: usize },

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing value for {key}")]
    MissingValue { key: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Missing argument for {command}")]
    MissingArgument { command: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

impl ZypherError {
    /// 報告時のレベル
    ///
    /// ストレージとシリアライズの失敗は履歴の可用性を損なわないため警告扱い。
    pub fn level(&self) -> ErrorLevel {
        match self {
            ZypherError::Storage(_) | ZypherError::Serialization(_) => ErrorLevel::Warning,
            ZypherError::Input(_) => ErrorLevel::Info,
            ZypherError::Config(_) => ErrorLevel::Error,
        }
    }
}

impl ErrorLevel {
    /// 報告に使う `log` のレベル
    pub fn log_level(self) -> log::Level {
        match self {
            ErrorLevel::Info => log::Level::Info,
            ErrorLevel::Warning => log::Level::Warn,
            ErrorLevel::Error => log::Level::Error,
        }
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, ZypherError>;

// std::io::Error から ZypherError への変換
impl From<std::io::Error> for ZypherError {
    fn from(error: std::io::Error) -> Self {
        ZypherError::Storage(StorageError::Io {
            message: error.to_string(),
        })
    }
}

impl From<serde_json::Error> for ZypherError {
    fn from(error: serde_json::Error) -> Self {
        ZypherError::Serialization(error.to_string())
    }
}
