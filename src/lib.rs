//! zypher-fold - テキスト編集履歴エンジン
//!
//! バッファの状態遷移を意味的に分類して記録し、取り消し・やり直し・
//! 連続入力のまとめ・ブックマーク・位置指定ジャンプ・永続化を提供する。

// コアモジュール
pub mod error;
pub mod logging;
pub mod config;
pub mod clock;

// 履歴層
pub mod history;

// データ層
pub mod storage;

// 入力層
pub mod session;
pub mod cli;

// 公開API
pub use config::HistoryConfig;
pub use error::{Result, ZypherError};
pub use history::{Action, ActionKind, HistoryManager, HistorySnapshot};
pub use session::EditSession;
pub use storage::{FileStore, HistoryStore, MemoryStore};
