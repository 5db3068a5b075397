//! 履歴の永続化
//!
//! キーと文字列を対応付ける永続ストアを抽象化する。
//! 履歴エンジンは構築時に読み込み、状態を変える操作のたびに書き込む。

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// 永続ストアのトレイト
pub trait HistoryStore {
    /// キーに対応する値を読み込む（未保存なら `None`）
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// キーに値を書き込む
    fn save(&mut self, key: &str, blob: &str) -> Result<()>;
}
