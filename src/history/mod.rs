//! 編集履歴
//!
//! テキスト全体のスナップショットを1エントリとして記録し、
//! 取り消し・やり直し・位置指定ジャンプ・ブックマークを提供する。

pub mod action;
pub mod diff;
pub mod manager;
pub mod replay;
pub mod stack;

pub use action::{Action, ActionKind, BOOKMARK_MARKER};
pub use diff::{classify, Diff};
pub use manager::{HistoryManager, HistorySnapshot, PersistedHistory};
pub use replay::{Replay, ReplayFrame};
pub use stack::Stack;
