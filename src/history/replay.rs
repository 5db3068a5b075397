//! 履歴のリプレイ
//!
//! `past` を古い順にたどり、各時点のテキストを返す反復子。
//! フレーム間の待ち時間は呼び出し側が決める。

use super::action::Action;
use super::manager::HistoryManager;

/// リプレイの1フレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame {
    /// `past` 内の位置（0 が最古）
    pub index: usize,
    /// その時点のバッファ内容
    pub text: String,
}

/// リプレイ反復子
#[derive(Debug, Clone)]
pub struct Replay {
    entries: std::iter::Enumerate<std::vec::IntoIter<Action>>,
    total: usize,
}

impl Replay {
    pub fn new(entries: Vec<Action>) -> Self {
        let total = entries.len();
        Self {
            entries: entries.into_iter().enumerate(),
            total,
        }
    }

    /// 現在の履歴のスナップショットからリプレイを作成
    pub fn from_history(history: &HistoryManager) -> Self {
        Self::new(history.snapshot().past)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for Replay {
    type Item = ReplayFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(index, action)| ReplayFrame {
            index,
            text: action.current_text,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Replay {}
