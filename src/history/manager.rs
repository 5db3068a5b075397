//! 履歴管理マネージャ
//!
//! 過去（`past`）と未来（`future`）の2本のスタックで編集履歴を管理する。
//! 状態を変える操作のたびにストアへ書き込むが、書き込みの失敗は警告ログに留め、
//! メモリ上の状態を正とする。

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::diff::typed_description;
use super::stack::Stack;
use super::ActionKind;
use crate::clock::{Clock, SystemClock};
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::storage::HistoryStore;

/// 表示用の履歴スナップショット（どちらも古い順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    pub past: Vec<Action>,
    pub future: Vec<Action>,
}

/// 永続化レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedHistory {
    #[serde(default)]
    pub past: Vec<Action>,
    #[serde(default)]
    pub future: Vec<Action>,
    #[serde(default)]
    pub saved_at: i64,
}

/// 履歴管理マネージャ
pub struct HistoryManager {
    past: Stack<Action>,
    future: Stack<Action>,
    store: Box<dyn HistoryStore>,
    storage_key: String,
    clock: Box<dyn Clock>,
}

impl HistoryManager {
    /// 既定の設定でストアから履歴を復元して作成
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        Self::with_config(store, &HistoryConfig::default())
    }

    pub fn with_config(store: Box<dyn HistoryStore>, config: &HistoryConfig) -> Self {
        let mut manager = Self {
            past: Stack::new(),
            future: Stack::new(),
            store,
            storage_key: config.storage_key.clone(),
            clock: Box::new(SystemClock),
        };
        let blob = match manager.store.load(&manager.storage_key) {
            Ok(blob) => blob,
            Err(err) => {
                log::log!(err.level().log_level(), "failed to load history: {}", err);
                None
            }
        };
        manager.restore(blob.as_deref());
        manager
    }

    /// 時計を差し替える
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 編集を記録する
    ///
    /// `merge_hint` が真で、直前のエントリがブックマークされておらず種別が同じなら
    /// 新しいエントリを積まずに直前のエントリへまとめる。
    pub fn push(&mut self, previous_text: &str, current_text: &str, merge_hint: bool) {
        let candidate = Action::new(
            previous_text,
            current_text,
            self.clock.timestamp_label(),
        );

        let kind = candidate.kind;
        let merge_target = if merge_hint {
            self.past
                .peek_mut()
                .filter(|top| !top.is_bookmarked && top.kind == kind)
        } else {
            None
        };

        match merge_target {
            Some(top) => {
                merge_into(top, candidate);
                log::debug!("merged {} edit into top entry", kind.as_str());
            }
            None => {
                self.past.push(candidate);
                log::debug!("recorded {} edit", kind.as_str());
            }
        }

        self.future.clear();
        self.persist();
    }

    /// 元に戻す（戻したエントリの `previous_text` を呼び出し側がバッファへ反映する）
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.past.pop()?;
        self.future.push(action.clone());
        self.persist();
        Some(action)
    }

    /// やり直す（エントリの `current_text` を呼び出し側がバッファへ反映する）
    pub fn redo(&mut self) -> Option<Action> {
        let action = self.future.pop()?;
        self.past.push(action.clone());
        self.persist();
        Some(action)
    }

    /// `past` の位置（0 が最古）まで戻り、最後に戻したエントリの変更前テキストを返す
    ///
    /// 既に先頭を指している場合や範囲外の位置では何もしない。
    pub fn jump_to_past(&mut self, index: usize) -> Option<String> {
        let pop_count = self.past.size().saturating_sub(1).saturating_sub(index);
        let mut last = None;
        for _ in 0..pop_count {
            match self.undo() {
                Some(action) => last = Some(action),
                None => break,
            }
        }
        last.map(|action| action.previous_text)
    }

    /// `future` の位置（0 が最古に戻したもの）まで進め、最後に進めたエントリの変更後テキストを返す
    pub fn jump_to_future(&mut self, index: usize) -> Option<String> {
        let mut last = None;
        for _ in 0..=index {
            match self.redo() {
                Some(action) => last = Some(action),
                None => break,
            }
        }
        last.map(|action| action.current_text)
    }

    /// 先頭エントリのブックマークを切り替え、新しい状態を返す
    pub fn toggle_bookmark(&mut self) -> Option<bool> {
        let mut top = self.past.pop()?;
        top.toggle_bookmark();
        let bookmarked = top.is_bookmarked;
        self.past.push(top);
        self.persist();
        Some(bookmarked)
    }

    /// 両方のスタックを空にする
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.persist();
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            past: self.past.to_vec(),
            future: self.future.to_vec(),
        }
    }

    /// 現在の状態を永続化レコードのJSONへ変換
    pub fn serialize(&self) -> Result<String> {
        let record = PersistedHistory {
            past: self.past.to_vec(),
            future: self.future.to_vec(),
            saved_at: self.clock.now_millis(),
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// 永続化レコードから状態を置き換える
    ///
    /// レコードが無い・壊れている場合は空の履歴から始める。
    pub fn restore(&mut self, blob: Option<&str>) {
        let record = match blob {
            Some(raw) => match serde_json::from_str::<PersistedHistory>(raw) {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("discarding malformed history record: {}", err);
                    PersistedHistory::default()
                }
            },
            None => PersistedHistory::default(),
        };
        self.past = Stack::from_vec(record.past);
        self.future = Stack::from_vec(record.future);
        log::debug!(
            "history restored: {} past, {} future",
            self.past.size(),
            self.future.size()
        );
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.size()
    }

    pub fn future_len(&self) -> usize {
        self.future.size()
    }

    /// 現在のバッファ内容に対応するエントリ
    pub fn current(&self) -> Option<&Action> {
        self.past.peek()
    }

    fn persist(&mut self) {
        let blob = match self.serialize() {
            Ok(blob) => blob,
            Err(err) => {
                log::log!(err.level().log_level(), "failed to serialize history: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.save(&self.storage_key, &blob) {
            log::log!(err.level().log_level(), "history not persisted: {}", err);
        }
    }
}

/// 候補エントリを先頭エントリへまとめる（変更前テキストとタイムスタンプは維持）
fn merge_into(top: &mut Action, candidate: Action) {
    top.description = if candidate.kind == ActionKind::Typing {
        let typed: String = candidate
            .current_text
            .chars()
            .skip(top.previous_text.chars().count())
            .collect();
        typed_description(&typed)
    } else {
        candidate.description
    };
    top.kind = candidate.kind;
    top.current_text = candidate.current_text;
}
