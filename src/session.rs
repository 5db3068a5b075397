//! 編集セッション
//!
//! バッファ本文と履歴エンジンを結び付ける入力面の薄い層。
//! 連続入力をまとめるかどうかの時間判定はここで行い、エンジンには真偽値で渡す。

use std::time::{Duration, Instant};

use crate::config::HistoryConfig;
use crate::history::HistoryManager;

/// 連続入力の時間窓判定
#[derive(Debug, Clone)]
pub struct Coalescer {
    window: Duration,
    last_edit: Option<Instant>,
}

impl Coalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_edit: None,
        }
    }

    /// 直前の編集から時間窓内なら真
    pub fn should_merge(&self, now: Instant) -> bool {
        match self.last_edit {
            Some(last) => now.saturating_duration_since(last) < self.window,
            None => false,
        }
    }

    pub fn record(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_edit = None;
    }
}

/// 編集セッション
pub struct EditSession {
    text: String,
    history: HistoryManager,
    coalescer: Coalescer,
}

impl EditSession {
    /// 初期テキストで開始する
    ///
    /// 復元した履歴があれば、その先頭エントリのテキストを現在の本文とする。
    pub fn new(
        initial_text: impl Into<String>,
        history: HistoryManager,
        config: &HistoryConfig,
    ) -> Self {
        let text = history
            .current()
            .map(|action| action.current_text.clone())
            .unwrap_or_else(|| initial_text.into());
        Self {
            text,
            history,
            coalescer: Coalescer::new(config.coalesce_window),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// 入力面からの編集
    pub fn input(&mut self, new_text: impl Into<String>) {
        self.input_at(new_text, Instant::now());
    }

    /// 時刻を指定した編集
    pub fn input_at(&mut self, new_text: impl Into<String>, now: Instant) {
        let new_text = new_text.into();
        let merge = self.coalescer.should_merge(now);
        self.history.push(&self.text, &new_text, merge);
        self.coalescer.record(now);
        self.text = new_text;
    }

    /// 本文を丸ごと置き換える（まとめずに1エントリとして記録）
    pub fn replace_text(&mut self, new_text: impl Into<String>) {
        let new_text = new_text.into();
        self.history.push(&self.text, &new_text, false);
        self.text = new_text;
    }

    /// 取り消し。本文が変わったら真
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(action) => {
                self.text = action.previous_text;
                true
            }
            None => false,
        }
    }

    /// やり直し。本文が変わったら真
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(action) => {
                self.text = action.current_text;
                true
            }
            None => false,
        }
    }

    pub fn jump_to_past(&mut self, index: usize) -> bool {
        self.apply(|history| history.jump_to_past(index))
    }

    pub fn jump_to_future(&mut self, index: usize) -> bool {
        self.apply(|history| history.jump_to_future(index))
    }

    pub fn toggle_bookmark(&mut self) -> Option<bool> {
        self.history.toggle_bookmark()
    }

    /// 履歴を消去し、本文を指定テキストに戻す
    pub fn clear(&mut self, reset_text: impl Into<String>) {
        self.history.clear();
        self.coalescer.reset();
        self.text = reset_text.into();
    }

    fn apply(&mut self, jump: impl FnOnce(&mut HistoryManager) -> Option<String>) -> bool {
        match jump(&mut self.history) {
            Some(text) => {
                self.text = text;
                true
            }
            None => false,
        }
    }
}
