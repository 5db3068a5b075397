//! 履歴エントリ

use serde::{Deserialize, Serialize};

use super::diff::classify;

/// ブックマーク済みエントリの説明文に付ける目印
pub const BOOKMARK_MARKER: &str = "★ ";

/// 操作種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    NoChange,
    Insert,
    Delete,
    Typing,
    Paste,
    Edit,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::NoChange => "no-change",
            ActionKind::Insert => "insert",
            ActionKind::Delete => "delete",
            ActionKind::Typing => "typing",
            ActionKind::Paste => "paste",
            ActionKind::Edit => "edit",
        }
    }
}

/// 履歴エントリ（テキスト全体のスナップショットを前後で保持する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub previous_text: String,
    pub current_text: String,
    pub kind: ActionKind,
    pub description: String,
    pub timestamp: String,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Action {
    /// 変更前後のテキストを分類してエントリを作成
    pub fn new(
        previous_text: impl Into<String>,
        current_text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let previous_text = previous_text.into();
        let current_text = current_text.into();
        let diff = classify(&previous_text, &current_text);
        Self {
            previous_text,
            current_text,
            kind: diff.kind,
            description: diff.description,
            timestamp: timestamp.into(),
            is_bookmarked: false,
        }
    }

    /// ブックマーク状態を反転し、説明文の目印を付け外しする
    pub(crate) fn toggle_bookmark(&mut self) {
        if self.is_bookmarked {
            self.is_bookmarked = false;
            if let Some(stripped) = self.description.strip_prefix(BOOKMARK_MARKER) {
                self.description = stripped.to_string();
            }
        } else {
            self.is_bookmarked = true;
            self.description = format!("{}{}", BOOKMARK_MARKER, self.description);
        }
    }
}
