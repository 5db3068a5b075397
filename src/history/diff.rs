//! 意味的差分の分類
//!
//! 変更前後のテキストから操作種別と表示用の説明文を求める純粋関数。
//! 最小編集距離は求めず、形状（追記・切り詰め・中間挿入）だけを見る。
//! 長さとオフセットはすべて文字（`char`）単位で数える。

use super::action::ActionKind;

/// 追記をペーストとみなす文字数の下限（これを超えるとペースト）
const PASTE_THRESHOLD: usize = 5;

/// ペースト説明文に含める先頭文字数
const PASTE_PREVIEW_CHARS: usize = 10;

/// 分類結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub kind: ActionKind,
    pub description: String,
}

impl Diff {
    fn new(kind: ActionKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

/// 変更前後のテキストを分類する（最初に一致した規則を採用）
pub fn classify(old_text: &str, new_text: &str) -> Diff {
    if old_text == new_text {
        return Diff::new(ActionKind::NoChange, "No changes");
    }
    if old_text.is_empty() {
        return Diff::new(
            ActionKind::Insert,
            format!("Added {} chars", new_text.chars().count()),
        );
    }
    if new_text.is_empty() {
        return Diff::new(
            ActionKind::Delete,
            format!("Cleared {} chars", old_text.chars().count()),
        );
    }

    if let Some(added) = new_text.strip_prefix(old_text) {
        return if added.chars().count() > PASTE_THRESHOLD {
            let preview: String = added.chars().take(PASTE_PREVIEW_CHARS).collect();
            Diff::new(ActionKind::Paste, format!("Pasted \"{}...\"", preview))
        } else {
            Diff::new(ActionKind::Typing, typed_description(added))
        };
    }

    if let Some(removed) = old_text.strip_prefix(new_text) {
        return Diff::new(ActionKind::Delete, format!("Deleted \"{}\"", removed));
    }

    let (prefix_chars, prefix_bytes) = common_prefix(old_text, new_text);
    let old_rest = &old_text[prefix_bytes..];
    let new_rest = &new_text[prefix_bytes..];
    if let Some(inserted) = new_rest.strip_suffix(old_rest) {
        return Diff::new(
            ActionKind::Insert,
            format!("Inserted \"{}\" at {}", inserted, prefix_chars),
        );
    }

    Diff::new(ActionKind::Edit, "Modified text")
}

/// タイピング系の説明文（マージ時の再計算でも使う）
pub(crate) fn typed_description(typed: &str) -> String {
    format!("Typed \"{}\"", typed)
}

/// 共通接頭辞の長さを（文字数, バイト数）で返す
fn common_prefix(a: &str, b: &str) -> (usize, usize) {
    let mut chars = 0;
    let mut bytes = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        chars += 1;
        bytes += ca.len_utf8();
    }
    (chars, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_no_change() {
        assert_eq!(classify("", "").kind, ActionKind::NoChange);
        assert_eq!(classify("abc", "abc").kind, ActionKind::NoChange);
    }

    #[test]
    fn text_from_empty_is_insert() {
        let diff = classify("", "Hello");
        assert_eq!(diff.kind, ActionKind::Insert);
        assert_eq!(diff.description, "Added 5 chars");
    }

    #[test]
    fn clearing_text_is_delete() {
        let diff = classify("Hello", "");
        assert_eq!(diff.kind, ActionKind::Delete);
        assert_eq!(diff.description, "Cleared 5 chars");
    }

    #[test]
    fn short_append_is_typing() {
        let diff = classify("Hello", "Hello!!");
        assert_eq!(diff.kind, ActionKind::Typing);
        assert_eq!(diff.description, "Typed \"!!\"");

        // ちょうど5文字はタイピング
        assert_eq!(classify("a", "abcdef").kind, ActionKind::Typing);
    }

    #[test]
    fn long_append_is_paste() {
        let diff = classify("fn", "fn main() { println!(); }");
        assert_eq!(diff.kind, ActionKind::Paste);
        assert_eq!(diff.description, "Pasted \" main() { ...\"");

        assert_eq!(classify("Hello", "Hello World").kind, ActionKind::Paste);
    }

    #[test]
    fn truncation_is_delete() {
        let diff = classify("abc", "ab");
        assert_eq!(diff.kind, ActionKind::Delete);
        assert_eq!(diff.description, "Deleted \"c\"");
    }

    #[test]
    fn contiguous_middle_insertion_is_insert() {
        let diff = classify("helo", "hello");
        assert_eq!(diff.kind, ActionKind::Insert);
        assert_eq!(diff.description, "Inserted \"l\" at 3");

        let diff = classify("ac", "abbc");
        assert_eq!(diff.kind, ActionKind::Insert);
        assert_eq!(diff.description, "Inserted \"bb\" at 1");
    }

    #[test]
    fn substitution_is_edit() {
        let diff = classify("abc", "axc");
        assert_eq!(diff.kind, ActionKind::Edit);
        assert_eq!(diff.description, "Modified text");
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let diff = classify("日本", "日x本");
        assert_eq!(diff.kind, ActionKind::Insert);
        assert_eq!(diff.description, "Inserted \"x\" at 1");

        let diff = classify("", "ことば");
        assert_eq!(diff.description, "Added 3 chars");

        let diff = classify("a", "aあいうえおかきくけこさし");
        assert_eq!(diff.kind, ActionKind::Paste);
        assert_eq!(diff.description, "Pasted \"あいうえおかきくけこ...\"");
    }

    #[test]
    fn classification_is_deterministic() {
        let pairs = [("", "x"), ("abc", "abXc"), ("abc", "xyz"), ("long text", "long")];
        for (old, new) in pairs {
            assert_eq!(classify(old, new), classify(old, new));
        }
    }
}
