//! 汎用スタック
//!
//! 後入れ先出しの単純なコンテナ。空のときの `pop` / `peek` はエラーではなく `None`。

/// 後入れ先出しスタック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// 空のスタックを作成
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 挿入順（底から先頭へ）の要素列からスタックを復元
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// 底から先頭への反復子
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> Stack<T> {
    /// 挿入順のコピーを返す（返した列を変更してもスタックには影響しない）
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
