//! メモリ上のストア
//!
//! クローン同士で内容を共有するため、エンジンに渡した後もテスト側から中身を確認できる。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::HistoryStore;
use crate::error::{Result, StorageError};

/// メモリ上のキー・値ストア
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件あたりの保存サイズ上限（バイト）を設定
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// 保存済みの値を直接取得
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// 保存済みの値を直接書き換える
    pub fn insert(&self, key: impl Into<String>, blob: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), blob.into());
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            if blob.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    limit,
                    requested: blob.len(),
                }
                .into());
            }
        }
        self.insert(key, blob);
        Ok(())
    }
}
