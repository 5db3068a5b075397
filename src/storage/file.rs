//! ファイルベースのストア
//!
//! キーごとに `<dir>/<key>.json` を1ファイル持つ。
//! 書き込みは一時ファイルへ出力してからリネームする。

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::HistoryStore;
use crate::error::{Result, StorageError};

/// ディレクトリ配下にJSONファイルとして保存するストア
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// パス区切りや親ディレクトリ参照を含むキーを拒否
fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        }
        .into());
    }
    Ok(())
}

impl HistoryStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        let path = self.path_for(key)?;

        // 親ディレクトリが存在しない場合は作成
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        // 一時ファイルに書き込んでからアトミックに移動
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, blob)?;
        fs::rename(&temp_path, &path)?;

        log::debug!("history written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZypherError;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load("zypher_history").unwrap(), None);
    }

    #[test]
    fn save_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("history"));

        store.save("zypher_history", "{\"past\":[]}").unwrap();
        store.save("zypher_history", "{\"future\":[]}").unwrap();

        assert_eq!(
            store.load("zypher_history").unwrap(),
            Some("{\"future\":[]}".to_string())
        );
        assert!(!store
            .path_for("zypher_history")
            .unwrap()
            .with_extension("json.tmp")
            .exists());
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        for key in ["", "..", "../outside", "a/b"] {
            let err = store.save(key, "{}").unwrap_err();
            assert!(matches!(
                err,
                ZypherError::Storage(StorageError::InvalidKey { .. })
            ));
        }
    }
}
