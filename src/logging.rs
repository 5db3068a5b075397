//! ロギングシステム
//!
//! ライブラリ側は `log` ファサード経由で出力し、バイナリが起動時にこのロガーを
//! 一度だけ登録する。標準エラー出力と追記式のファイル出力に対応する。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// ロガー
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LevelFilter::Debug)
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    /// グローバルロガーとして登録する
    ///
    /// プロセス終了まで生存させるためリークさせる。
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(level);
        Ok(())
    }

    fn should_log(&self, level: Level) -> bool {
        level <= self.level
    }

    fn write_line(&self, message: &str) {
        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            append_line(path, message);
        }
    }
}

fn append_line(path: &Path, message: &str) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", message);
    }
}

fn tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => "INFO",
        Level::Warn => "WARNING",
        Level::Error => "ERROR",
    }
}

/// 1行分のログ文字列を組み立てる
fn format_record(record: &Record<'_>) -> String {
    format!("{}: {} in {}", tag(record.level()), record.args(), record.target())
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.should_log(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.write_line(&format_record(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().without_stderr();
        assert!(logger.should_log(Level::Debug));
        assert!(logger.should_log(Level::Error));

        let info_logger = Logger::for_development()
            .with_level(LevelFilter::Info)
            .without_stderr();
        assert!(!info_logger.should_log(Level::Debug));
        assert!(info_logger.should_log(Level::Warn));
    }

    #[test]
    fn logger_appends_to_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("debug.log");
        let logger = Logger::for_development()
            .without_stderr()
            .with_file_output(&path);

        logger.log(
            &Record::builder()
                .args(format_args!("history persisted"))
                .level(Level::Info)
                .target("zypher_fold::history")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("ignored"))
                .level(Level::Trace)
                .target("zypher_fold::history")
                .build(),
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "INFO: history persisted in zypher_fold::history\n");
    }

    #[test]
    fn install_registers_the_global_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("install.log");
        Logger::new(LevelFilter::Warn)
            .without_stderr()
            .with_file_output(&path)
            .install()
            .unwrap();

        log::warn!(target: "zypher_fold::logging", "store unavailable");
        log::debug!(target: "zypher_fold::logging", "below the level");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("WARNING: store unavailable in zypher_fold::logging"));
        assert!(!content.contains("below the level"));

        // 二度目の登録は失敗する
        assert!(Logger::new(LevelFilter::Warn).install().is_err());
    }
}
