//! 時刻の取得
//!
//! 履歴エントリのタイムスタンプ表示と保存時刻の記録に使う。
//! テストでは固定時刻の実装に差し替える。

use chrono::Local;

/// 時刻の取得元
pub trait Clock {
    /// エントリ作成時に付ける表示用の時刻ラベル
    fn timestamp_label(&self) -> String;

    /// UNIXエポックからのミリ秒
    fn now_millis(&self) -> i64;
}

/// システム時計（ローカルタイム）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp_label(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// 固定時刻を返す時計
#[derive(Debug, Clone)]
pub struct FixedClock {
    pub label: String,
    pub millis: i64,
}

impl FixedClock {
    pub fn new(label: impl Into<String>, millis: i64) -> Self {
        Self {
            label: label.into(),
            millis,
        }
    }
}

impl Clock for FixedClock {
    fn timestamp_label(&self) -> String {
        self.label.clone()
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_label_is_hh_mm_ss() {
        let label = SystemClock.timestamp_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
        assert!(SystemClock.now_millis() > 0);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock::new("12:34:56", 42);
        assert_eq!(clock.timestamp_label(), "12:34:56");
        assert_eq!(clock.now_millis(), 42);
    }
}
