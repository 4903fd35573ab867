use crate::config::SessionConfig;
use std::time::Instant;

/// ホールド進捗
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldProgress {
    /// 0〜100
    pub percent: f32,
    /// 必要秒数に到達したか
    pub complete: bool,
}

impl HoldProgress {
    fn zero() -> Self {
        Self {
            percent: 0.0,
            complete: false,
        }
    }
}

/// 連続適格フレームの経過時間を測るホールドタイマー
///
/// 1フレームでも不適格（ポーズ喪失か動き検出）になると
/// 開始時刻ごと破棄される。中断をまたいだ部分加算はしない。
/// 必要秒数は全種目・全バリエーション共通。
pub struct HoldTimer {
    hold_secs: f32,
    start: Option<Instant>,
}

impl HoldTimer {
    pub fn new(hold_secs: f32) -> Self {
        Self {
            hold_secs,
            start: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.hold_secs)
    }

    /// フレームごとに呼ぶ。適格なら経過を進め、不適格ならリセット。
    pub fn tick(&mut self, qualifies: bool, now: Instant) -> HoldProgress {
        if !qualifies {
            self.start = None;
            return HoldProgress::zero();
        }

        let start = *self.start.get_or_insert(now);
        let elapsed = now.duration_since(start).as_secs_f32();
        HoldProgress {
            percent: (elapsed / self.hold_secs).min(1.0) * 100.0,
            complete: elapsed >= self.hold_secs,
        }
    }

    /// 経過中の残り秒数（切り上げ）。未開始なら必要秒数全体。
    pub fn remaining_secs(&self, now: Instant) -> u32 {
        let elapsed = self
            .start
            .map(|s| now.duration_since(s).as_secs_f32())
            .unwrap_or(0.0);
        (self.hold_secs - elapsed).max(0.0).ceil() as u32
    }

    pub fn reset(&mut self) {
        self.start = None;
    }
}
