use crate::config::SessionConfig;
use crate::landmark::{LandmarkFrame, LandmarkIndex};

/// 総変位ベースの静止判定フィルタ
///
/// 全ランドマークの前フレームとのユークリッド距離の合計が
/// 閾値未満なら静止とみなす。ランドマーク単位の閾値ではなく
/// 合計なので、少数の検出ノイズは他の静止点で相殺される。
pub struct StillnessFilter {
    threshold: f32,
    prev: Option<[(f32, f32); LandmarkIndex::COUNT]>,
}

impl StillnessFilter {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            prev: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.stillness_threshold)
    }

    /// 静止していればtrue
    ///
    /// 初回フレームは無条件に静止扱い。判定結果にかかわらず
    /// スナップショットは現フレームで置き換える。
    pub fn apply(&mut self, frame: &LandmarkFrame) -> bool {
        let current: [(f32, f32); LandmarkIndex::COUNT] =
            std::array::from_fn(|i| (frame.landmarks[i].x, frame.landmarks[i].y));

        let prev = match self.prev.replace(current) {
            Some(prev) => prev,
            None => return true,
        };

        let mut total_move = 0.0;
        for (cur, old) in current.iter().zip(prev.iter()) {
            let dx = cur.0 - old.0;
            let dy = cur.1 - old.1;
            total_move += (dx * dx + dy * dy).sqrt();
        }
        total_move < self.threshold
    }

    pub fn reset(&mut self) {
        self.prev = None;
    }
}
