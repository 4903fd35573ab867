use crate::activity::Activity;
use crate::classify;
use crate::config::SessionConfig;
use crate::curriculum::{self, Advance};
use crate::hold::HoldTimer;
use crate::landmark::LandmarkFrame;
use crate::stillness::StillnessFilter;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// セッションの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 評価停止中
    Idle,
    /// フレームを現在のバリエーションに対して評価中
    Running,
    /// 一時停止（達成後の祝福、またはエスカレーション通知）
    Paused,
    /// カリキュラム完了（終端）
    Done,
}

/// ユーザー向けの一時フィードバック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// 体が検出されていない
    Searching,
    /// ポーズ条件を満たしていない
    FindingPose,
    /// 動きが大きすぎる
    StillnessRequired,
    /// ホールド進行中（残り秒数つき）
    Holding { remaining_secs: u32 },
    /// バリエーション達成（次のポーズ番号は1始まり）
    Mastered { next_pose: usize },
    /// 全バリエーション達成
    AllCleared,
    /// スタックによるエスカレーション
    NeedMoreStrength,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Searching => write!(f, "Step into view"),
            Feedback::FindingPose => write!(f, "Finding Pose..."),
            Feedback::StillnessRequired => write!(f, "STILLNESS REQUIRED"),
            Feedback::Holding { remaining_secs } => write!(f, "HOLDING... {}s", remaining_secs),
            Feedback::Mastered { next_pose } => write!(f, "MASTERED! TRY POSE {}", next_pose),
            Feedback::AllCleared => write!(f, "ALL POSES CLEARED!"),
            Feedback::NeedMoreStrength => write!(f, "NEED MORE STRENGTH?"),
        }
    }
}

/// 予約済み遷移の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredKind {
    /// 祝福ポーズ後に次バリエーションへ
    AdvancePose { next: usize },
    /// エスカレーション通知後にストレングスラボへ
    StrengthHandoff,
    /// 完了表示後にダッシュボードへ
    DashboardReturn,
}

/// 予約済み遷移
///
/// コールバックではなくデータとして保持し、poll_deferredで発火する。
/// reset/startで破棄されるため、古いタイマーが新しいセッションの
/// 状態を壊すことはない。
#[derive(Debug, Clone, Copy)]
struct Deferred {
    kind: DeferredKind,
    due: Instant,
}

/// 予約済み遷移の発火結果。呼び出し側（プレゼンテーション層）が
/// ナビゲーションに使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// 次のバリエーションの評価を開始した
    PoseAdvanced { index: usize },
    /// ストレングスラボへのハンドオフ（セッションはIdleに戻る）
    StrengthHandoff,
    /// ダッシュボードへ戻る（セッションはIdleに戻る）
    SessionClosed,
}

/// 毎イベント後に読み出せる表示用の射影
///
/// すべてのフラグは内部状態からの純粋な導出値で、独立に変化しない。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub stage: Stage,
    pub pose_index: usize,
    pub instruction: &'static str,
    pub hold_progress: f32,
    pub feedback: Option<Feedback>,
    pub stall_advisory: bool,
    pub success_glow: bool,
    /// 達成済みバリエーション数（「X / 3」表示用）
    pub mastered: usize,
}

/// バランスセッションの状態機械
///
/// 変更はイベント種別ごとの単一エントリポイントからのみ行う:
/// - on_frame: フレーム評価（静止→分類→ホールド）
/// - on_stall_tick: スタック監視（フレーム到着とは独立の周期ポーリング）
/// - poll_deferred: 予約済み遷移の発火
/// - start / reset: 外部操作
pub struct Session {
    activity: Activity,
    config: SessionConfig,
    stage: Stage,
    pose_index: usize,
    hold: HoldTimer,
    stillness: StillnessFilter,
    /// スタック検出の基準時刻（バリエーション開始時刻）。
    /// ホールドタイマーの基準（連続適格開始時刻）とは意図的に別のクロック。
    pose_entry: Option<Instant>,
    deferred: Option<Deferred>,
    feedback: Option<Feedback>,
    hold_progress: f32,
}

impl Session {
    pub fn new(activity: Activity, config: SessionConfig) -> Self {
        let hold = HoldTimer::from_config(&config);
        let stillness = StillnessFilter::from_config(&config);
        Self {
            activity,
            config,
            stage: Stage::Idle,
            pose_index: 0,
            hold,
            stillness,
            pose_entry: None,
            deferred: None,
            feedback: None,
            hold_progress: 0.0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// セッション開始。全タイマー・履歴・予約遷移をクリアして
    /// 最初のバリエーションからRunningに入る。
    pub fn start(&mut self, now: Instant) {
        self.clear_runtime();
        self.stage = Stage::Running;
        self.pose_entry = Some(now);
        debug!(activity = self.activity.id.as_str(), "session started");
    }

    /// 無条件リセット。どの段階からでもIdleへ戻し、予約済み遷移も
    /// すべて破棄する。
    pub fn reset(&mut self) {
        self.clear_runtime();
        self.stage = Stage::Idle;
        debug!(activity = self.activity.id.as_str(), "session reset");
    }

    fn clear_runtime(&mut self) {
        self.pose_index = 0;
        self.hold.reset();
        self.hold_progress = 0.0;
        self.stillness.reset();
        self.pose_entry = None;
        self.deferred = None;
        self.feedback = None;
    }

    /// フレームイベント。Running以外では何もしない。
    ///
    /// 評価順: 検出有無 → ポーズ分類 → 静止判定 → ホールド加算。
    /// 分類に失敗したフレームは静止スナップショットを更新しない。
    pub fn on_frame(&mut self, frame: Option<&LandmarkFrame>, now: Instant) {
        if self.stage != Stage::Running {
            return;
        }

        let frame = match frame {
            Some(frame) => frame,
            None => {
                self.feedback = Some(Feedback::Searching);
                self.drop_hold();
                return;
            }
        };

        let result = classify::classify(frame, self.activity.id);
        if !result.satisfied {
            self.drop_hold();
            self.feedback = Some(Feedback::FindingPose);
            return;
        }

        if !self.stillness.apply(frame) {
            self.feedback = Some(Feedback::StillnessRequired);
            self.drop_hold();
            return;
        }

        let progress = self.hold.tick(true, now);
        self.hold_progress = progress.percent;
        if progress.complete {
            self.master(now);
        } else {
            self.feedback = Some(Feedback::Holding {
                remaining_secs: self.hold.remaining_secs(now),
            });
        }
    }

    /// スタック監視イベント。フレーム到着とは独立した周期
    /// （目安500ms）で呼ぶ。Running以外では何もしない。
    pub fn on_stall_tick(&mut self, now: Instant) {
        if self.stage != Stage::Running {
            return;
        }
        let entry = match self.pose_entry {
            Some(entry) => entry,
            None => return,
        };

        let elapsed = now.duration_since(entry).as_secs_f32();
        if elapsed > self.config.stall_limit_secs {
            debug!(
                pose_index = self.pose_index,
                elapsed_secs = f64::from(elapsed),
                "stall limit exceeded, escalating to strength lab"
            );
            self.feedback = Some(Feedback::NeedMoreStrength);
            self.stage = Stage::Paused;
            self.deferred = Some(Deferred {
                kind: DeferredKind::StrengthHandoff,
                due: now + secs(self.config.redirect_delay_secs),
            });
        }
        // 注意喚起帯（advisory〜limit）はviewで導出するのでここでは何もしない
    }

    /// 予約済み遷移が期限を迎えていれば発火する
    pub fn poll_deferred(&mut self, now: Instant) -> Option<SessionEvent> {
        let deferred = self.deferred?;
        if now < deferred.due {
            return None;
        }
        self.deferred = None;

        match deferred.kind {
            DeferredKind::AdvancePose { next } => {
                self.pose_index = next;
                self.stage = Stage::Running;
                self.feedback = None;
                self.hold.reset();
                self.hold_progress = 0.0;
                // スタッククロックも新バリエーションから測り直す
                self.pose_entry = Some(now);
                debug!(pose_index = next, "advanced to next variant");
                Some(SessionEvent::PoseAdvanced { index: next })
            }
            DeferredKind::StrengthHandoff => {
                self.reset();
                Some(SessionEvent::StrengthHandoff)
            }
            DeferredKind::DashboardReturn => {
                self.reset();
                Some(SessionEvent::SessionClosed)
            }
        }
    }

    /// ホールド完了時の達成遷移
    fn master(&mut self, now: Instant) {
        match curriculum::advance(&self.activity, self.pose_index) {
            Advance::Next { index, .. } => {
                self.stage = Stage::Paused;
                self.feedback = Some(Feedback::Mastered {
                    next_pose: index + 1,
                });
                self.deferred = Some(Deferred {
                    kind: DeferredKind::AdvancePose { next: index },
                    due: now + secs(self.config.mastery_pause_secs),
                });
                debug!(pose_index = self.pose_index, "variant mastered");
            }
            Advance::Complete => {
                // 最終バリエーションは祝福ポーズなしで即Done
                self.stage = Stage::Done;
                self.feedback = Some(Feedback::AllCleared);
                self.deferred = Some(Deferred {
                    kind: DeferredKind::DashboardReturn,
                    due: now + secs(self.config.done_exit_secs),
                });
                debug!("curriculum complete");
            }
        }
    }

    fn drop_hold(&mut self) {
        self.hold.reset();
        self.hold_progress = 0.0;
    }

    /// 表示用の射影を導出する
    pub fn view(&self, now: Instant) -> SessionView {
        let stall_elapsed = self
            .pose_entry
            .map(|entry| now.duration_since(entry).as_secs_f32());
        let stall_advisory = self.stage == Stage::Running
            && stall_elapsed.map_or(false, |e| {
                e > self.config.stall_advisory_secs && e <= self.config.stall_limit_secs
            });
        let success_glow = self.stage == Stage::Done
            || (self.stage == Stage::Paused
                && matches!(
                    self.deferred,
                    Some(Deferred {
                        kind: DeferredKind::AdvancePose { .. },
                        ..
                    })
                ));
        let instruction = if self.stage == Stage::Idle {
            "Press Start to begin."
        } else {
            self.activity.poses[self.pose_index].text
        };
        let mastered = self.pose_index + usize::from(self.stage == Stage::Done);

        SessionView {
            stage: self.stage,
            pose_index: self.pose_index,
            instruction,
            hold_progress: self.hold_progress,
            feedback: self.feedback,
            stall_advisory,
            success_glow,
            mastered,
        }
    }
}

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}
