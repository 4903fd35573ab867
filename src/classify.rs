use crate::activity::BalanceType;
use crate::landmark::{LandmarkFrame, LandmarkIndex, SupportPoints};

/// ランドマーク欠損判定の可視度閾値
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// one-point: 両足の垂直分離がこれを超えたら片足立ち
const FOOT_SPLIT: f32 = 0.08;
/// flamingo: one-pointより高い膝上げを要求する分離
const FLAMINGO_SPLIT: f32 = 0.12;
/// 接地点同士とみなす垂直バンド
const CONTACT_BAND: f32 = 0.08;
/// 非接地肢が最下点から離れているべき垂直距離
const LIFT_CLEARANCE: f32 = 0.10;
/// airplane: 頭と支持足の垂直近接
const AIRPLANE_HEAD_FOOT: f32 = 0.25;
/// airplane: 頭と腰平均の垂直近接
const AIRPLANE_HEAD_HIP: f32 = 0.20;

/// 支持肢の識別子
///
/// Ord は識別子文字列のアルファベット順 (LF < LW < RF < RW) に一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SupportLimb {
    LeftFoot,
    LeftWrist,
    RightFoot,
    RightWrist,
}

impl SupportLimb {
    pub fn id(&self) -> &'static str {
        match self {
            SupportLimb::LeftFoot => "LF",
            SupportLimb::LeftWrist => "LW",
            SupportLimb::RightFoot => "RF",
            SupportLimb::RightWrist => "RW",
        }
    }
}

/// 分類結果
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub satisfied: bool,
    /// three-pointのみ、支持ベースを形成する3肢（アルファベット順）
    pub supports: Option<Vec<SupportLimb>>,
}

impl Classification {
    fn unsatisfied() -> Self {
        Self {
            satisfied: false,
            supports: None,
        }
    }

    fn satisfied() -> Self {
        Self {
            satisfied: true,
            supports: None,
        }
    }

    fn with_supports(supports: Vec<SupportLimb>) -> Self {
        Self {
            satisfied: true,
            supports: Some(supports),
        }
    }
}

/// フレームが種目のポーズ条件を満たすか判定する
///
/// 必須ランドマーク（最低でも両足）の欠損は常に不成立を返す。
/// 閾値比較はすべて生の正規化座標に対する厳密不等号で行い、
/// 平滑化はStillnessFilter以外に行わない。
pub fn classify(frame: &LandmarkFrame, activity: BalanceType) -> Classification {
    let pts = SupportPoints::from_frame(frame, VISIBILITY_THRESHOLD);

    // 全種目共通: 両足が見えていなければ判定しない
    let (lf, rf) = match (pts.left_foot, pts.right_foot) {
        (Some(lf), Some(rf)) => (lf, rf),
        _ => return Classification::unsatisfied(),
    };

    match activity {
        BalanceType::OnePoint => {
            let diff = (lf.y - rf.y).abs();
            if diff > FOOT_SPLIT {
                Classification::satisfied()
            } else {
                Classification::unsatisfied()
            }
        }
        BalanceType::Flamingo => {
            let diff = (lf.y - rf.y).abs();
            if diff > FLAMINGO_SPLIT {
                Classification::satisfied()
            } else {
                Classification::unsatisfied()
            }
        }
        BalanceType::TwoPoint => {
            // 見えている候補肢を接地度順（y降順 = 低い方から）にソート
            let mut candidates: Vec<f32> = [pts.left_wrist, pts.right_wrist, Some(lf), Some(rf)]
                .into_iter()
                .flatten()
                .map(|p| p.y)
                .collect();
            if candidates.len() < 2 {
                return Classification::unsatisfied();
            }
            candidates.sort_by(|a, b| b.partial_cmp(a).unwrap());

            let two_low = (candidates[0] - candidates[1]).abs() < CONTACT_BAND;
            let others_high = if candidates.len() > 2 {
                (candidates[0] - candidates[2]) > LIFT_CLEARANCE
            } else {
                true
            };
            if two_low && others_high {
                Classification::satisfied()
            } else {
                Classification::unsatisfied()
            }
        }
        BalanceType::ThreePoint => {
            // 4候補すべて必要（どれが浮いているか特定するため）
            let (lw, rw) = match (pts.left_wrist, pts.right_wrist) {
                (Some(lw), Some(rw)) => (lw, rw),
                _ => return Classification::unsatisfied(),
            };
            let mut candidates = [
                (SupportLimb::LeftWrist, lw.y),
                (SupportLimb::RightWrist, rw.y),
                (SupportLimb::LeftFoot, lf.y),
                (SupportLimb::RightFoot, rf.y),
            ];
            candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

            let three_low = (candidates[0].1 - candidates[2].1).abs() < CONTACT_BAND;
            let fourth_high = (candidates[0].1 - candidates[3].1) > LIFT_CLEARANCE;
            if three_low && fourth_high {
                let mut supports = vec![candidates[0].0, candidates[1].0, candidates[2].0];
                supports.sort();
                Classification::with_supports(supports)
            } else {
                Classification::unsatisfied()
            }
        }
        BalanceType::Airplane => {
            let head = match frame.visible(LandmarkIndex::Nose, VISIBILITY_THRESHOLD) {
                Some(head) => head,
                None => return Classification::unsatisfied(),
            };
            let (lh, rh) = match (pts.left_hip, pts.right_hip) {
                (Some(lh), Some(rh)) => (lh, rh),
                _ => return Classification::unsatisfied(),
            };
            // 頭が支持足の高さに近く、かつ腰平均の高さにも近ければ
            // 胴体が水平ラインを描いているとみなす
            let near_foot = (head.y - lf.y).abs() < AIRPLANE_HEAD_FOOT;
            let hip_y = (lh.y + rh.y) / 2.0;
            let near_hip = (head.y - hip_y).abs() < AIRPLANE_HEAD_HIP;
            if near_foot && near_hip {
                Classification::satisfied()
            } else {
                Classification::unsatisfied()
            }
        }
        BalanceType::KneeHug => {
            // 浮いている脚 = yが小さい（高い）方の足
            let left_lifted = lf.y < rf.y;
            let (knee, hip) = if left_lifted {
                (pts.left_knee, pts.left_hip)
            } else {
                (pts.right_knee, pts.right_hip)
            };
            let (knee, hip) = match (knee, hip) {
                (Some(k), Some(h)) => (k, h),
                _ => return Classification::unsatisfied(),
            };
            // 浮脚の膝が同側の腰より高ければ膝の引き上げ成立
            if knee.y < hip.y {
                Classification::satisfied()
            } else {
                Classification::unsatisfied()
            }
        }
        // 幾何条件なし: 静止とホールド時間のみに委ねる意図的なフォールバック
        BalanceType::FourPoint => Classification::satisfied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    fn empty_frame() -> LandmarkFrame {
        LandmarkFrame::default()
    }

    fn set(frame: &mut LandmarkFrame, idx: LandmarkIndex, x: f32, y: f32) {
        frame.landmarks[idx as usize] = Landmark::new(x, y, 0.9);
    }

    fn feet_frame(lf_y: f32, rf_y: f32) -> LandmarkFrame {
        let mut frame = empty_frame();
        set(&mut frame, LandmarkIndex::LeftFootIndex, 0.4, lf_y);
        set(&mut frame, LandmarkIndex::RightFootIndex, 0.6, rf_y);
        frame
    }

    fn support_frame(lw_y: f32, rw_y: f32, lf_y: f32, rf_y: f32) -> LandmarkFrame {
        let mut frame = feet_frame(lf_y, rf_y);
        set(&mut frame, LandmarkIndex::LeftWrist, 0.3, lw_y);
        set(&mut frame, LandmarkIndex::RightWrist, 0.7, rw_y);
        frame
    }

    #[test]
    fn test_missing_feet_unsatisfied() {
        let frame = empty_frame();
        for t in BalanceType::ALL {
            let c = classify(&frame, t);
            assert!(!c.satisfied, "{} should fail without feet", t.as_str());
        }
    }

    #[test]
    fn test_one_point_lifted_foot() {
        // 分離0.2 > 0.08
        let c = classify(&feet_frame(0.7, 0.9), BalanceType::OnePoint);
        assert!(c.satisfied);
        assert!(c.supports.is_none());
    }

    #[test]
    fn test_one_point_feet_level() {
        // 分離0.05 <= 0.08
        assert!(!classify(&feet_frame(0.9, 0.95), BalanceType::OnePoint).satisfied);
    }

    #[test]
    fn test_one_point_boundary_strict() {
        // ちょうど0.08は厳密不等号で不成立
        assert!(!classify(&feet_frame(0.82, 0.9), BalanceType::OnePoint).satisfied);
    }

    #[test]
    fn test_flamingo_needs_higher_lift() {
        // 0.10はone-pointでは成立、flamingoでは不成立
        let frame = feet_frame(0.8, 0.9);
        assert!(classify(&frame, BalanceType::OnePoint).satisfied);
        assert!(!classify(&frame, BalanceType::Flamingo).satisfied);

        let lifted = feet_frame(0.7, 0.9);
        assert!(classify(&lifted, BalanceType::Flamingo).satisfied);
    }

    #[test]
    fn test_two_point_feet_grounded_wrists_high() {
        // 最下2点(LF,RF)が0.08以内、3番目(RW)が0.10超上
        let c = classify(&support_frame(0.3, 0.3, 0.9, 0.9), BalanceType::TwoPoint);
        assert!(c.satisfied);
    }

    #[test]
    fn test_two_point_three_grounded_rejected() {
        // 3点が接地バンド内にあると2点バランスではない
        let c = classify(&support_frame(0.88, 0.3, 0.9, 0.9), BalanceType::TwoPoint);
        assert!(!c.satisfied);
    }

    #[test]
    fn test_two_point_uneven_contacts_rejected() {
        // 最下2点の差0.2 >= 0.08
        let c = classify(&support_frame(0.3, 0.3, 0.7, 0.9), BalanceType::TwoPoint);
        assert!(!c.satisfied);
    }

    #[test]
    fn test_two_point_with_hidden_wrists() {
        // 手首が欠損していても足2点で成立（候補が2つちょうど）
        let c = classify(&feet_frame(0.9, 0.9), BalanceType::TwoPoint);
        assert!(c.satisfied);
    }

    #[test]
    fn test_three_point_support_set_sorted() {
        // LW浮き: 最下3点(RF 0.85, LF 0.82, RW 0.80)が0.08以内、
        // LW(0.20)は最下点から0.10超上
        let c = classify(&support_frame(0.20, 0.80, 0.82, 0.85), BalanceType::ThreePoint);
        assert!(c.satisfied);
        let supports = c.supports.expect("three-point should report supports");
        assert_eq!(
            supports,
            vec![
                SupportLimb::LeftFoot,
                SupportLimb::RightFoot,
                SupportLimb::RightWrist
            ]
        );
        let ids: Vec<&str> = supports.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["LF", "RF", "RW"]);
    }

    #[test]
    fn test_three_point_spread_contacts_rejected() {
        // 最下3点が0.08バンドに収まらない
        let c = classify(&support_frame(0.20, 0.50, 0.52, 0.85), BalanceType::ThreePoint);
        assert!(!c.satisfied);
        assert!(c.supports.is_none());
    }

    #[test]
    fn test_three_point_fourth_too_low_rejected() {
        // 4点目が0.10のクリアランスを満たさない
        let c = classify(&support_frame(0.78, 0.80, 0.82, 0.85), BalanceType::ThreePoint);
        assert!(!c.satisfied);
    }

    #[test]
    fn test_three_point_requires_all_candidates() {
        // 手首欠損では支持ベースを特定できない
        let c = classify(&feet_frame(0.8, 0.85), BalanceType::ThreePoint);
        assert!(!c.satisfied);
    }

    #[test]
    fn test_airplane_horizontal_torso() {
        let mut frame = feet_frame(0.6, 0.9);
        set(&mut frame, LandmarkIndex::Nose, 0.2, 0.5);
        set(&mut frame, LandmarkIndex::LeftHip, 0.5, 0.55);
        set(&mut frame, LandmarkIndex::RightHip, 0.55, 0.55);
        // |head - LF| = 0.1 < 0.25, |head - hip| = 0.05 < 0.20
        assert!(classify(&frame, BalanceType::Airplane).satisfied);
    }

    #[test]
    fn test_airplane_standing_rejected() {
        let mut frame = feet_frame(0.9, 0.9);
        set(&mut frame, LandmarkIndex::Nose, 0.5, 0.1);
        set(&mut frame, LandmarkIndex::LeftHip, 0.5, 0.5);
        set(&mut frame, LandmarkIndex::RightHip, 0.55, 0.5);
        // 直立: 頭が足からも腰からも遠い
        assert!(!classify(&frame, BalanceType::Airplane).satisfied);
    }

    #[test]
    fn test_airplane_missing_head_unsatisfied() {
        let mut frame = feet_frame(0.6, 0.9);
        set(&mut frame, LandmarkIndex::LeftHip, 0.5, 0.55);
        set(&mut frame, LandmarkIndex::RightHip, 0.55, 0.55);
        assert!(!classify(&frame, BalanceType::Airplane).satisfied);
    }

    #[test]
    fn test_knee_hug_lifted_knee_above_hip() {
        let mut frame = feet_frame(0.5, 0.9); // 左足が浮いている
        set(&mut frame, LandmarkIndex::LeftKnee, 0.45, 0.4);
        set(&mut frame, LandmarkIndex::LeftHip, 0.5, 0.6);
        assert!(classify(&frame, BalanceType::KneeHug).satisfied);
    }

    #[test]
    fn test_knee_hug_low_knee_rejected() {
        let mut frame = feet_frame(0.5, 0.9);
        set(&mut frame, LandmarkIndex::LeftKnee, 0.45, 0.7);
        set(&mut frame, LandmarkIndex::LeftHip, 0.5, 0.6);
        // 膝が腰より低い
        assert!(!classify(&frame, BalanceType::KneeHug).satisfied);
    }

    #[test]
    fn test_knee_hug_uses_lifted_side() {
        // 右足が浮いている場合は右膝・右腰で判定する
        let mut frame = feet_frame(0.9, 0.5);
        set(&mut frame, LandmarkIndex::RightKnee, 0.55, 0.4);
        set(&mut frame, LandmarkIndex::RightHip, 0.5, 0.6);
        // 左側は欠損のままでも成立する
        assert!(classify(&frame, BalanceType::KneeHug).satisfied);
    }

    #[test]
    fn test_four_point_permissive() {
        // 幾何条件なし: 足さえ見えていれば常に成立
        let c = classify(&feet_frame(0.9, 0.9), BalanceType::FourPoint);
        assert!(c.satisfied);
        assert!(c.supports.is_none());
    }
}
