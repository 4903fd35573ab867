use serde::{Deserialize, Serialize};

/// バランス種目の閉じた識別子集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceType {
    OnePoint,
    TwoPoint,
    ThreePoint,
    FourPoint,
    Airplane,
    Flamingo,
    KneeHug,
}

impl BalanceType {
    pub const ALL: [BalanceType; 7] = [
        BalanceType::OnePoint,
        BalanceType::TwoPoint,
        BalanceType::ThreePoint,
        BalanceType::FourPoint,
        BalanceType::Airplane,
        BalanceType::Flamingo,
        BalanceType::KneeHug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceType::OnePoint => "one-point",
            BalanceType::TwoPoint => "two-point",
            BalanceType::ThreePoint => "three-point",
            BalanceType::FourPoint => "four-point",
            BalanceType::Airplane => "airplane",
            BalanceType::Flamingo => "flamingo",
            BalanceType::KneeHug => "knee-hug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "one-point" => Some(BalanceType::OnePoint),
            "two-point" => Some(BalanceType::TwoPoint),
            "three-point" => Some(BalanceType::ThreePoint),
            "four-point" => Some(BalanceType::FourPoint),
            "airplane" => Some(BalanceType::Airplane),
            "flamingo" => Some(BalanceType::Flamingo),
            "knee-hug" => Some(BalanceType::KneeHug),
            _ => None,
        }
    }
}

/// 1種目あたりのポーズバリエーション数（カリキュラム長）
pub const POSES_PER_ACTIVITY: usize = 3;

/// ポーズバリエーション（指示文）
#[derive(Debug, Clone)]
pub struct PoseVariant {
    pub text: &'static str,
}

/// バランス種目の不変設定
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: BalanceType,
    pub title: &'static str,
    pub description: &'static str,
    pub poses: [PoseVariant; POSES_PER_ACTIVITY],
}

/// 起動時に読み込まれる静的な種目カタログ
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    /// 組み込みの7種目
    pub fn builtin() -> Self {
        let v = |a, b, c| {
            [
                PoseVariant { text: a },
                PoseVariant { text: b },
                PoseVariant { text: c },
            ]
        };
        let activities = vec![
            Activity {
                id: BalanceType::OnePoint,
                title: "One Point Balance",
                description: "Balance on one limb and hold your pose.",
                poses: v(
                    "Pose 1: Balance on one leg for 3s. Any position.",
                    "Pose 2: Try a DIFFERENT leg or arm position for 3s.",
                    "Pose 3: Final variation! Change your base or arm height.",
                ),
            },
            Activity {
                id: BalanceType::TwoPoint,
                title: "Two Point Balance",
                description: "Balance using two contact points.",
                poses: v(
                    "Pose 1: Balance on TWO POINTS for 3s.",
                    "Pose 2: Change limbs! (e.g., opposite hand and foot).",
                    "Pose 3: Final challenge! Find a new way to balance on two points.",
                ),
            },
            Activity {
                id: BalanceType::ThreePoint,
                title: "Three Point Balance",
                description: "Balance on any three limbs for control and stability.",
                poses: v(
                    "Pose 1: Balance on EXACTLY THREE POINTS for 3s.",
                    "Pose 2: Swap one limb! Keep your core tight.",
                    "Pose 3: Final three-point hold. Stay perfectly still.",
                ),
            },
            Activity {
                id: BalanceType::FourPoint,
                title: "Four Point Balance",
                description: "Balance using any four parts — hands, knees, or feet.",
                poses: v(
                    "Pose 1: Standard four-point balance (hands and feet).",
                    "Pose 2: Lower to knees or elbows for a new variant.",
                    "Pose 3: Reach one limb out slightly while maintaining 4 points.",
                ),
            },
            Activity {
                id: BalanceType::Airplane,
                title: "Airplane Pose",
                description: "Lean forward and stretch your arms for perfect control.",
                poses: v(
                    "Tilt forward, lift leg back, and extend arms.",
                    "Try it again on your OTHER leg for symmetry.",
                    "Final Airplane: Hold with your eyes focused on a spot.",
                ),
            },
            Activity {
                id: BalanceType::Flamingo,
                title: "Flamingo Stand",
                description: "Stand tall on one leg with grace and balance.",
                poses: v(
                    "Lift one leg, knee at 90 degrees, and stand tall.",
                    "Switch legs! Maintain high posture and tight core.",
                    "Final Flamingo: Reach arms up while holding the leg lift.",
                ),
            },
            Activity {
                id: BalanceType::KneeHug,
                title: "Knee Hug Balance",
                description: "Lift one knee up and hug it close while maintaining stability.",
                poses: v(
                    "Lift one knee up and hug it close to your chest.",
                    "Switch legs! Keep your standing knee slightly soft.",
                    "Final Hug: Hold steady with a deep breath and flat back.",
                ),
            },
        ];
        Self { activities }
    }

    pub fn get(&self, id: BalanceType) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn all(&self) -> &[Activity] {
        &self.activities
    }
}
