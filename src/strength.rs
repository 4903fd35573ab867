/// ストレングスラボの基礎サーキット
///
/// バランス課題でスタック（10秒以内に未達成）した場合の
/// エスカレーション先。静的データのみで判定ロジックは持たない。
#[derive(Debug, Clone, Copy)]
pub struct StrengthExercise {
    pub title: &'static str,
    pub detail: &'static str,
    pub cue: &'static str,
}

pub const STRENGTH_CIRCUIT: [StrengthExercise; 5] = [
    StrengthExercise {
        title: "Dynamic Skip (10 counts)",
        detail: "Standard rope skipping. Focus on light feet and consistent rhythm. This builds the elastic strength needed for vault and floor landings.",
        cue: "Focus: Quick feet & Elasticity",
    },
    StrengthExercise {
        title: "Superman / Prone Extension (5 counts)",
        detail: "Lie flat on your stomach. Simultaneously lift opposite arm and leg (or both together for 'arch'). Hold the contraction to strengthen your lower back and glutes.",
        cue: "Focus: Arch shape & Posterior chain",
    },
    StrengthExercise {
        title: "Stork Stand / Single Leg Balance (10s)",
        detail: "Stand on one leg, lifting the other to a 'passé' position or straight out. Keep your hips level and core tight to simulate beam stability.",
        cue: "Focus: Center of Gravity & Ankle control",
    },
    StrengthExercise {
        title: "Standard Forearm Plank (10 counts)",
        detail: "The foundation of all gymnastics body shapes. Keep a 'hollow' body position with shoulders pushed away from the floor and hips tucked.",
        cue: "Focus: Hollow body & Core compression",
    },
    StrengthExercise {
        title: "Elevated Apparatus Plank (10 counts)",
        detail: "Place your hands on a raised surface (bench, step, or block). This shifts weight to the shoulders, preparing you for handstand stability.",
        cue: "Focus: Shoulder Girdle & Inclined Stability",
    },
];
