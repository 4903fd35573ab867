/// BlazePose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEyeInner),
            2 => Some(Self::LeftEye),
            3 => Some(Self::LeftEyeOuter),
            4 => Some(Self::RightEyeInner),
            5 => Some(Self::RightEye),
            6 => Some(Self::RightEyeOuter),
            7 => Some(Self::LeftEar),
            8 => Some(Self::RightEar),
            9 => Some(Self::MouthLeft),
            10 => Some(Self::MouthRight),
            11 => Some(Self::LeftShoulder),
            12 => Some(Self::RightShoulder),
            13 => Some(Self::LeftElbow),
            14 => Some(Self::RightElbow),
            15 => Some(Self::LeftWrist),
            16 => Some(Self::RightWrist),
            17 => Some(Self::LeftPinky),
            18 => Some(Self::RightPinky),
            19 => Some(Self::LeftIndex),
            20 => Some(Self::RightIndex),
            21 => Some(Self::LeftThumb),
            22 => Some(Self::RightThumb),
            23 => Some(Self::LeftHip),
            24 => Some(Self::RightHip),
            25 => Some(Self::LeftKnee),
            26 => Some(Self::RightKnee),
            27 => Some(Self::LeftAnkle),
            28 => Some(Self::RightAnkle),
            29 => Some(Self::LeftHeel),
            30 => Some(Self::RightHeel),
            31 => Some(Self::LeftFootIndex),
            32 => Some(Self::RightFootIndex),
            _ => None,
        }
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0、下方向が正)
    pub y: f32,
    /// 可視度スコア (0.0〜1.0)
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    /// 可視度が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visibility: 0.0,
        }
    }
}

/// 33ランドマークからなる1フレーム分の骨格
#[derive(Debug, Clone)]
pub struct LandmarkFrame {
    pub landmarks: [Landmark; LandmarkIndex::COUNT],
}

impl LandmarkFrame {
    pub fn new(landmarks: [Landmark; LandmarkIndex::COUNT]) -> Self {
        Self { landmarks }
    }

    /// インデックスでランドマークを取得
    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    /// 可視度閾値を満たすランドマークのみ返す（欠損扱いはNone）
    pub fn visible(&self, index: LandmarkIndex, threshold: f32) -> Option<&Landmark> {
        let lm = self.get(index);
        if lm.is_visible(threshold) {
            Some(lm)
        } else {
            None
        }
    }
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LandmarkIndex::COUNT],
        }
    }
}

/// バランス判定で使う四肢端点の派生ビュー
///
/// フレームごとに再計算され、独立したライフサイクルは持たない。
/// 足は足先（FootIndex）ランドマークを使う。
#[derive(Debug, Clone, Copy)]
pub struct SupportPoints {
    pub left_wrist: Option<Landmark>,
    pub right_wrist: Option<Landmark>,
    pub left_foot: Option<Landmark>,
    pub right_foot: Option<Landmark>,
    pub left_knee: Option<Landmark>,
    pub right_knee: Option<Landmark>,
    pub left_hip: Option<Landmark>,
    pub right_hip: Option<Landmark>,
}

impl SupportPoints {
    pub fn from_frame(frame: &LandmarkFrame, visibility_threshold: f32) -> Self {
        let pick = |idx: LandmarkIndex| frame.visible(idx, visibility_threshold).copied();
        Self {
            left_wrist: pick(LandmarkIndex::LeftWrist),
            right_wrist: pick(LandmarkIndex::RightWrist),
            left_foot: pick(LandmarkIndex::LeftFootIndex),
            right_foot: pick(LandmarkIndex::RightFootIndex),
            left_knee: pick(LandmarkIndex::LeftKnee),
            right_knee: pick(LandmarkIndex::RightKnee),
            left_hip: pick(LandmarkIndex::LeftHip),
            right_hip: pick(LandmarkIndex::RightHip),
        }
    }
}

/// フレーム供給コラボレーター
///
/// Noneは「体が検出されなかったフレーム」を表す。エラーではない。
pub trait LandmarkSampler {
    fn sample(&mut self) -> Option<LandmarkFrame>;
}
