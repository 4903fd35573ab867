use anyhow::Result;
use balance_trainer::activity::{ActivityCatalog, BalanceType};
use balance_trainer::coach::{self, FeedbackGenerator};
use balance_trainer::config::Config;
use balance_trainer::landmark::{Landmark, LandmarkFrame, LandmarkIndex};
use balance_trainer::session::{Session, SessionEvent, Stage};
use balance_trainer::strength::STRENGTH_CIRCUIT;
use std::io::{self, Write};
use std::time::Instant;

const CONFIG_PATH: &str = "config.toml";

/// オフライン動作用のダミー生成器。常に失敗して定型文にフォールバックする。
struct OfflineGenerator;

impl FeedbackGenerator for OfflineGenerator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow::anyhow!("no text generation service configured"))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = Config::load_or_default(CONFIG_PATH);
    let catalog = ActivityCatalog::builtin();

    println!("=== Balance Trainer - Session Simulator ===");
    println!();
    println!("コマンド:");
    println!("  a             - 種目一覧");
    println!("  s <id>        - セッション開始 (例: s one-point)");
    println!("  f             - 成立フレームを送る");
    println!("  b             - 不成立フレームを送る");
    println!("  m             - 動きのある成立フレームを送る");
    println!("  n             - 未検出フレームを送る");
    println!("  t             - スタック監視ティック + 予約遷移ポーリング");
    println!("  v             - 現在の表示状態");
    println!("  r             - リセット");
    println!("  q             - 終了");
    println!();

    let mut session: Option<Session> = None;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "a" => {
                for activity in catalog.all() {
                    println!("  {:12} {}", activity.id.as_str(), activity.title);
                }
            }
            "s" if parts.len() == 2 => match BalanceType::from_str(parts[1]) {
                Some(id) => {
                    let activity = catalog.get(id).expect("builtin catalog is complete").clone();
                    let mut s = Session::new(activity, config.session.clone());
                    s.start(Instant::now());
                    print_view(&s);
                    session = Some(s);
                }
                None => println!("不明な種目: {}", parts[1]),
            },
            "f" | "b" | "m" | "n" => match session.as_mut() {
                Some(s) => {
                    let now = Instant::now();
                    let frame = match parts[0] {
                        "f" => Some(qualifying_frame(s.activity().id)),
                        "b" => Some(standing_frame()),
                        "m" => Some(jittered(qualifying_frame(s.activity().id))),
                        _ => None,
                    };
                    let was_done = s.stage() == Stage::Done;
                    s.on_frame(frame.as_ref(), now);
                    print_view(s);
                    if !was_done && s.stage() == Stage::Done {
                        let title = s.activity().title;
                        println!("コーチ講評: {}", coach::session_summary(&OfflineGenerator, title));
                    }
                }
                None => println!("セッションが開始されていません"),
            },
            "t" => match session.as_mut() {
                Some(s) => {
                    let now = Instant::now();
                    s.on_stall_tick(now);
                    match s.poll_deferred(now) {
                        Some(SessionEvent::PoseAdvanced { index }) => {
                            println!("次のバリエーションへ: {}", index + 1);
                        }
                        Some(SessionEvent::StrengthHandoff) => {
                            println!("ストレングスラボへハンドオフ:");
                            for (i, ex) in STRENGTH_CIRCUIT.iter().enumerate() {
                                println!("  {}. {} ({})", i + 1, ex.title, ex.cue);
                            }
                        }
                        Some(SessionEvent::SessionClosed) => {
                            println!("ダッシュボードへ戻ります");
                        }
                        None => {}
                    }
                    print_view(s);
                }
                None => println!("セッションが開始されていません"),
            },
            "v" => match session.as_ref() {
                Some(s) => print_view(s),
                None => println!("セッションが開始されていません"),
            },
            "r" => {
                if let Some(s) = session.as_mut() {
                    s.reset();
                    print_view(s);
                }
            }
            "q" => {
                println!("終了します");
                break;
            }
            _ => {
                println!("不明なコマンド: {}", parts[0]);
            }
        }
    }

    Ok(())
}

fn print_view(session: &Session) {
    let view = session.view(Instant::now());
    println!(
        "  stage={:?} pose={}/3 progress={:.0}% advisory={} glow={}",
        view.stage,
        view.mastered,
        view.hold_progress,
        view.stall_advisory,
        view.success_glow
    );
    println!("  指示: {}", view.instruction);
    if let Some(feedback) = view.feedback {
        println!("  フィードバック: {}", feedback);
    }
}

fn set(frame: &mut LandmarkFrame, idx: LandmarkIndex, x: f32, y: f32) {
    frame.landmarks[idx as usize] = Landmark::new(x, y, 0.9);
}

/// 両足接地の直立フレーム（ほとんどの種目で不成立）
fn standing_frame() -> LandmarkFrame {
    let mut frame = LandmarkFrame::default();
    set(&mut frame, LandmarkIndex::Nose, 0.5, 0.1);
    set(&mut frame, LandmarkIndex::LeftWrist, 0.35, 0.5);
    set(&mut frame, LandmarkIndex::RightWrist, 0.65, 0.5);
    set(&mut frame, LandmarkIndex::LeftHip, 0.45, 0.5);
    set(&mut frame, LandmarkIndex::RightHip, 0.55, 0.5);
    set(&mut frame, LandmarkIndex::LeftKnee, 0.45, 0.7);
    set(&mut frame, LandmarkIndex::RightKnee, 0.55, 0.7);
    set(&mut frame, LandmarkIndex::LeftFootIndex, 0.45, 0.9);
    set(&mut frame, LandmarkIndex::RightFootIndex, 0.55, 0.9);
    frame
}

/// 種目ごとの成立フレーム
fn qualifying_frame(id: BalanceType) -> LandmarkFrame {
    let mut frame = standing_frame();
    match id {
        BalanceType::OnePoint => {
            set(&mut frame, LandmarkIndex::LeftFootIndex, 0.45, 0.7);
        }
        BalanceType::Flamingo | BalanceType::KneeHug => {
            // 左足を高く上げ、膝を腰より上に
            set(&mut frame, LandmarkIndex::LeftFootIndex, 0.45, 0.6);
            set(&mut frame, LandmarkIndex::LeftKnee, 0.45, 0.4);
        }
        BalanceType::TwoPoint => {
            // 両足接地、両手首は十分高い位置のまま
        }
        BalanceType::ThreePoint => {
            // 左手首だけ浮かせ、残り3点を接地
            set(&mut frame, LandmarkIndex::LeftWrist, 0.3, 0.4);
            set(&mut frame, LandmarkIndex::RightWrist, 0.7, 0.88);
        }
        BalanceType::FourPoint => {}
        BalanceType::Airplane => {
            // 頭を支持足と腰の高さに寄せる
            set(&mut frame, LandmarkIndex::Nose, 0.2, 0.55);
            set(&mut frame, LandmarkIndex::LeftFootIndex, 0.45, 0.6);
        }
    }
    frame
}

/// 全ランドマークをずらして動き検出を誘発する
fn jittered(mut frame: LandmarkFrame) -> LandmarkFrame {
    for lm in frame.landmarks.iter_mut() {
        lm.x += 0.02;
    }
    frame
}
