use anyhow::Result;
use tracing::warn;

/// セッション完了後の講評を生成するコラボレーター
///
/// 実体はリモートのテキスト生成サービス想定。トランスポートは
/// 実装側の責務で、このコアは結果の文字列しか扱わない。
pub trait FeedbackGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// 生成結果が空だった場合の定型文
pub const EMPTY_RESPONSE_FALLBACK: &str = "Fantastic work today! Your stability is showing real improvement. Keep focusing on that core tension.";

/// 生成呼び出しが失敗した場合の定型文
pub const ERROR_FALLBACK: &str = "Great session! You're showing consistent progress in your balance and form. Remember to breathe through the holds.";

/// 完了した種目タイトルからコーチ講評のプロンプトを組み立てる
pub fn build_prompt(activity_title: &str) -> String {
    format!(
        "You are an elite gymnastics coach. The athlete just completed a \"{}\" balance session. \
         Provide a short (2-3 sentences), professional, and highly encouraging summary. \
         Focus on technical tips like core engagement, breathing, and visual focus (drilling). \
         Make it sound like a real coach in a gym.",
        activity_title
    )
}

/// ベストエフォートで講評を取得する
///
/// 失敗は診断ログに残すだけで呼び出し側には定型文を返す。
/// 自動リトライはしない。スコアやタイミングには一切影響しない。
pub fn session_summary<G: FeedbackGenerator>(generator: &G, activity_title: &str) -> String {
    match generator.generate(&build_prompt(activity_title)) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_RESPONSE_FALLBACK.to_string(),
        Err(e) => {
            warn!(error = %e, "feedback generator failed, using fallback");
            ERROR_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FixedGenerator(&'static str);

    impl FeedbackGenerator for FixedGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    impl FeedbackGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("service unavailable"))
        }
    }

    #[test]
    fn test_prompt_includes_activity_title() {
        let prompt = build_prompt("Flamingo Stand");
        assert!(prompt.contains("\"Flamingo Stand\""));
        assert!(prompt.contains("gymnastics coach"));
    }

    #[test]
    fn test_summary_passes_through_generated_text() {
        let summary = session_summary(&FixedGenerator("Strong holds today."), "One Point Balance");
        assert_eq!(summary, "Strong holds today.");
    }

    #[test]
    fn test_empty_response_uses_fallback() {
        let summary = session_summary(&FixedGenerator("  "), "One Point Balance");
        assert_eq!(summary, EMPTY_RESPONSE_FALLBACK);
    }

    #[test]
    fn test_failure_uses_fallback() {
        let summary = session_summary(&FailingGenerator, "One Point Balance");
        assert_eq!(summary, ERROR_FALLBACK);
    }
}
