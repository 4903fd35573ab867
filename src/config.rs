use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// ホールド達成に必要な連続静止秒数
    #[serde(default = "default_hold_secs")]
    pub hold_secs: f32,
    /// 静止判定の総変位閾値（正規化座標）
    #[serde(default = "default_stillness_threshold")]
    pub stillness_threshold: f32,
    /// スタック注意喚起を出す経過秒数
    #[serde(default = "default_stall_advisory_secs")]
    pub stall_advisory_secs: f32,
    /// 強制エスカレーションする経過秒数
    #[serde(default = "default_stall_limit_secs")]
    pub stall_limit_secs: f32,
    /// ポーズ達成後の祝福ポーズ秒数
    #[serde(default = "default_mastery_pause_secs")]
    pub mastery_pause_secs: f32,
    /// エスカレーション通知からハンドオフまでの秒数
    #[serde(default = "default_redirect_delay_secs")]
    pub redirect_delay_secs: f32,
    /// 完了後にダッシュボードへ戻るまでの秒数
    #[serde(default = "default_done_exit_secs")]
    pub done_exit_secs: f32,
}

fn default_hold_secs() -> f32 { 3.0 }
fn default_stillness_threshold() -> f32 { 0.15 }
fn default_stall_advisory_secs() -> f32 { 7.0 }
fn default_stall_limit_secs() -> f32 { 10.0 }
fn default_mastery_pause_secs() -> f32 { 2.0 }
fn default_redirect_delay_secs() -> f32 { 1.5 }
fn default_done_exit_secs() -> f32 { 6.0 }

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hold_secs: default_hold_secs(),
            stillness_threshold: default_stillness_threshold(),
            stall_advisory_secs: default_stall_advisory_secs(),
            stall_limit_secs: default_stall_limit_secs(),
            mastery_pause_secs: default_mastery_pause_secs(),
            redirect_delay_secs: default_redirect_delay_secs(),
            done_exit_secs: default_done_exit_secs(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 読み込み失敗時はデフォルト設定を返す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = SessionConfig::default();
        assert_eq!(config.hold_secs, 3.0);
        assert_eq!(config.stillness_threshold, 0.15);
        assert_eq!(config.stall_advisory_secs, 7.0);
        assert_eq!(config.stall_limit_secs, 10.0);
        assert_eq!(config.mastery_pause_secs, 2.0);
        assert_eq!(config.redirect_delay_secs, 1.5);
        assert_eq!(config.done_exit_secs, 6.0);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [session]
            hold_secs = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.session.hold_secs, 5.0);
        // 未指定フィールドはデフォルト
        assert_eq!(config.session.stall_limit_secs, 10.0);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.session.hold_secs, 3.0);
    }
}
