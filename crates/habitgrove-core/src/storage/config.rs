//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default habit selection for new sessions
//! - Reward and penalty amounts
//! - Plant dryness policy
//! - Text completion endpoint settings
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::plant::DryPolicy;
use crate::streak::{RewardSchedule, MAX_REWARD};

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Habits registered when a session starts without an explicit selection.
    #[serde(default = "default_habits")]
    pub habits: Vec<String>,
    /// How many urges `urge list` shows by default.
    #[serde(default = "default_recent_urges")]
    pub recent_urges: usize,
}

/// Reward configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_check_in_base")]
    pub check_in_base: u64,
    #[serde(default = "default_break_penalty")]
    pub break_penalty: u64,
    #[serde(default = "default_activity_reward")]
    pub activity_reward: u64,
}

/// Plant configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantConfig {
    #[serde(default)]
    pub dry_policy: DryPolicy,
}

/// Text completion service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub plant: PlantConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

fn default_habits() -> Vec<String> {
    vec!["Smoking".into()]
}
fn default_recent_urges() -> usize {
    5
}
fn default_check_in_base() -> u64 {
    RewardSchedule::default().check_in_base
}
fn default_break_penalty() -> u64 {
    RewardSchedule::default().break_penalty
}
fn default_activity_reward() -> u64 {
    RewardSchedule::default().activity_reward
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        .into()
}
fn default_api_key_env() -> String {
    "HABITGROVE_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            habits: default_habits(),
            recent_urges: default_recent_urges(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            check_in_base: default_check_in_base(),
            break_penalty: default_break_penalty(),
            activity_reward: default_activity_reward(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.completion.endpoint).map_err(|e| ConfigError::InvalidValue {
            key: "completion.endpoint".into(),
            message: e.to_string(),
        })?;
        for (key, value) in [
            ("rewards.check_in_base", self.rewards.check_in_base),
            ("rewards.break_penalty", self.rewards.break_penalty),
            ("rewards.activity_reward", self.rewards.activity_reward),
        ] {
            if value > MAX_REWARD {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be at most {MAX_REWARD}"),
                });
            }
        }
        if self.completion.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "completion.api_key_env".into(),
                message: "must name an environment variable".into(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field. On error the config is left unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn reward_schedule(&self) -> RewardSchedule {
        RewardSchedule {
            check_in_base: self.rewards.check_in_base,
            break_penalty: self.rewards.break_penalty,
            activity_reward: self.rewards.activity_reward,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.rewards.check_in_base, 10);
        assert_eq!(parsed.plant.dry_policy, DryPolicy::UntilCheckIn);
        assert_eq!(parsed.session.habits, vec!["Smoking".to_string()]);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[plant]\ndry_policy = \"one_shot\"\n").unwrap();
        assert_eq!(parsed.plant.dry_policy, DryPolicy::OneShot);
        assert_eq!(parsed.rewards.break_penalty, 15);
        assert_eq!(parsed.completion.timeout_secs, 30);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("rewards.activity_reward").as_deref(), Some("5"));
        assert_eq!(cfg.get("plant.dry_policy").as_deref(), Some("until_check_in"));
        assert!(cfg.get("rewards.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_number_enum_and_list() {
        let mut cfg = Config::default();
        cfg.apply("rewards.check_in_base", "20").unwrap();
        cfg.apply("plant.dry_policy", "one_shot").unwrap();
        cfg.apply("session.habits", r#"["Alcohol", "Vaping"]"#).unwrap();

        assert_eq!(cfg.reward_schedule().check_in_base, 20);
        assert_eq!(cfg.plant.dry_policy, DryPolicy::OneShot);
        assert_eq!(cfg.session.habits, vec!["Alcohol", "Vaping"]);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("rewards.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_bad_values_and_leaves_config_untouched() {
        let mut cfg = Config::default();
        assert!(cfg.apply("rewards.break_penalty", "-3").is_err());
        assert!(cfg.apply("plant.dry_policy", "forever").is_err());
        assert!(cfg.apply("completion.endpoint", "not a url").is_err());
        assert_eq!(cfg.rewards.break_penalty, 15);
        assert_eq!(cfg.plant.dry_policy, DryPolicy::UntilCheckIn);
    }

    #[test]
    fn apply_rejects_out_of_range_rewards() {
        let mut cfg = Config::default();
        let err = cfg
            .apply("rewards.break_penalty", "18446744073709551615")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "rewards.break_penalty"));
        assert!(cfg.apply("rewards.check_in_base", "1000001").is_err());
        assert_eq!(cfg.rewards.break_penalty, 15);
        assert_eq!(cfg.rewards.check_in_base, 10);

        cfg.apply("rewards.activity_reward", "1000000").unwrap();
        assert_eq!(cfg.rewards.activity_reward, 1_000_000);
    }

    #[test]
    fn load_from_rejects_out_of_range_rewards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[rewards]\ncheck_in_base = 9999999999\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.rewards.activity_reward, 5);

        let mut edited = cfg.clone();
        edited.apply("session.recent_urges", "9").unwrap();
        edited.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().session.recent_urges, 9);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rewards = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
