//! Application-level configuration loading, including the token-economy policy.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ESCAPE_ROOM_BACK_CONFIG_PATH";

/// Token-economy policy knobs. Both exist because the behavior changed
/// between revisions of the original game; the policy is explicit
/// configuration rather than an implicit side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// When `true`, hint and reveal purchases with an insufficient balance
    /// fail with a precondition error instead of driving `tokens` negative.
    pub enforce_min_balance: bool,
    /// Tokens debited for an incorrect guess against an unsolved clue.
    /// `0` disables the penalty.
    pub wrong_guess_penalty: u32,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            enforce_min_balance: false,
            wrong_guess_penalty: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    token_policy: TokenPolicy,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in defaults when the file is absent or unparseable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        enforce_min_balance = config.token_policy.enforce_min_balance,
                        wrong_guess_penalty = config.token_policy.wrong_guess_penalty,
                        "loaded token policy from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Build a configuration with an explicit token policy (used by tests).
    pub fn with_token_policy(token_policy: TokenPolicy) -> Self {
        Self { token_policy }
    }

    /// The active token-economy policy.
    pub fn token_policy(&self) -> TokenPolicy {
        self.token_policy
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    token_policy: RawTokenPolicy,
}

#[derive(Debug, Default, Deserialize)]
struct RawTokenPolicy {
    enforce_min_balance: Option<bool>,
    wrong_guess_penalty: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = TokenPolicy::default();
        Self {
            token_policy: TokenPolicy {
                enforce_min_balance: value
                    .token_policy
                    .enforce_min_balance
                    .unwrap_or(defaults.enforce_min_balance),
                wrong_guess_penalty: value
                    .token_policy
                    .wrong_guess_penalty
                    .unwrap_or(defaults.wrong_guess_penalty),
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_negative_balance_and_penalize_wrong_guesses() {
        let policy = TokenPolicy::default();
        assert!(!policy.enforce_min_balance);
        assert_eq!(policy.wrong_guess_penalty, 1);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"token_policy": {"enforce_min_balance": true}}"#).unwrap();
        let config: AppConfig = raw.into();
        assert!(config.token_policy().enforce_min_balance);
        assert_eq!(config.token_policy().wrong_guess_penalty, 1);
    }

    #[test]
    fn empty_config_object_is_valid() {
        let raw: RawConfig = serde_json::from_str("{}").unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.token_policy(), TokenPolicy::default());
    }
}
