use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const SCORE_FILE_VAR: &str = "NETDRILL_SCORE_FILE";
pub const TOP_N_VAR: &str = "NETDRILL_TOP_N";
pub const QUESTIONS_VAR: &str = "NETDRILL_QUESTIONS";
pub const SPEEDRUN_SECS_VAR: &str = "NETDRILL_SPEEDRUN_SECS";
pub const SEED_VAR: &str = "NETDRILL_SEED";

const DEFAULT_SCORE_FILE: &str = "netdrill_scores.json";
const DEFAULT_TOP_N: usize = 10;
const DEFAULT_QUESTIONS: usize = 10;
const DEFAULT_SPEEDRUN_SECS: u64 = 60;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from `NETDRILL_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub score_file: PathBuf,
    /// Entries kept per drill/mode/difficulty board.
    pub top_n: usize,
    /// Rounds in classic mode.
    pub questions: usize,
    pub speedrun: Duration,
    /// Fixed RNG seed; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
            top_n: DEFAULT_TOP_N,
            questions: DEFAULT_QUESTIONS,
            speedrun: Duration::from_secs(DEFAULT_SPEEDRUN_SECS),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let defaults = Self::default();

        let score_file = lookup(SCORE_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.score_file);

        let top_n = positive(&lookup, TOP_N_VAR)?.unwrap_or(defaults.top_n);
        let questions = positive(&lookup, QUESTIONS_VAR)?.unwrap_or(defaults.questions);
        let speedrun = positive::<u64>(&lookup, SPEEDRUN_SECS_VAR)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.speedrun);
        let seed = parse_var(&lookup, SEED_VAR)?;

        Ok(Self {
            score_file,
            top_n,
            questions,
            speedrun,
            seed,
        })
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ConfigResult<Option<T>> {
    let value = match lookup(key) {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };

    value.trim().parse::<T>().map(Some).map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: value.clone(),
        reason: "not a valid number".to_string(),
    })
}

fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr + PartialEq + Default + ToString,
{
    match parse_var::<T>(lookup, key)? {
        Some(n) if n == T::default() => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: n.to_string(),
            reason: "must be at least 1".to_string(),
        }),
        other => Ok(other),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.speedrun, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (SCORE_FILE_VAR, "/tmp/scores.json"),
            (TOP_N_VAR, "20"),
            (QUESTIONS_VAR, " 5 "),
            (SPEEDRUN_SECS_VAR, "30"),
            (SEED_VAR, "42"),
        ]))
        .unwrap();

        assert_eq!(config.score_file, PathBuf::from("/tmp/scores.json"));
        assert_eq!(config.top_n, 20);
        assert_eq!(config.questions, 5);
        assert_eq!(config.speedrun, Duration::from_secs(30));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup_from(&[(TOP_N_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == TOP_N_VAR));
    }

    #[test]
    fn test_zero_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(QUESTIONS_VAR, "0")])).unwrap_err();
        assert!(err.to_string().contains("must be at least 1"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[(SEED_VAR, ""), (SCORE_FILE_VAR, "  ")])).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.score_file, PathBuf::from(DEFAULT_SCORE_FILE));
    }
}
