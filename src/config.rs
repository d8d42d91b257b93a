//! Runtime configuration.
//!
//! Each setting is resolved from its command-line flag, then its environment
//! variable, then the default.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use pico_args::Arguments;
use thiserror::Error;

use crate::core::{CoreError, Corpus, SessionConfig};
use crate::types::{DEFAULT_SUBSET_SIZE, MISMATCH_CLEAR_MS};

pub const ENV_SUBSET: &str = "VERBOS_SUBSET";
pub const ENV_DELAY_MS: &str = "VERBOS_DELAY_MS";
pub const ENV_SEED: &str = "VERBOS_SEED";
pub const ENV_CORPUS: &str = "VERBOS_CORPUS";
pub const ENV_LOG: &str = "VERBOS_LOG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed command line
    #[error("Invalid arguments: {0}")]
    Args(#[from] pico_args::Error),

    /// Environment variable could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    /// Leftover command-line arguments
    #[error("Unexpected arguments: {0:?}")]
    Unexpected(Vec<OsString>),

    /// A round needs at least one pair
    #[error("Subset size must be at least 1")]
    ZeroSubset,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Entries drawn per round
    pub subset_size: usize,
    /// How long a mismatched pair stays highlighted
    pub mismatch_clear_ms: u32,
    /// Fixed RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u32>,
    /// Custom corpus file; the built-in verbs are used when absent
    pub corpus_path: Option<PathBuf>,
    /// Log file (the terminal is occupied by the game)
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subset_size: DEFAULT_SUBSET_SIZE,
            mismatch_clear_ms: MISMATCH_CLEAR_MS,
            seed: None,
            corpus_path: None,
            log_path: default_log_path(),
        }
    }
}

impl AppConfig {
    /// Resolve from the process arguments and environment.
    pub fn from_env(args: Arguments) -> Result<Self, ConfigError> {
        Self::resolve(args, |var| env::var(var).ok())
    }

    /// Resolve from `args`, falling back to `lookup` for environment variables.
    ///
    /// The result is validated.
    pub fn resolve<F>(mut args: Arguments, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let subset_size = match args.opt_value_from_str("--subset")? {
            Some(v) => v,
            None => parse_env(&lookup, ENV_SUBSET)?.unwrap_or(defaults.subset_size),
        };
        let mismatch_clear_ms = match args.opt_value_from_str("--delay-ms")? {
            Some(v) => v,
            None => parse_env(&lookup, ENV_DELAY_MS)?.unwrap_or(defaults.mismatch_clear_ms),
        };
        let seed = match args.opt_value_from_str("--seed")? {
            Some(v) => Some(v),
            None => parse_env(&lookup, ENV_SEED)?,
        };
        let corpus_path = args
            .opt_value_from_os_str("--corpus", |s| Ok::<_, String>(PathBuf::from(s)))?
            .or_else(|| lookup(ENV_CORPUS).map(PathBuf::from));
        let log_path = args
            .opt_value_from_os_str("--log", |s| Ok::<_, String>(PathBuf::from(s)))?
            .or_else(|| lookup(ENV_LOG).map(PathBuf::from))
            .unwrap_or(defaults.log_path);

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(ConfigError::Unexpected(rest));
        }

        let config = Self {
            subset_size,
            mismatch_clear_ms,
            seed,
            corpus_path,
            log_path,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subset_size == 0 {
            return Err(ConfigError::ZeroSubset);
        }
        Ok(())
    }

    /// Session settings, picking a clock-derived seed if none was given.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            subset_size: self.subset_size,
            mismatch_clear_ms: self.mismatch_clear_ms,
            seed: self.seed.unwrap_or_else(clock_seed),
        }
    }

    /// Load the configured corpus and make sure it can fill a round.
    pub fn load_corpus(&self) -> Result<Corpus, CoreError> {
        let corpus = match &self.corpus_path {
            Some(path) => Corpus::load(path)?,
            None => Corpus::builtin(),
        };
        if corpus.len() < self.subset_size {
            return Err(CoreError::InsufficientCorpus {
                available: corpus.len(),
                requested: self.subset_size,
            });
        }
        Ok(corpus)
    }
}

fn parse_env<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        None => Ok(None),
    }
}

fn default_log_path() -> PathBuf {
    env::temp_dir().join("verbos.log")
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Arguments {
        Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let config = AppConfig::resolve(args(&[]), no_env).unwrap();
        assert_eq!(config.subset_size, 8);
        assert_eq!(config.mismatch_clear_ms, 1000);
        assert_eq!(config.seed, None);
        assert_eq!(config.corpus_path, None);
        assert!(config.log_path.ends_with("verbos.log"));
    }

    #[test]
    fn flags_override_env() {
        let env: HashMap<&str, &str> = [(ENV_SUBSET, "4"), (ENV_SEED, "9")].into();
        let config = AppConfig::resolve(args(&["--subset", "6"]), |k| {
            env.get(k).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.subset_size, 6);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn all_flags_parse() {
        let config = AppConfig::resolve(
            args(&[
                "--subset", "3", "--delay-ms", "250", "--seed", "42", "--corpus", "verbs.json",
                "--log", "out.log",
            ]),
            no_env,
        )
        .unwrap();
        assert_eq!(
            config,
            AppConfig {
                subset_size: 3,
                mismatch_clear_ms: 250,
                seed: Some(42),
                corpus_path: Some(PathBuf::from("verbs.json")),
                log_path: PathBuf::from("out.log"),
            }
        );
        assert_eq!(config.session_config().seed, 42);
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = AppConfig::resolve(args(&[]), |k| {
            (k == ENV_DELAY_MS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_DELAY_MS, .. }));
    }

    #[test]
    fn bad_flag_value_is_reported() {
        let err = AppConfig::resolve(args(&["--subset", "many"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Args(_)));
    }

    #[test]
    fn zero_subset_rejected() {
        let err = AppConfig::resolve(args(&["--subset", "0"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSubset));
    }

    #[test]
    fn leftover_arguments_rejected() {
        let err = AppConfig::resolve(args(&["--bogus"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Unexpected(_)));
    }

    #[test]
    fn builtin_corpus_loads() {
        let corpus = AppConfig::default().load_corpus().unwrap();
        assert_eq!(corpus.len(), 31);
    }

    #[test]
    fn oversized_subset_fails_corpus_check() {
        let config = AppConfig {
            subset_size: 40,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.load_corpus(),
            Err(CoreError::InsufficientCorpus {
                available: 31,
                requested: 40
            })
        ));
    }
}
