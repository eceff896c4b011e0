//! Configuration for a Tinycoin [`Context`](crate::Context).

use serde::{Deserialize, Serialize};
use tinycoin_core::{DigestEncoding, MinerConfig, MAX_DIFFICULTY};

use crate::error::{Error, Result};

/// Configuration for the Context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mining configuration.
    pub miner: MinerConfig,
    /// Difficulty used by [`Context::mine_default`](crate::Context::mine_default).
    pub difficulty: usize,
    /// Encoding used when digests are rendered as text.
    pub digest_encoding: DigestEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            miner: MinerConfig::default(),
            difficulty: 0,
            digest_encoding: DigestEncoding::Hex,
        }
    }
}

impl Config {
    /// Reject settings that could never produce a result.
    pub fn validate(&self) -> Result<()> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(Error::InvalidConfig(format!(
                "difficulty {} exceeds {}",
                self.difficulty, MAX_DIFFICULTY
            )));
        }
        if self.miner.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be positive".into()));
        }
        if self.miner.workers == 0 {
            return Err(Error::InvalidConfig("workers must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.difficulty, 0);
        assert_eq!(config.miner.max_attempts, 100_000);
        assert_eq!(config.miner.workers, 1);
    }

    #[test]
    fn test_rejects_unsatisfiable_settings() {
        let mut config = Config {
            difficulty: 33,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.difficulty = 32;
        assert!(config.validate().is_ok());

        config.miner = config.miner.with_max_attempts(0);
        assert!(config.validate().is_err());

        config.miner = MinerConfig::default().with_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_worker_count_still_mines() {
        let config = Config {
            miner: MinerConfig::default()
                .with_max_attempts(10)
                .with_workers(usize::MAX),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        let ctx = crate::Context::new(config).unwrap();
        let block = ctx.mine(None, 0, &[]).unwrap();
        assert_eq!(block.nonce, 0);
    }

    #[test]
    fn test_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"difficulty": 2, "digest_encoding": "base64"}"#).unwrap();

        assert_eq!(config.difficulty, 2);
        assert_eq!(config.digest_encoding, DigestEncoding::Base64);
        assert_eq!(config.miner, MinerConfig::default());
    }
}
