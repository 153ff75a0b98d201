use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("scoring parameter {name} must be finite, got: {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("failed to read scoring config: {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scoring config")]
    Malformed(#[from] serde_json::Error),
}

/// The four scalars of the affine gap scoring model.
///
/// A gap run of length L costs `gap_open + L * gap_extend`, wherever it sits in the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub match_score: f32,
    pub mismatch_score: f32,
    pub gap_open: f32,
    pub gap_extend: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: Self::DEFAULT_MATCH,
            mismatch_score: Self::DEFAULT_MISMATCH,
            gap_open: Self::DEFAULT_GAP_OPEN,
            gap_extend: Self::DEFAULT_GAP_EXTEND,
        }
    }
}

impl ScoringConfig {
    pub const DEFAULT_MATCH: f32 = 1.0;
    pub const DEFAULT_MISMATCH: f32 = -1.0;
    pub const DEFAULT_GAP_OPEN: f32 = -10.0;
    pub const DEFAULT_GAP_EXTEND: f32 = -1.0;

    pub fn new(
        match_score: f32,
        mismatch_score: f32,
        gap_open: f32,
        gap_extend: f32,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
        };
        config.validate()?;
        Ok(config)
    }

    /// A linear gap model: every gap character costs `gap`.
    pub fn linear(match_score: f32, mismatch_score: f32, gap: f32) -> Result<Self, ConfigurationError> {
        Self::new(match_score, mismatch_score, 0.0, gap)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let file = File::open(&path).map_err(|source| ConfigurationError::Unreadable {
            path: path.as_ref().to_string_lossy().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let params = [
            ("match_score", self.match_score),
            ("mismatch_score", self.mismatch_score),
            ("gap_open", self.gap_open),
            ("gap_extend", self.gap_extend),
        ];

        match params.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(name, value)) => Err(ConfigurationError::NonFinite { name, value }),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn substitution(&self, equal: bool) -> f32 {
        if equal {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// The cost of opening a gap run, charged for its first character.
    #[inline]
    pub fn gap_first(&self) -> f32 {
        self.gap_open + self.gap_extend
    }

    /// The total cost of a single gap run of `length` characters.
    pub fn gap_run(&self, length: usize) -> f32 {
        match length {
            0 => 0.0,
            _ => self.gap_first() + (length - 1) as f32 * self.gap_extend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        check!(config.match_score == 1.0);
        check!(config.mismatch_score == -1.0);
        check!(config.gap_open == -10.0);
        check!(config.gap_extend == -1.0);
        check!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let_assert!(
            Err(ConfigurationError::NonFinite { name, .. }) =
                ScoringConfig::new(1.0, f32::NAN, -10.0, -1.0)
        );
        check!(name == "mismatch_score");

        let_assert!(
            Err(ConfigurationError::NonFinite { name, value }) =
                ScoringConfig::new(1.0, -1.0, -10.0, -f32::INFINITY)
        );
        check!(name == "gap_extend");
        check!(value == -f32::INFINITY);
    }

    #[test]
    fn test_gap_run() {
        let config = ScoringConfig::default();
        check!(config.gap_run(0) == 0.0);
        check!(config.gap_run(1) == -11.0);
        check!(config.gap_run(4) == -14.0);

        let linear = ScoringConfig::linear(1.0, -1.0, -2.0).unwrap();
        check!(linear.gap_run(3) == -6.0);
    }

    #[test]
    fn test_from_reader() -> anyhow::Result<()> {
        let json = br#"{"match_score": 2, "mismatch_score": -3, "gap_open": -5, "gap_extend": -2}"#;
        let config = ScoringConfig::from_reader(&json[..])?;
        check!(config == ScoringConfig::new(2.0, -3.0, -5.0, -2.0)?);
        Ok(())
    }

    #[test]
    fn test_from_reader_missing_field() {
        let json = br#"{"match_score": 2, "mismatch_score": -3, "gap_open": -5}"#;
        let_assert!(Err(ConfigurationError::Malformed(_)) = ScoringConfig::from_reader(&json[..]));
    }

    #[test]
    fn test_from_json_missing_file() {
        let_assert!(
            Err(ConfigurationError::Unreadable { path, .. }) =
                ScoringConfig::from_json("/nonexistent/scoring.json")
        );
        check!(path == "/nonexistent/scoring.json");
    }
}
