use crate::align::scoring::ScoringConfig;
use crate::align::structs::{AlignedPair, InvalidAlignmentError};
use crate::alphabet::GAP_BYTE;
use crate::util::relative_error;

use serde::Serialize;
use thiserror::Error;

/// Score an aligned pair column by column, independently of the DP matrices.
///
/// Each side tracks whether it is inside a gap run: the first gap character of a run
/// costs `gap_open + gap_extend`, every following one `gap_extend`.
pub fn recompute_score(
    aligned_a: &[u8],
    aligned_b: &[u8],
    config: &ScoringConfig,
) -> Result<f32, InvalidAlignmentError> {
    if aligned_a.len() != aligned_b.len() {
        return Err(InvalidAlignmentError::UnequalLength {
            a_length: aligned_a.len(),
            b_length: aligned_b.len(),
        });
    }

    let mut score = 0.0f32;
    let mut in_gap_a = false;
    let mut in_gap_b = false;

    for (column, (&a, &b)) in aligned_a.iter().zip(aligned_b.iter()).enumerate() {
        match (a == GAP_BYTE, b == GAP_BYTE) {
            (true, true) => return Err(InvalidAlignmentError::DoubleGap { column }),
            (true, false) => {
                score += if in_gap_a {
                    config.gap_extend
                } else {
                    config.gap_first()
                };
                in_gap_a = true;
                in_gap_b = false;
            }
            (false, true) => {
                score += if in_gap_b {
                    config.gap_extend
                } else {
                    config.gap_first()
                };
                in_gap_b = true;
                in_gap_a = false;
            }
            (false, false) => {
                score += config.substitution(a.eq_ignore_ascii_case(&b));
                in_gap_a = false;
                in_gap_b = false;
            }
        }
    }

    Ok(score)
}

impl AlignedPair {
    pub fn rescore(&self, config: &ScoringConfig) -> Result<f32, InvalidAlignmentError> {
        recompute_score(&self.aligned_a, &self.aligned_b, config)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error(
    "recomputed score {recomputed} differs from claimed score {claimed} \
     (relative error {relative_error:.3e} > {tolerance:.3e})"
)]
pub struct ToleranceMismatch {
    pub claimed: f32,
    pub recomputed: f32,
    pub relative_error: f64,
    pub tolerance: f64,
}

/// The outcome of comparing a claimed alignment score against its recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verification {
    pub claimed: f32,
    pub recomputed: f32,
    pub relative_error: f64,
    pub tolerance: f64,
}

impl Verification {
    pub fn new(claimed: f32, recomputed: f32, tolerance: f64) -> Self {
        Self {
            claimed,
            recomputed,
            relative_error: relative_error(recomputed as f64, claimed as f64),
            tolerance,
        }
    }

    pub fn passed(&self) -> bool {
        self.relative_error <= self.tolerance
    }

    pub fn into_result(self) -> Result<Self, ToleranceMismatch> {
        match self.passed() {
            true => Ok(self),
            false => Err(ToleranceMismatch {
                claimed: self.claimed,
                recomputed: self.recomputed,
                relative_error: self.relative_error,
                tolerance: self.tolerance,
            }),
        }
    }
}

/// Recompute the score of `pair` and compare it with `claimed` under a relative `tolerance`.
pub fn verify(
    pair: &AlignedPair,
    claimed: f32,
    config: &ScoringConfig,
    tolerance: f64,
) -> Result<Verification, InvalidAlignmentError> {
    let recomputed = pair.rescore(config)?;
    Ok(Verification::new(claimed, recomputed, tolerance))
}
