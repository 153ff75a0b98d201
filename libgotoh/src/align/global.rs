use crate::align::affine::align;
use crate::align::scoring::ScoringConfig;
use crate::align::structs::AlignedPair;
use crate::align::traceback::traceback;
use crate::align::verify::{verify, Verification};
use crate::structs::Sequence;

use anyhow::Context;

/// An optimal global alignment of two sequences.
#[derive(Debug, Clone)]
pub struct PairwiseAlignment {
    /// The optimal score reported by the DP matrices
    pub score: f32,
    pub pair: AlignedPair,
    /// Present when the alignment was rescored against the claimed score
    pub verification: Option<Verification>,
}

/// Align `seq_a` against `seq_b` end to end, trace back one optimal alignment, and,
/// when a `tolerance` is given, rescore that alignment independently.
///
/// A verification that fails the tolerance is reported in the result, not as an error.
pub fn global_alignment(
    seq_a: &Sequence,
    seq_b: &Sequence,
    config: &ScoringConfig,
    tolerance: Option<f64>,
) -> anyhow::Result<PairwiseAlignment> {
    let result = align(seq_a, seq_b, config).context("failed to fill alignment matrices")?;

    // the matrices are dropped as soon as the traceback is done
    let pair = traceback(&result.trace, seq_a, seq_b).context("failed to trace back alignment")?;

    let verification = match tolerance {
        Some(tolerance) => Some(
            verify(&pair, result.score, config, tolerance)
                .context("traceback produced an invalid alignment")?,
        ),
        None => None,
    };

    Ok(PairwiseAlignment {
        score: result.score,
        pair,
        verification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::scoring::ConfigurationError;
    use crate::alphabet::Alphabet;
    use assert2::{check, let_assert};

    #[test]
    fn test_global_alignment() -> anyhow::Result<()> {
        let seq_a = Sequence::from_utf8(b"ACGT", Alphabet::Nucleotide)?;
        let seq_b = Sequence::from_utf8(b"AGT", Alphabet::Nucleotide)?;

        let alignment = global_alignment(&seq_a, &seq_b, &ScoringConfig::default(), Some(1e-6))?;

        check!(alignment.score == -8.0);
        check!(alignment.pair.to_string() == "ACGT\n| ||\nA_GT\n");
        let_assert!(Some(verification) = alignment.verification);
        check!(verification.passed());
        Ok(())
    }

    #[test]
    fn test_amino_alignment() -> anyhow::Result<()> {
        let seq_a = Sequence::from_utf8(b"MKVLAW", Alphabet::Amino)?;
        let seq_b = Sequence::from_utf8(b"MKVLW", Alphabet::Amino)?;
        let config = ScoringConfig::new(5.0, -4.0, -6.0, -1.0)?;

        let alignment = global_alignment(&seq_a, &seq_b, &config, Some(1e-6))?;

        check!(alignment.score == 5.0 * 5.0 - 7.0);
        check!(alignment.pair.ungapped_b() == b"MKVLW");
        check!(alignment.verification.map(|v| v.passed()) == Some(true));
        Ok(())
    }

    #[test]
    fn test_without_verification() -> anyhow::Result<()> {
        let seq = Sequence::from_utf8(b"ACGT", Alphabet::Nucleotide)?;
        let alignment = global_alignment(&seq, &seq, &ScoringConfig::default(), None)?;

        check!(alignment.score == 4.0);
        check!(alignment.verification.is_none());
        Ok(())
    }

    #[test]
    fn test_configuration_error() -> anyhow::Result<()> {
        let seq = Sequence::from_utf8(b"ACGT", Alphabet::Nucleotide)?;
        let config = ScoringConfig {
            match_score: f32::INFINITY,
            ..Default::default()
        };

        let_assert!(Err(err) = global_alignment(&seq, &seq, &config, None));
        check!(err.downcast_ref::<ConfigurationError>().is_some());
        Ok(())
    }
}
