use crate::align::structs::{AlignedPair, State, TraceMatrix};
use crate::alphabet::GAP_BYTE;
use crate::structs::Sequence;

use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TracebackError {
    #[error(
        "trace matrix covers {trace_a_length}x{trace_b_length} residues, \
         but the sequences have {a_length}x{b_length}"
    )]
    ShapeMismatch {
        trace_a_length: usize,
        trace_b_length: usize,
        a_length: usize,
        b_length: usize,
    },
    #[error("traceback entered the {state:?} state at ({a_idx}, {b_idx})")]
    StrandedState {
        state: State,
        a_idx: usize,
        b_idx: usize,
    },
}

/// Walk the back-pointers from (A, B) to the origin, producing one optimal alignment.
pub fn traceback(
    trace: &TraceMatrix,
    seq_a: &Sequence,
    seq_b: &Sequence,
) -> Result<AlignedPair, TracebackError> {
    if trace.a_length != seq_a.length || trace.b_length != seq_b.length {
        return Err(TracebackError::ShapeMismatch {
            trace_a_length: trace.a_length,
            trace_b_length: trace.b_length,
            a_length: seq_a.length,
            b_length: seq_b.length,
        });
    }

    let mut a_idx = seq_a.length;
    let mut b_idx = seq_b.length;

    let mut aligned_a: Vec<u8> = Vec::with_capacity(a_idx + b_idx);
    let mut aligned_b: Vec<u8> = Vec::with_capacity(a_idx + b_idx);

    let stranded = |state: State, a_idx: usize, b_idx: usize| TracebackError::StrandedState {
        state,
        a_idx,
        b_idx,
    };

    // the traceback starts in whichever state produced the final best score
    let mut state = trace.get_best(a_idx, b_idx);

    loop {
        state = match state {
            State::Origin => {
                if a_idx == 0 && b_idx == 0 {
                    break;
                }
                return Err(stranded(state, a_idx, b_idx));
            }
            State::Match => {
                if a_idx == 0 || b_idx == 0 {
                    return Err(stranded(state, a_idx, b_idx));
                }
                aligned_a.push(seq_a.utf8_bytes[a_idx]);
                aligned_b.push(seq_b.utf8_bytes[b_idx]);
                a_idx -= 1;
                b_idx -= 1;
                trace.get_best(a_idx, b_idx)
            }
            State::GapB => {
                if a_idx == 0 {
                    return Err(stranded(state, a_idx, b_idx));
                }
                aligned_a.push(seq_a.utf8_bytes[a_idx]);
                aligned_b.push(GAP_BYTE);
                let next = trace.get_gap_b(a_idx, b_idx);
                a_idx -= 1;
                next
            }
            State::GapA => {
                if b_idx == 0 {
                    return Err(stranded(state, a_idx, b_idx));
                }
                aligned_a.push(GAP_BYTE);
                aligned_b.push(seq_b.utf8_bytes[b_idx]);
                let next = trace.get_gap_a(a_idx, b_idx);
                b_idx -= 1;
                next
            }
        };
    }

    aligned_a.reverse();
    aligned_b.reverse();

    debug!("traceback produced {} alignment columns", aligned_a.len());

    // every step above consumes at least one residue, so no column is a double gap
    Ok(AlignedPair {
        aligned_a,
        aligned_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::affine::align;
    use crate::align::scoring::ScoringConfig;
    use crate::align::structs::Column;
    use crate::align::verify::recompute_score;
    use crate::alphabet::Alphabet;
    use assert2::{check, let_assert};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn nucleotides(bytes: &[u8]) -> Sequence {
        Sequence::from_utf8(bytes, Alphabet::Nucleotide).unwrap()
    }

    fn align_and_trace(
        seq_a: &Sequence,
        seq_b: &Sequence,
        config: &ScoringConfig,
    ) -> anyhow::Result<(f32, AlignedPair)> {
        let result = align(seq_a, seq_b, config)?;
        let pair = traceback(&result.trace, seq_a, seq_b)?;
        Ok((result.score, pair))
    }

    #[test]
    fn test_single_deletion() -> anyhow::Result<()> {
        let config = ScoringConfig::default();
        let (score, pair) = align_and_trace(&nucleotides(b"ACGT"), &nucleotides(b"AGT"), &config)?;

        check!(score == -8.0);
        check!(pair.aligned_a() == b"ACGT");
        check!(pair.aligned_b() == b"A_GT");
        check!(recompute_score(pair.aligned_a(), pair.aligned_b(), &config)? == score);
        Ok(())
    }

    #[test]
    fn test_empty_sequences() -> anyhow::Result<()> {
        let config = ScoringConfig::default();
        let (score, pair) = align_and_trace(&nucleotides(b""), &nucleotides(b""), &config)?;

        check!(score == 0.0);
        check!(pair.is_empty());
        Ok(())
    }

    #[test]
    fn test_all_gap_alignments() -> anyhow::Result<()> {
        let config = ScoringConfig::default();

        let (score, pair) = align_and_trace(&nucleotides(b"ACGT"), &nucleotides(b""), &config)?;
        check!(pair.aligned_a() == b"ACGT");
        check!(pair.aligned_b() == b"____");
        check!(recompute_score(pair.aligned_a(), pair.aligned_b(), &config)? == score);

        let (score, pair) = align_and_trace(&nucleotides(b""), &nucleotides(b"TT"), &config)?;
        check!(pair.aligned_a() == b"__");
        check!(pair.aligned_b() == b"TT");
        check!(score == -12.0);
        Ok(())
    }

    #[test]
    fn test_identical_sequences_have_no_gaps() -> anyhow::Result<()> {
        let seq = nucleotides(b"TTGACCAGTAGGAC");
        let (_, pair) = align_and_trace(&seq, &seq, &ScoringConfig::default())?;

        check!(pair.aligned_a() == seq.residues());
        check!(pair.aligned_b() == seq.residues());
        Ok(())
    }

    #[test]
    fn test_gap_switch() -> anyhow::Result<()> {
        // a mismatch costs more than a gap in each sequence, so
        // the alignment switches directly from one gap state to the other
        let config = ScoringConfig::linear(0.0, -5.0, -1.0)?;
        let (score, pair) = align_and_trace(&nucleotides(b"A"), &nucleotides(b"C"), &config)?;

        // GapB wins the tie at (1, 1) and was opened from the GapA run at (0, 1)
        check!(score == -2.0);
        check!(pair.aligned_a() == b"_A");
        check!(pair.aligned_b() == b"C_");
        check!(pair.rescore(&config)? == score);
        Ok(())
    }

    #[test]
    fn test_lowercase_residues_match() -> anyhow::Result<()> {
        let config = ScoringConfig::default();
        let (score, pair) = align_and_trace(&nucleotides(b"acgt"), &nucleotides(b"ACGT"), &config)?;

        check!(score == 4.0);
        check!(pair.aligned_a() == b"acgt");
        check!(recompute_score(pair.aligned_a(), pair.aligned_b(), &config)? == score);
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> anyhow::Result<()> {
        let config = ScoringConfig::default();
        let result = align(&nucleotides(b"ACGT"), &nucleotides(b"AGT"), &config)?;

        let_assert!(
            Err(TracebackError::ShapeMismatch { a_length: 3, .. }) =
                traceback(&result.trace, &nucleotides(b"ACG"), &nucleotides(b"AGT"))
        );
        Ok(())
    }

    #[test]
    fn test_stranded_state() {
        // a corrupted trace that claims a match on the first row
        let mut trace = TraceMatrix::new(0, 2);
        trace.set_best(0, 2, State::Match);

        let_assert!(
            Err(TracebackError::StrandedState {
                state: State::Match,
                a_idx: 0,
                b_idx: 2
            }) = traceback(&trace, &nucleotides(b""), &nucleotides(b"AC"))
        );
    }

    #[test]
    fn test_random_alignments() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(42);
        let configs = [
            ScoringConfig::default(),
            ScoringConfig::new(2.0, -3.0, -5.0, -2.0)?,
            ScoringConfig::new(1.0, -2.0, -2.5, -0.5)?,
            ScoringConfig::linear(1.0, -1.0, -1.0)?,
            ScoringConfig::linear(0.0, -1.0, -1.0)?,
        ];

        for _ in 0..200 {
            let seq_a = Sequence::random(rng.gen_range(0..40), Alphabet::Nucleotide, &mut rng);
            let seq_b = Sequence::random(rng.gen_range(0..40), Alphabet::Nucleotide, &mut rng);

            for config in configs.iter() {
                let (score, pair) = align_and_trace(&seq_a, &seq_b, config)?;

                // every column consumes at least one residue
                check!(pair.aligned_a().len() == pair.aligned_b().len());
                check!(pair.len() == seq_a.length + seq_b.length - pair.aligned_columns());
                check!(pair.columns().count() == pair.len());

                // removing the gaps gives back the input sequences
                check!(pair.ungapped_a() == seq_a.residues());
                check!(pair.ungapped_b() == seq_b.residues());

                // the gap runs are charged exactly as the recurrence charged them
                let recomputed = recompute_score(pair.aligned_a(), pair.aligned_b(), config)?;
                check!((recomputed - score).abs() <= 1e-4 * score.abs().max(1.0));

                // and the traceback is reproducible
                let (_, again) = align_and_trace(&seq_a, &seq_b, config)?;
                check!(again == pair);
            }
        }
        Ok(())
    }

    #[test]
    fn test_gap_columns_follow_pointers() -> anyhow::Result<()> {
        let config = ScoringConfig::new(1.0, -1.0, -3.0, -1.0)?;
        let (_, pair) = align_and_trace(
            &nucleotides(b"AAAACCCCGGGG"),
            &nucleotides(b"AAAAGGGG"),
            &config,
        )?;

        // the four C residues form one contiguous gap run
        let gap_runs = pair
            .columns()
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| !matches!(w[0], Column::GapInB(_)) && matches!(w[1], Column::GapInB(_)))
            .count();
        check!(gap_runs == 1);
        check!(pair.aligned_b() == b"AAAA____GGGG");
        Ok(())
    }
}
