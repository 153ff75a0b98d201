use crate::align::scoring::{ConfigurationError, ScoringConfig};
use crate::align::structs::{DpMatrix, DpMatrixFlat, State, TraceMatrix};
use crate::structs::Sequence;

use log::{debug, warn};

/// The filled matrices of one affine alignment run.
pub struct AlignmentResult {
    /// The optimal global alignment score, Best(A, B)
    pub score: f32,
    pub matrix: DpMatrixFlat,
    pub trace: TraceMatrix,
}

/// Fill the three-state affine gap matrices for a global alignment of `seq_a` and `seq_b`.
///
/// Ties are broken in favor of Match, then GapB, then GapA;
/// within a gap state, extending a run wins over opening one.
pub fn align(
    seq_a: &Sequence,
    seq_b: &Sequence,
    config: &ScoringConfig,
) -> Result<AlignmentResult, ConfigurationError> {
    config.validate()?;

    if config.gap_open > 0.0 {
        warn!(
            "positive gap open score ({}): adjacent gap runs may be scored as one run",
            config.gap_open
        );
    }

    let mut matrix = DpMatrixFlat::new(seq_a.length, seq_b.length);
    let mut trace = TraceMatrix::new(seq_a.length, seq_b.length);

    debug!(
        "filling {}x{} affine matrices",
        seq_a.length + 1,
        seq_b.length + 1
    );

    fill(seq_a, seq_b, config, &mut matrix, &mut trace);

    let score = matrix.get_best(seq_a.length, seq_b.length);
    debug!("optimal score: {score}");

    Ok(AlignmentResult {
        score,
        matrix,
        trace,
    })
}

pub fn fill(
    seq_a: &Sequence,
    seq_b: &Sequence,
    config: &ScoringConfig,
    matrix: &mut impl DpMatrix,
    trace: &mut TraceMatrix,
) {
    matrix.set_best(0, 0, 0.0);
    trace.set_best(0, 0, State::Origin);

    // the first row and column run through the same recurrence: the match
    // state and the crosswise gap state stay at -inf there, so the only
    // path into a boundary cell is a single gap run from the origin
    for a_idx in 0..=seq_a.length {
        for b_idx in 0..=seq_b.length {
            if a_idx == 0 && b_idx == 0 {
                continue;
            }

            if a_idx > 0 {
                let extend = matrix.get_gap_b(a_idx - 1, b_idx) + config.gap_extend;
                let open = matrix.get_best(a_idx - 1, b_idx) + config.gap_first();

                if extend >= open {
                    matrix.set_gap_b(a_idx, b_idx, extend);
                    trace.set_gap_b(a_idx, b_idx, State::GapB);
                } else {
                    matrix.set_gap_b(a_idx, b_idx, open);
                    trace.set_gap_b(a_idx, b_idx, trace.get_best(a_idx - 1, b_idx));
                }
            }

            if b_idx > 0 {
                let extend = matrix.get_gap_a(a_idx, b_idx - 1) + config.gap_extend;
                let open = matrix.get_best(a_idx, b_idx - 1) + config.gap_first();

                if extend >= open {
                    matrix.set_gap_a(a_idx, b_idx, extend);
                    trace.set_gap_a(a_idx, b_idx, State::GapA);
                } else {
                    matrix.set_gap_a(a_idx, b_idx, open);
                    trace.set_gap_a(a_idx, b_idx, trace.get_best(a_idx, b_idx - 1));
                }
            }

            if a_idx > 0 && b_idx > 0 {
                let equal = seq_a.digital_bytes[a_idx] == seq_b.digital_bytes[b_idx];
                let diagonal =
                    matrix.get_best(a_idx - 1, b_idx - 1) + config.substitution(equal);
                matrix.set_match(a_idx, b_idx, diagonal);
            }

            let match_score = matrix.get_match(a_idx, b_idx);
            let gap_b_score = matrix.get_gap_b(a_idx, b_idx);
            let gap_a_score = matrix.get_gap_a(a_idx, b_idx);

            let (best, state) = if match_score >= gap_b_score && match_score >= gap_a_score {
                (match_score, State::Match)
            } else if gap_b_score >= gap_a_score {
                (gap_b_score, State::GapB)
            } else {
                (gap_a_score, State::GapA)
            };

            matrix.set_best(a_idx, b_idx, best);
            trace.set_best(a_idx, b_idx, state);
        }
    }
}
