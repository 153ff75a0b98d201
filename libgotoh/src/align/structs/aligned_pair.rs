use std::fmt::{Display, Formatter};

use crate::alphabet::{GAP_BYTE, UTF8_PIPE, UTF8_SPACE};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAlignmentError {
    #[error("aligned sequences have unequal lengths: {a_length} and {b_length}")]
    UnequalLength { a_length: usize, b_length: usize },
    #[error("both sequences have a gap in alignment column {column}")]
    DoubleGap { column: usize },
}

/// One column of a pairwise alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// A residue of A paired with a residue of B
    Aligned(u8, u8),
    /// A gap in A against a residue of B
    GapInA(u8),
    /// A residue of A against a gap in B
    GapInB(u8),
}

impl Column {
    pub fn new(a_byte: u8, b_byte: u8) -> Option<Self> {
        match (a_byte == GAP_BYTE, b_byte == GAP_BYTE) {
            (true, true) => None,
            (true, false) => Some(Column::GapInA(b_byte)),
            (false, true) => Some(Column::GapInB(a_byte)),
            (false, false) => Some(Column::Aligned(a_byte, b_byte)),
        }
    }
}

/// Two equal-length aligned sequences, using [`GAP_BYTE`] for gaps.
///
/// No column has a gap on both sides.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub(crate) aligned_a: Vec<u8>,
    pub(crate) aligned_b: Vec<u8>,
}

impl AlignedPair {
    pub fn new(aligned_a: Vec<u8>, aligned_b: Vec<u8>) -> Result<Self, InvalidAlignmentError> {
        check_columns(&aligned_a, &aligned_b)?;
        Ok(Self {
            aligned_a,
            aligned_b,
        })
    }

    pub fn from_strings(aligned_a: &str, aligned_b: &str) -> Result<Self, InvalidAlignmentError> {
        Self::new(aligned_a.as_bytes().to_vec(), aligned_b.as_bytes().to_vec())
    }

    pub fn aligned_a(&self) -> &[u8] {
        &self.aligned_a
    }

    pub fn aligned_b(&self) -> &[u8] {
        &self.aligned_b
    }

    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.aligned_a
            .iter()
            .zip(self.aligned_b.iter())
            .filter_map(|(&a, &b)| Column::new(a, b))
    }

    /// The number of columns that pair two residues.
    pub fn aligned_columns(&self) -> usize {
        self.columns()
            .filter(|c| matches!(c, Column::Aligned(..)))
            .count()
    }

    pub fn ungapped_a(&self) -> Vec<u8> {
        self.aligned_a
            .iter()
            .copied()
            .filter(|&b| b != GAP_BYTE)
            .collect()
    }

    pub fn ungapped_b(&self) -> Vec<u8> {
        self.aligned_b
            .iter()
            .copied()
            .filter(|&b| b != GAP_BYTE)
            .collect()
    }

    /// The line drawn between the two aligned sequences: a pipe for identical residues.
    pub fn middle_line(&self) -> Vec<u8> {
        self.columns()
            .map(|column| match column {
                Column::Aligned(a, b) if a.eq_ignore_ascii_case(&b) => UTF8_PIPE,
                _ => UTF8_SPACE,
            })
            .collect()
    }
}

pub(crate) fn check_columns(aligned_a: &[u8], aligned_b: &[u8]) -> Result<(), InvalidAlignmentError> {
    if aligned_a.len() != aligned_b.len() {
        return Err(InvalidAlignmentError::UnequalLength {
            a_length: aligned_a.len(),
            b_length: aligned_b.len(),
        });
    }

    match aligned_a
        .iter()
        .zip(aligned_b.iter())
        .position(|(&a, &b)| a == GAP_BYTE && b == GAP_BYTE)
    {
        Some(column) => Err(InvalidAlignmentError::DoubleGap { column }),
        None => Ok(()),
    }
}

impl Display for AlignedPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const LINE_WIDTH: usize = 60;
        let middle = self.middle_line();

        let blocks = self
            .aligned_a
            .chunks(LINE_WIDTH)
            .zip(middle.chunks(LINE_WIDTH))
            .zip(self.aligned_b.chunks(LINE_WIDTH));

        for (block_idx, ((top, mid), bottom)) in blocks.enumerate() {
            if block_idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", String::from_utf8_lossy(top))?;
            writeln!(f, "{}", String::from_utf8_lossy(mid))?;
            writeln!(f, "{}", String::from_utf8_lossy(bottom))?;
        }
        Ok(())
    }
}
