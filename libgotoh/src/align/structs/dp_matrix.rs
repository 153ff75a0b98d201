use std::io::Write;

use anyhow::Result;

/// Score storage for the three-state affine recurrence.
///
/// Rows are indexed by positions in sequence A and columns by positions in sequence B,
/// both ranging over `0..=length`.
pub trait DpMatrix {
    fn a_length(&self) -> usize;
    fn b_length(&self) -> usize;
    /// The best score of an alignment whose last column pairs A\[a_idx] with B\[b_idx].
    fn get_match(&self, a_idx: usize, b_idx: usize) -> f32;
    fn set_match(&mut self, a_idx: usize, b_idx: usize, value: f32);
    /// The best score of an alignment whose last column is A\[a_idx] against a gap.
    fn get_gap_b(&self, a_idx: usize, b_idx: usize) -> f32;
    fn set_gap_b(&mut self, a_idx: usize, b_idx: usize, value: f32);
    /// The best score of an alignment whose last column is a gap against B\[b_idx].
    fn get_gap_a(&self, a_idx: usize, b_idx: usize) -> f32;
    fn set_gap_a(&mut self, a_idx: usize, b_idx: usize, value: f32);
    /// The best score over all three states.
    fn get_best(&self, a_idx: usize, b_idx: usize) -> f32;
    fn set_best(&mut self, a_idx: usize, b_idx: usize, value: f32);
    fn dump(&self, out: &mut impl Write) -> Result<()>
    where
        Self: Sized,
    {
        let a_idx_width = self.a_length().to_string().len();
        let first_column_width = a_idx_width + 3;
        let column_width = 10;
        let precision = 2;

        // write the B indices
        write!(out, "{}", " ".repeat(first_column_width - 1))?;
        for b_idx in 0..=self.b_length() {
            write!(out, "{:w$} ", b_idx, w = column_width)?;
        }
        writeln!(out)?;

        write!(out, "{}", " ".repeat(first_column_width))?;
        for _ in 0..=self.b_length() {
            write!(out, "   {} ", "-".repeat(column_width - 3))?;
        }
        writeln!(out)?;

        type Getter<M> = fn(&M, usize, usize) -> f32;
        let planes: [(&str, Getter<Self>); 4] = [
            ("M", Self::get_match),
            ("X", Self::get_gap_b),
            ("Y", Self::get_gap_a),
            ("*", Self::get_best),
        ];

        for a_idx in 0..=self.a_length() {
            for (label, getter) in planes.iter() {
                write!(out, "{:w$} {} ", a_idx, label, w = a_idx_width)?;
                for b_idx in 0..=self.b_length() {
                    write!(
                        out,
                        "{:w$.p$} ",
                        getter(self, a_idx, b_idx),
                        w = column_width,
                        p = precision
                    )?;
                }
                writeln!(out)?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct DpMatrixFlat {
    pub a_length: usize,
    pub b_length: usize,
    /// The DP matrix cells as a flat vector.
    //
    // the data is stored in the following pattern:
    //     [
    //
    //         m_(0, 0), x_(0, 0), y_(0, 0), b_(0, 0),
    //         m_(0, 1), x_(0, 1), y_(0, 1), b_(0, 1),
    //         ...
    //         m_(A, B), x_(A, B), y_(A, B), b_(A, B)
    //
    //     ]
    //
    // where:
    //
    //     A:        <a_length>
    //     B:        <b_length>
    //     m_(i, j): the match score at cell (i, j)
    //     x_(i, j): the gap-in-B score at cell (i, j)
    //     y_(i, j): the gap-in-A score at cell (i, j)
    //     b_(i, j): the best score at cell (i, j)
    //
    pub data: Vec<f32>,
}

impl DpMatrixFlat {
    const NUM_PLANES: usize = 4;
    const MATCH_OFFSET: usize = 0;
    const GAP_B_OFFSET: usize = 1;
    const GAP_A_OFFSET: usize = 2;
    const BEST_OFFSET: usize = 3;

    pub fn new(a_length: usize, b_length: usize) -> Self {
        DpMatrixFlat {
            a_length,
            b_length,
            data: vec![-f32::INFINITY; Self::NUM_PLANES * (a_length + 1) * (b_length + 1)],
        }
    }

    #[inline]
    fn idx(&self, a_idx: usize, b_idx: usize, offset: usize) -> usize {
        debug_assert!(a_idx <= self.a_length);
        debug_assert!(b_idx <= self.b_length);
        Self::NUM_PLANES * (a_idx * (self.b_length + 1) + b_idx) + offset
    }
}

impl DpMatrix for DpMatrixFlat {
    fn a_length(&self) -> usize {
        self.a_length
    }

    fn b_length(&self) -> usize {
        self.b_length
    }

    #[inline]
    fn get_match(&self, a_idx: usize, b_idx: usize) -> f32 {
        self.data[self.idx(a_idx, b_idx, Self::MATCH_OFFSET)]
    }

    #[inline]
    fn set_match(&mut self, a_idx: usize, b_idx: usize, value: f32) {
        let idx = self.idx(a_idx, b_idx, Self::MATCH_OFFSET);
        self.data[idx] = value;
    }

    #[inline]
    fn get_gap_b(&self, a_idx: usize, b_idx: usize) -> f32 {
        self.data[self.idx(a_idx, b_idx, Self::GAP_B_OFFSET)]
    }

    #[inline]
    fn set_gap_b(&mut self, a_idx: usize, b_idx: usize, value: f32) {
        let idx = self.idx(a_idx, b_idx, Self::GAP_B_OFFSET);
        self.data[idx] = value;
    }

    #[inline]
    fn get_gap_a(&self, a_idx: usize, b_idx: usize) -> f32 {
        self.data[self.idx(a_idx, b_idx, Self::GAP_A_OFFSET)]
    }

    #[inline]
    fn set_gap_a(&mut self, a_idx: usize, b_idx: usize, value: f32) {
        let idx = self.idx(a_idx, b_idx, Self::GAP_A_OFFSET);
        self.data[idx] = value;
    }

    #[inline]
    fn get_best(&self, a_idx: usize, b_idx: usize) -> f32 {
        self.data[self.idx(a_idx, b_idx, Self::BEST_OFFSET)]
    }

    #[inline]
    fn set_best(&mut self, a_idx: usize, b_idx: usize, value: f32) {
        let idx = self.idx(a_idx, b_idx, Self::BEST_OFFSET);
        self.data[idx] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_matrix_flat() {
        let mut m = [[-f32::INFINITY; 5]; 7];
        let mut x = [[-f32::INFINITY; 5]; 7];
        let mut y = [[-f32::INFINITY; 5]; 7];
        let mut b = [[-f32::INFINITY; 5]; 7];

        (1..=6).for_each(|row| {
            (1..=4).for_each(|col| {
                m[row][col] = (row * 10 + col) as f32 / 10.0;
                x[row][col] = ((row + 5) * 10 + col) as f32 / 10.0;
                y[row][col] = ((row + 10) * 10 + col) as f32 / 10.0;
                b[row][col] = ((row + 15) * 10 + col) as f32 / 10.0;
            });
        });

        // deliberately non-square, so row/column mixups show up
        let mut matrix = DpMatrixFlat::new(6, 4);

        (1..=6).for_each(|row| {
            (1..=4).for_each(|col| {
                matrix.set_match(row, col, m[row][col]);
                matrix.set_gap_b(row, col, x[row][col]);
                matrix.set_gap_a(row, col, y[row][col]);
                matrix.set_best(row, col, b[row][col]);
            });
        });

        (0..=6).for_each(|row| {
            (0..=4).for_each(|col| {
                assert_eq!(matrix.get_match(row, col), m[row][col]);
                assert_eq!(matrix.get_gap_b(row, col), x[row][col]);
                assert_eq!(matrix.get_gap_a(row, col), y[row][col]);
                assert_eq!(matrix.get_best(row, col), b[row][col]);
            });
        });
    }

    #[test]
    fn test_dump() -> anyhow::Result<()> {
        let mut matrix = DpMatrixFlat::new(1, 2);
        matrix.set_best(0, 0, 0.0);
        matrix.set_best(1, 2, -3.5);

        let mut out: Vec<u8> = vec![];
        matrix.dump(&mut out)?;
        let text = String::from_utf8(out)?;

        // header, rule, then four planes and a blank line per row
        assert_eq!(text.lines().count(), 2 + 2 * 5);
        assert!(text.contains("-3.50"));
        assert!(text.contains("inf"));
        Ok(())
    }
}
