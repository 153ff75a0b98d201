use std::fmt::{Display, Formatter};
use std::io::Write;

/// The states of the affine alignment state machine, used as back-pointer tags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum State {
    /// The empty alignment at (0, 0)
    #[default]
    Origin,
    /// A column pairing a residue of A with a residue of B
    Match,
    /// A column with a residue of A against a gap (a gap charged to B)
    GapB,
    /// A column with a gap against a residue of B (a gap charged to A)
    GapA,
}

impl State {
    pub const fn symbol(&self) -> char {
        match self {
            State::Origin => 'O',
            State::Match => 'M',
            State::GapB => 'X',
            State::GapA => 'Y',
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The back-pointers written while filling the affine DP matrices.
///
/// Every pointer names the state that the traceback moves into next:
///
///   - `best`: the state that produced the best score at (i, j); the traceback
///     starts here at (A, B), and a Match column at (i, j) continues at `best` (i-1, j-1)
///   - `gap_b`: the state preceding a GapB column that ends at (i, j);
///     `GapB` when the run was extended, otherwise `best` at (i-1, j)
///   - `gap_a`: the state preceding a GapA column that ends at (i, j);
///     `GapA` when the run was extended, otherwise `best` at (i, j-1)
#[derive(Default, Clone)]
pub struct TraceMatrix {
    pub a_length: usize,
    pub b_length: usize,
    best: Vec<State>,
    gap_b: Vec<State>,
    gap_a: Vec<State>,
}

impl TraceMatrix {
    pub fn new(a_length: usize, b_length: usize) -> Self {
        let size = (a_length + 1) * (b_length + 1);
        Self {
            a_length,
            b_length,
            best: vec![State::Origin; size],
            gap_b: vec![State::Origin; size],
            gap_a: vec![State::Origin; size],
        }
    }

    #[inline]
    fn idx(&self, a_idx: usize, b_idx: usize) -> usize {
        debug_assert!(a_idx <= self.a_length);
        debug_assert!(b_idx <= self.b_length);
        a_idx * (self.b_length + 1) + b_idx
    }

    #[inline]
    pub fn get_best(&self, a_idx: usize, b_idx: usize) -> State {
        self.best[self.idx(a_idx, b_idx)]
    }

    #[inline]
    pub fn set_best(&mut self, a_idx: usize, b_idx: usize, state: State) {
        let idx = self.idx(a_idx, b_idx);
        self.best[idx] = state;
    }

    #[inline]
    pub fn get_gap_b(&self, a_idx: usize, b_idx: usize) -> State {
        self.gap_b[self.idx(a_idx, b_idx)]
    }

    #[inline]
    pub fn set_gap_b(&mut self, a_idx: usize, b_idx: usize, state: State) {
        let idx = self.idx(a_idx, b_idx);
        self.gap_b[idx] = state;
    }

    #[inline]
    pub fn get_gap_a(&self, a_idx: usize, b_idx: usize) -> State {
        self.gap_a[self.idx(a_idx, b_idx)]
    }

    #[inline]
    pub fn set_gap_a(&mut self, a_idx: usize, b_idx: usize, state: State) {
        let idx = self.idx(a_idx, b_idx);
        self.gap_a[idx] = state;
    }

    pub fn dump(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let planes: [(&str, &Vec<State>); 3] =
            [("best", &self.best), ("gap_b", &self.gap_b), ("gap_a", &self.gap_a)];

        for (name, plane) in planes {
            writeln!(out, "{name}")?;
            for row in plane.chunks(self.b_length + 1) {
                let line: String = row.iter().map(State::symbol).collect();
                writeln!(out, "{line}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
