mod aligned_pair;
pub use aligned_pair::{AlignedPair, Column, InvalidAlignmentError};

mod dp_matrix;
pub use dp_matrix::{DpMatrix, DpMatrixFlat};

mod trace_matrix;
pub use trace_matrix::{State, TraceMatrix};
