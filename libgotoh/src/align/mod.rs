pub mod structs;

mod affine;
pub use affine::{align, fill, AlignmentResult};

mod global;
pub use global::{global_alignment, PairwiseAlignment};

mod scoring;
pub use scoring::{ConfigurationError, ScoringConfig};

mod traceback;
pub use traceback::{traceback, TracebackError};

mod verify;
pub use verify::{recompute_score, verify, ToleranceMismatch, Verification};
