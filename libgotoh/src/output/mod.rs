pub mod output_tabular;
pub mod report;

pub use output_tabular::{Field, RunSummary, TableFormat};
pub use report::{AlignmentReport, ReportParseError};
