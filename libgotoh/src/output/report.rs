use std::io::{BufRead, Write};
use std::time::Duration;

use crate::align::structs::{AlignedPair, InvalidAlignmentError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportParseError {
    #[error("report has no \"Alignment Score:\" line")]
    MissingScore,
    #[error("malformed alignment score: {0}")]
    MalformedScore(String),
    #[error("report has fewer than two \"Aligned ...:\" blocks")]
    MissingAlignment,
    #[error("report holds an invalid alignment")]
    InvalidAlignment(#[from] InvalidAlignmentError),
    #[error("failed to read report")]
    Io(#[from] std::io::Error),
}

const SCORE_PREFIX: &str = "Alignment Score:";
const TIME_PREFIX: &str = "Execution Time:";
const ALIGNED_PREFIX: &str = "Aligned ";

/// The plain-text record of one alignment run: a score and two aligned blocks.
///
/// ```text
/// [Run 1]
/// Alignment Score: -8
/// Execution Time: 0.00 seconds
///
/// Aligned A:
/// ACGT
///
/// Aligned B:
/// A_GT
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentReport {
    pub title: String,
    pub score: f32,
    pub elapsed: Option<Duration>,
    pub label_a: String,
    pub label_b: String,
    pub pair: AlignedPair,
}

impl AlignmentReport {
    pub fn new(title: impl Into<String>, score: f32, pair: AlignedPair) -> Self {
        Self {
            title: title.into(),
            score,
            elapsed: None,
            label_a: "A".to_string(),
            label_b: "B".to_string(),
            pair,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    pub fn with_labels(mut self, label_a: impl Into<String>, label_b: impl Into<String>) -> Self {
        self.label_a = label_a.into();
        self.label_b = label_b.into();
        self
    }

    pub fn write(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "[{}]", self.title)?;
        writeln!(out, "{SCORE_PREFIX} {}", self.score)?;
        if let Some(elapsed) = self.elapsed {
            writeln!(out, "{TIME_PREFIX} {:.2} seconds", elapsed.as_secs_f64())?;
        }
        writeln!(out)?;
        writeln!(out, "{ALIGNED_PREFIX}{}:", self.label_a)?;
        writeln!(out, "{}\n", String::from_utf8_lossy(self.pair.aligned_a()))?;
        writeln!(out, "{ALIGNED_PREFIX}{}:", self.label_b)?;
        writeln!(out, "{}", String::from_utf8_lossy(self.pair.aligned_b()))?;
        Ok(())
    }

    /// Read a report back. The first "Aligned ...:" block is taken as A, the second as B.
    pub fn parse(reader: impl BufRead) -> Result<Self, ReportParseError> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;

        let title = lines
            .iter()
            .map(|l| l.trim())
            .find(|l| l.starts_with('[') && l.ends_with(']'))
            .map(|l| l[1..l.len() - 1].to_string())
            .unwrap_or_default();

        let score_text = lines
            .iter()
            .find_map(|l| l.trim().strip_prefix(SCORE_PREFIX))
            .ok_or(ReportParseError::MissingScore)?
            .trim();

        let score: f32 = score_text
            .parse()
            .map_err(|_| ReportParseError::MalformedScore(score_text.to_string()))?;

        let elapsed = lines
            .iter()
            .find_map(|l| l.trim().strip_prefix(TIME_PREFIX))
            .and_then(|t| t.trim().trim_end_matches("seconds").trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64);

        // each block is a label line followed by the aligned sequence
        let mut blocks = lines.iter().enumerate().filter_map(|(idx, line)| {
            let label = line.trim().strip_prefix(ALIGNED_PREFIX)?.strip_suffix(':')?;
            let sequence = lines.get(idx + 1)?.trim();
            Some((label.to_string(), sequence.to_string()))
        });

        let (label_a, aligned_a) = blocks.next().ok_or(ReportParseError::MissingAlignment)?;
        let (label_b, aligned_b) = blocks.next().ok_or(ReportParseError::MissingAlignment)?;

        Ok(Self {
            title,
            score,
            elapsed,
            label_a,
            label_b,
            pair: AlignedPair::from_strings(&aligned_a, &aligned_b)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_write() -> anyhow::Result<()> {
        let report = AlignmentReport::new("Run 1", -8.0, AlignedPair::from_strings("ACGT", "A_GT")?)
            .with_elapsed(Duration::from_millis(1234));

        let mut out: Vec<u8> = vec![];
        report.write(&mut out)?;

        check!(
            String::from_utf8(out)?
                == "[Run 1]\n\
                    Alignment Score: -8\n\
                    Execution Time: 1.23 seconds\n\
                    \n\
                    Aligned A:\n\
                    ACGT\n\
                    \n\
                    Aligned B:\n\
                    A_GT\n"
        );
        Ok(())
    }

    #[test]
    fn test_parse_written_report() -> anyhow::Result<()> {
        let report = AlignmentReport::new("human vs chimp", 12.5, AlignedPair::from_strings("AC_GT", "ACCG_")?)
            .with_labels("Human", "chimp");

        let mut out: Vec<u8> = vec![];
        report.write(&mut out)?;
        let parsed = AlignmentReport::parse(&out[..])?;

        check!(parsed == report);
        Ok(())
    }

    #[test]
    fn test_parse_without_time_or_title() -> anyhow::Result<()> {
        let text = "Alignment Score: 3\n\nAligned A:\nACG\n\nAligned B:\nACG\n";
        let report = AlignmentReport::parse(text.as_bytes())?;

        check!(report.title.is_empty());
        check!(report.score == 3.0);
        check!(report.elapsed.is_none());
        check!(report.pair.aligned_a() == b"ACG");
        Ok(())
    }

    #[test]
    fn test_parse_failures() {
        let_assert!(
            Err(ReportParseError::MissingScore) =
                AlignmentReport::parse("Aligned A:\nAC\n\nAligned B:\nAC\n".as_bytes())
        );
        let_assert!(
            Err(ReportParseError::MalformedScore(text)) = AlignmentReport::parse(
                "Alignment Score: lots\nAligned A:\nAC\nAligned B:\nAC\n".as_bytes()
            )
        );
        check!(text == "lots");
        let_assert!(
            Err(ReportParseError::MissingAlignment) =
                AlignmentReport::parse("Alignment Score: 1\nAligned A:\nAC\n".as_bytes())
        );
        let_assert!(
            Err(ReportParseError::InvalidAlignment(InvalidAlignmentError::DoubleGap { column: 0 })) =
                AlignmentReport::parse(
                    "Alignment Score: 1\nAligned A:\n_C\nAligned B:\n_C\n".as_bytes()
                )
        );
    }
}
