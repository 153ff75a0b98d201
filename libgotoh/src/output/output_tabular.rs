use crate::align::Verification;

use anyhow::Context;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum Field {
    Run,
    Columns,
    Score,
    Recomputed,
    RelError,
    Seconds,
    Status,
}

/// One line of a run summary: the outcome of aligning and verifying one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run: usize,
    pub columns: usize,
    pub score: f32,
    pub recomputed: f32,
    pub relative_error: f64,
    pub seconds: f64,
    pub passed: bool,
}

impl RunSummary {
    pub fn new(run: usize, columns: usize, verification: &Verification, seconds: f64) -> Self {
        Self {
            run,
            columns,
            score: verification.claimed,
            recomputed: verification.recomputed,
            relative_error: verification.relative_error,
            seconds,
            passed: verification.passed(),
        }
    }

    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }

    fn field_string(&self, field: &Field) -> String {
        match field {
            Field::Run => self.run.to_string(),
            Field::Columns => self.columns.to_string(),
            Field::Score => format!("{:.2}", self.score),
            Field::Recomputed => format!("{:.2}", self.recomputed),
            Field::RelError => format!("{:.1e}", self.relative_error),
            Field::Seconds => format!("{:.2}", self.seconds),
            Field::Status => self.status().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct TableFormat {
    pub fields: Vec<Field>,
    pub labels: Vec<Vec<String>>,
    pub min_widths: Vec<usize>,
    pub widths: Vec<usize>,
}

impl TableFormat {
    pub fn new(fields: &[Field]) -> anyhow::Result<Self> {
        let mut labels = vec![];
        let mut min_widths = vec![];
        let mut widths = vec![];

        // this regex matches CamelCaseWords
        let label_regex =
            regex::Regex::new(r"[A-Z][a-z]*").context("failed to build field label regex")?;

        // the words of a field label and the minimum width of its column
        let label_fn = |field: &Field| -> anyhow::Result<(Vec<String>, usize)> {
            let field_name = format!("{field:?}");

            let (label_words, lengths): (Vec<_>, Vec<_>) = label_regex
                .find_iter(&field_name)
                .map(|m| (m.as_str().to_lowercase(), m.len()))
                .unzip();

            let min_width = *lengths
                .iter()
                .max()
                .context("failed to produce max field label width")?;
            Ok((label_words, min_width))
        };

        for (idx, field) in fields.iter().enumerate() {
            let (label_words, min_width) = label_fn(field)?;
            // the first column also holds the "# " prefix
            let prefix_width = if idx == 0 { 2 } else { 0 };
            labels.push(label_words);
            widths.push(min_width + prefix_width);
            min_widths.push(min_width + prefix_width);
        }

        Ok(Self {
            fields: fields.to_vec(),
            labels,
            min_widths,
            widths,
        })
    }

    /// The columns used for run summaries, in display order.
    pub fn run_summary() -> anyhow::Result<Self> {
        Self::new(&[
            Field::Run,
            Field::Columns,
            Field::Score,
            Field::Recomputed,
            Field::RelError,
            Field::Seconds,
            Field::Status,
        ])
    }

    pub fn update_widths(&mut self, summary: &RunSummary) {
        self.fields.iter().enumerate().for_each(|(idx, field)| {
            let mut width = summary.field_string(field).len();
            if idx == 0 {
                width += 2;
            }
            self.widths[idx] = self.widths[idx].max(width);
        });
    }

    pub fn reset_widths(&mut self) {
        self.widths
            .iter_mut()
            .zip(self.min_widths.iter())
            .for_each(|(width, min_width)| *width = *min_width);
    }

    pub fn header(&self) -> anyhow::Result<String> {
        // one header row per word in the longest label
        let num_rows = self
            .labels
            .iter()
            .map(|l| l.len())
            .max()
            .context("field headers are empty")?;

        let mut header_rows: Vec<String> = vec!["# ".to_string(); num_rows + 1];

        self.labels
            .iter()
            .zip(self.widths.iter())
            .enumerate()
            .for_each(|(idx, (words, &width))| {
                let width = if idx == 0 { width - 2 } else { width };

                // labels are bottom-aligned
                let offset = num_rows - words.len();
                let padded = std::iter::repeat("")
                    .take(offset)
                    .chain(words.iter().map(|w| w.as_str()));

                padded.enumerate().for_each(|(row, token)| {
                    header_rows[row].push_str(&format!("{token:width$} "));
                });
                header_rows[num_rows].push_str(&format!("{} ", "-".repeat(width)));
            });

        Ok(header_rows
            .iter()
            .map(|row| row.trim_end())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn row(&self, summary: &RunSummary) -> String {
        self.fields
            .iter()
            .zip(self.widths.iter())
            .enumerate()
            .map(|(idx, (field, &width))| {
                let value = summary.field_string(field);
                if idx == 0 {
                    format!("  {value:width$}", width = width - 2)
                } else {
                    format!("{value:width$}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    /// The header followed by one row per summary, with widths fitted to the data.
    pub fn render(&mut self, summaries: &[RunSummary]) -> anyhow::Result<String> {
        self.reset_widths();
        summaries.iter().for_each(|s| self.update_widths(s));

        let mut lines = vec![self.header()?];
        lines.extend(summaries.iter().map(|s| self.row(s)));
        Ok(lines.join("\n"))
    }
}
