use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::args::ValidateArgs;
use crate::util::verdict;

use anyhow::Context;
use libgotoh::align::{verify, ScoringConfig};
use libgotoh::output::{AlignmentReport, RunSummary, TableFormat};
use log::warn;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("{failed} of {total} alignment reports failed validation")]
pub struct FailedReportsError {
    pub failed: usize,
    pub total: usize,
}

pub fn check_report(path: &Path, config: &ScoringConfig, tolerance: f64) -> anyhow::Result<RunSummary> {
    let file = File::open(path).context(format!(
        "failed to open report: {}",
        path.to_string_lossy()
    ))?;

    let report = AlignmentReport::parse(BufReader::new(file)).context(format!(
        "failed to parse report: {}",
        path.to_string_lossy()
    ))?;

    let verification = verify(&report.pair, report.score, config, tolerance)
        .context("report holds an invalid alignment")?;

    Ok(RunSummary::new(
        0,
        report.pair.len(),
        &verification,
        report.elapsed.map(|e| e.as_secs_f64()).unwrap_or(0.0),
    ))
}

pub fn validate(args: &ValidateArgs) -> anyhow::Result<()> {
    let config = args.scoring_args.config()?;

    let mut summaries = vec![];
    let mut failed = 0usize;

    for (idx, path) in args.report_paths.iter().enumerate() {
        match check_report(path, &config, args.relative_tolerance) {
            Ok(mut summary) => {
                summary.run = idx + 1;
                println!("{} {}", verdict(summary.passed), path.to_string_lossy());
                if !summary.passed {
                    failed += 1;
                }
                summaries.push(summary);
            }
            Err(err) => {
                warn!("{err:#}");
                println!("{} {}", verdict(false), path.to_string_lossy());
                failed += 1;
            }
        }
    }

    if !summaries.is_empty() {
        let mut table = TableFormat::run_summary()?;
        println!("{}", table.render(&summaries)?);
    }

    match failed {
        0 => Ok(()),
        _ => Err(FailedReportsError {
            failed,
            total: args.report_paths.len(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use libgotoh::align::structs::AlignedPair;

    fn write_report(name: &str, score: f32, a: &str, b: &str) -> anyhow::Result<std::path::PathBuf> {
        let path = std::env::temp_dir().join(format!("gotoh-{}-{name}.txt", std::process::id()));
        let mut out = File::create(&path)?;
        AlignmentReport::new(name, score, AlignedPair::from_strings(a, b)?).write(&mut out)?;
        Ok(path)
    }

    #[test]
    fn test_check_report() -> anyhow::Result<()> {
        let config = ScoringConfig::default();

        let good = write_report("good", -8.0, "ACGT", "A_GT")?;
        let summary = check_report(&good, &config, 1e-3)?;
        check!(summary.passed);
        check!(summary.columns == 4);

        let bad = write_report("bad", 4.0, "ACGT", "A_GT")?;
        let summary = check_report(&bad, &config, 1e-3)?;
        check!(!summary.passed);
        check!(summary.recomputed == -8.0);

        std::fs::remove_file(good)?;
        std::fs::remove_file(bad)?;
        Ok(())
    }

    #[test]
    fn test_missing_report() {
        let path = std::env::temp_dir().join("gotoh-no-such-report.txt");
        let_assert!(Err(_) = check_report(&path, &ScoringConfig::default(), 1e-3));
    }
}
