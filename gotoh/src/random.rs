use std::io::Write;
use std::time::Instant;

use crate::args::RandomArgs;
use crate::util::PathBufExt;

use anyhow::Context;
use libgotoh::align::{global_alignment, ScoringConfig};
use libgotoh::alphabet::Alphabet;
use libgotoh::output::{AlignmentReport, RunSummary, TableFormat};
use libgotoh::structs::Sequence;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("{failed} of {total} random alignments failed score verification")]
pub struct FailedRunsError {
    pub failed: usize,
    pub total: usize,
}

/// The generator for one run; runs with the same base seed draw the same pair.
pub fn run_rng(seed: u64, run: usize) -> Pcg64 {
    Pcg64::seed_from_u64(seed.wrapping_add(run as u64))
}

fn run_pair(
    run: usize,
    seed: u64,
    alphabet: Alphabet,
    config: &ScoringConfig,
    args: &RandomArgs,
) -> anyhow::Result<RunSummary> {
    let mut rng = run_rng(seed, run);
    let seq_a = Sequence::random(args.length, alphabet, &mut rng).with_name("A");
    let seq_b = Sequence::random(args.length, alphabet, &mut rng).with_name("B");

    let now = Instant::now();
    let alignment = global_alignment(&seq_a, &seq_b, config, Some(args.relative_tolerance))
        .context(format!("failed to align random pair {run}"))?;
    let elapsed = now.elapsed();

    let verification = alignment
        .verification
        .context(format!("run {run} was not verified"))?;
    debug!("run {run}: score {} in {:?}", alignment.score, elapsed);

    let summary = RunSummary::new(
        run,
        alignment.pair.len(),
        &verification,
        elapsed.as_secs_f64(),
    );

    let path = args.out_dir.join(format!("aligned_result_{run}.txt"));
    let mut out = path.open(args.common_args.allow_overwrite)?;
    AlignmentReport::new(format!("Run {run}"), alignment.score, alignment.pair)
        .with_elapsed(elapsed)
        .write(&mut out)?;
    out.flush()?;

    Ok(summary)
}

pub fn random(args: &RandomArgs) -> anyhow::Result<()> {
    let config = args.scoring_args.config()?;
    let alphabet: Alphabet = args.alphabet.into();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("running {} random alignments with seed {seed}", args.runs);

    std::fs::create_dir_all(&args.out_dir).context(format!(
        "failed to create output directory: {}",
        args.out_dir.to_string_lossy()
    ))?;

    let summaries = (1..=args.runs)
        .into_par_iter()
        .map(|run| run_pair(run, seed, alphabet, &config, args))
        .collect::<anyhow::Result<Vec<RunSummary>>>()?;

    let mut table = TableFormat::run_summary()?;
    println!("{}", table.render(&summaries)?);

    if let Some(path) = &args.json_path {
        let mut out = path.open(args.common_args.allow_overwrite)?;
        serde_json::to_writer_pretty(&mut out, &summaries)
            .context("failed to write run summaries")?;
        out.flush()?;
    }

    let failed = summaries.iter().filter(|s| !s.passed).count();
    match failed {
        0 => Ok(()),
        _ => Err(FailedRunsError {
            failed,
            total: summaries.len(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Cli, SubCommands};
    use assert2::{check, let_assert};
    use clap::Parser;

    #[test]
    fn test_run_rng_is_reproducible() {
        let a = Sequence::random(50, Alphabet::Nucleotide, &mut run_rng(42, 3));
        let b = Sequence::random(50, Alphabet::Nucleotide, &mut run_rng(42, 3));
        let c = Sequence::random(50, Alphabet::Nucleotide, &mut run_rng(42, 4));
        check!(a == b);
        check!(a != c);
    }

    #[test]
    fn test_run_pair_is_verified_by_the_pipeline() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("gotoh-random-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        let out_dir = dir.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "gotoh",
            "random",
            "--length",
            "30",
            "--out-dir",
            out_dir.as_str(),
            "-q",
        ])?;
        let_assert!(SubCommands::Random(args) = cli.command);

        let config = args.scoring_args.config()?;
        let summary = run_pair(1, 5, Alphabet::Nucleotide, &config, &args)?;

        check!(summary.run == 1);
        check!(summary.passed);
        check!(summary.score == summary.recomputed);
        check!(summary.columns >= 30);
        check!(dir.join("aligned_result_1.txt").exists());

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
