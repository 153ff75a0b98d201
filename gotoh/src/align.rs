use std::io::Write;
use std::time::Instant;

use crate::args::AlignArgs;
use crate::util::{first_sequence, verdict, PathBufExt};

use anyhow::Context;
use libgotoh::align::structs::DpMatrix;
use libgotoh::align::{self, traceback, verify};
use libgotoh::alphabet::Alphabet;
use libgotoh::output::AlignmentReport;
use log::info;

pub fn align(args: &AlignArgs) -> anyhow::Result<()> {
    let config = args.scoring_args.config()?;
    let alphabet: Alphabet = args.alphabet.into();

    let seq_a = first_sequence(&args.seq_a_path, alphabet)?;
    let seq_b = first_sequence(&args.seq_b_path, alphabet)?;
    info!(
        "aligning {} ({} residues) against {} ({} residues)",
        seq_a.name, seq_a.length, seq_b.name, seq_b.length
    );

    let now = Instant::now();
    let result =
        align::align(&seq_a, &seq_b, &config).context("failed to fill alignment matrices")?;

    if let Some(path) = &args.dump_matrices_path {
        let mut out = path.open(args.common_args.allow_overwrite)?;
        result.matrix.dump(&mut out)?;
        writeln!(out)?;
        result.trace.dump(&mut out)?;
        out.flush()?;
    }

    let pair =
        traceback(&result.trace, &seq_a, &seq_b).context("failed to trace back alignment")?;
    let elapsed = now.elapsed();
    info!("aligned in {:.3} seconds", elapsed.as_secs_f64());

    let verification = verify(&pair, result.score, &config, args.relative_tolerance)
        .context("traceback produced an invalid alignment")?;

    let label = |name: &str, fallback: &str| match name.is_empty() {
        true => fallback.to_string(),
        false => name.to_string(),
    };

    let report = AlignmentReport::new(&args.title, result.score, pair)
        .with_elapsed(elapsed)
        .with_labels(label(&seq_a.name, "A"), label(&seq_b.name, "B"));

    match &args.output_path {
        Some(path) => {
            let mut out = path.open(args.common_args.allow_overwrite)?;
            report.write(&mut out)?;
            out.flush()?;
        }
        None => report.write(&mut std::io::stdout().lock())?,
    }

    println!(
        "{} score: {} recomputed: {} relative error: {:.3e}",
        verdict(verification.passed()),
        verification.claimed,
        verification.recomputed,
        verification.relative_error
    );

    verification
        .into_result()
        .context("alignment failed score verification")?;
    Ok(())
}
