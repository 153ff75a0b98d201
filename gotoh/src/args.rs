use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use libgotoh::align::ScoringConfig;
use libgotoh::alphabet::Alphabet;

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    #[command(about = "Globally align the first sequences of two fasta files")]
    Align(AlignArgs),
    #[command(about = "Align pairs of random sequences and verify every score")]
    Random(RandomArgs),
    #[command(about = "Recompute and check the scores recorded in alignment reports")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(name = "gotoh")]
#[command(about = "Affine gap global sequence alignment with independent score verification")]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum AlphabetArg {
    #[default]
    Nucleotide,
    Amino,
}

impl From<AlphabetArg> for Alphabet {
    fn from(value: AlphabetArg) -> Self {
        match value {
            AlphabetArg::Nucleotide => Alphabet::Nucleotide,
            AlphabetArg::Amino => Alphabet::Amino,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ThreadArgs {
    /// The number of threads that gotoh will use
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = 8usize,
        value_name = "n"
    )]
    pub num_threads: usize,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Allow gotoh to overwrite files
    #[arg(short = 'q', long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// A JSON scoring configuration; every field must be present
    #[arg(long = "scoring", value_name = "FILE.json")]
    pub scoring_path: Option<PathBuf>,

    /// The score of two identical residues
    #[arg(long = "match", value_name = "F", allow_negative_numbers = true)]
    pub match_score: Option<f32>,

    /// The score of two different residues
    #[arg(long = "mismatch", value_name = "F", allow_negative_numbers = true)]
    pub mismatch_score: Option<f32>,

    /// The score added once when a gap run starts (0 gives a linear gap model)
    #[arg(long = "gap-open", value_name = "F", allow_negative_numbers = true)]
    pub gap_open: Option<f32>,

    /// The score of every gap character
    #[arg(long = "gap-extend", value_name = "F", allow_negative_numbers = true)]
    pub gap_extend: Option<f32>,
}

impl ScoringArgs {
    /// Resolve the scoring configuration: defaults, then the JSON file, then individual flags.
    pub fn config(&self) -> anyhow::Result<ScoringConfig> {
        let mut config = match &self.scoring_path {
            Some(path) => ScoringConfig::from_json(path).context(format!(
                "failed to load scoring configuration: {}",
                path.to_string_lossy()
            ))?,
            None => ScoringConfig::default(),
        };

        if let Some(value) = self.match_score {
            config.match_score = value;
        }
        if let Some(value) = self.mismatch_score {
            config.mismatch_score = value;
        }
        if let Some(value) = self.gap_open {
            config.gap_open = value;
        }
        if let Some(value) = self.gap_extend {
            config.gap_extend = value;
        }

        config
            .validate()
            .context("invalid scoring configuration")?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    /// The first sequence; only its first record is aligned
    #[arg(value_name = "A.fasta")]
    pub seq_a_path: PathBuf,

    /// The second sequence; only its first record is aligned
    #[arg(value_name = "B.fasta")]
    pub seq_b_path: PathBuf,

    /// The alphabet of both sequences
    #[arg(long = "alphabet", value_enum, default_value_t = AlphabetArg::Nucleotide)]
    pub alphabet: AlphabetArg,

    /// Where to write the alignment report (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "path")]
    pub output_path: Option<PathBuf>,

    /// The title written at the top of the report
    #[arg(long = "title", default_value = "Alignment")]
    pub title: String,

    /// Where to write the filled score and back-pointer matrices
    #[arg(long = "dump-matrices", value_name = "path")]
    pub dump_matrices_path: Option<PathBuf>,

    /// The relative tolerance between the claimed and recomputed scores
    #[arg(long = "rel-tol", default_value_t = 1e-3, value_name = "F")]
    pub relative_tolerance: f64,

    /// Arguments that set the scoring scheme
    #[command(flatten)]
    pub scoring_args: ScoringArgs,

    /// Arguments that are common across all gotoh subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RandomArgs {
    /// The number of random sequence pairs to align
    #[arg(long = "runs", default_value_t = 10usize, value_name = "N")]
    pub runs: usize,

    /// The length of every random sequence
    #[arg(long = "length", default_value_t = 1000usize, value_name = "L")]
    pub length: usize,

    /// The base seed; run n is generated from seed + n (default: random)
    #[arg(long = "seed", value_name = "S")]
    pub seed: Option<u64>,

    /// The alphabet random residues are drawn from
    #[arg(long = "alphabet", value_enum, default_value_t = AlphabetArg::Nucleotide)]
    pub alphabet: AlphabetArg,

    /// Where to place the per-run alignment reports
    #[arg(long = "out-dir", default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Also write the run summaries as JSON
    #[arg(long = "json", value_name = "path")]
    pub json_path: Option<PathBuf>,

    /// The relative tolerance between the claimed and recomputed scores
    #[arg(long = "rel-tol", default_value_t = 1e-3, value_name = "F")]
    pub relative_tolerance: f64,

    /// Arguments that set the scoring scheme
    #[command(flatten)]
    pub scoring_args: ScoringArgs,

    /// Arguments that size the rayon thread pool
    #[command(flatten)]
    pub thread_args: ThreadArgs,

    /// Arguments that are common across all gotoh subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Alignment reports written by gotoh align or gotoh random
    #[arg(value_name = "REPORT", required = true, num_args = 1..)]
    pub report_paths: Vec<PathBuf>,

    /// The relative tolerance between the claimed and recomputed scores
    #[arg(long = "rel-tol", default_value_t = 1e-3, value_name = "F")]
    pub relative_tolerance: f64,

    /// Arguments that set the scoring scheme
    #[command(flatten)]
    pub scoring_args: ScoringArgs,
}
