use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::{ColoredString, Colorize};
use libgotoh::alphabet::Alphabet;
use libgotoh::structs::Sequence;
use log::LevelFilter;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("no sequences in fasta file: {path}")]
pub struct EmptyFastaError {
    path: String,
}

pub trait PathBufExt {
    fn open(&self, allow_overwrite: bool) -> anyhow::Result<BufWriter<File>>;
}

impl PathBufExt for PathBuf {
    fn open(&self, allow_overwrite: bool) -> anyhow::Result<BufWriter<File>> {
        let mut file_options = File::options();

        if allow_overwrite {
            file_options.write(true).truncate(true).create(true);
        } else {
            file_options.write(true).create_new(true);
        };

        let file = file_options
            .open(self)
            .context(format!("failed to create file: {}", self.to_string_lossy()))?;

        Ok(BufWriter::new(file))
    }
}

/// Read the first record of a fasta file.
pub fn first_sequence(path: &Path, alphabet: Alphabet) -> anyhow::Result<Sequence> {
    Sequence::from_fasta(path, alphabet)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            EmptyFastaError {
                path: path.to_string_lossy().to_string(),
            }
            .into()
        })
}

pub fn verdict(passed: bool) -> ColoredString {
    match passed {
        true => "PASS".green().bold(),
        false => "FAIL".red().bold(),
    }
}

pub fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Start logging at the level set by `-v` flags; `RUST_LOG` takes precedence.
pub fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbosity))
        .parse_default_env()
        .init();
}

pub fn set_threads(num_threads: usize) -> anyhow::Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("failed to build rayon global threadpool")
}
