use seq_io::fasta::{Reader, Record};
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

use crate::alphabet::{Alphabet, PAD_BYTE, UTF8_SPACE};
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown UTF8 sequence byte for the {alphabet} alphabet: {byte}")]
pub struct UnknownUtf8SequenceByteError {
    byte: u8,
    alphabet: Alphabet,
}

/// This holds the both the "digital" data and string data of a biological sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The name of the sequence
    pub name: String,
    /// The sequence details. If the sequence comes from a fasta, this
    /// is the information following the sequence name in the header
    pub details: Option<String>,
    /// The length of the sequence
    pub length: usize,
    /// The alphabet the sequence was read in
    pub alphabet: Alphabet,
    /// The "digital" data of the sequence. These are the string
    /// bytes, but mapped to the digital codes of the alphabet
    pub digital_bytes: Vec<u8>,
    /// The string data of the sequence. These are the UTF8 bytes
    /// that make up the sequence in the "normal" alphabet
    pub utf8_bytes: Vec<u8>,
}

impl Sequence {
    pub fn from_fasta<P: AsRef<Path>>(path: P, alphabet: Alphabet) -> Result<Vec<Self>> {
        let mut seqs: Vec<Self> = vec![];

        let mut reader = Reader::from_path(&path).with_context(|| {
            format!(
                "failed to open fasta file: {}",
                path.as_ref().to_string_lossy()
            )
        })?;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "failed to read fasta record")?;
            let mut header_bytes = record.head().to_vec();
            let first_space_idx = header_bytes.iter().position(|&b| b == UTF8_SPACE);

            let error_context: fn() -> &'static str =
                || "failed to create String from fasta header bytes";

            let (name, details) = match first_space_idx {
                Some(idx) => {
                    let details_bytes = header_bytes.split_off(idx + 1);
                    header_bytes.pop();
                    (
                        String::from_utf8(header_bytes).with_context(error_context)?,
                        Some(String::from_utf8(details_bytes).with_context(error_context)?),
                    )
                }
                None => (
                    String::from_utf8(header_bytes).with_context(error_context)?,
                    None,
                ),
            };

            let residues: Vec<u8> = record.seq_lines().flatten().copied().collect();
            let mut seq = Sequence::from_utf8(&residues, alphabet)
                .with_context(|| format!("bad residue in fasta record: {name}"))?;
            seq.name = name;
            seq.details = details;

            seqs.push(seq);
        }
        Ok(seqs)
    }

    pub fn from_utf8(bytes: &[u8], alphabet: Alphabet) -> Result<Self, UnknownUtf8SequenceByteError> {
        // We want position 1 of the sequence to be at index 1, so we'll buffer with a pad byte
        let mut utf8_bytes: Vec<u8> = vec![PAD_BYTE; bytes.len() + 1];
        utf8_bytes[1..].copy_from_slice(bytes);
        let mut digital_bytes: Vec<u8> = vec![PAD_BYTE; utf8_bytes.len()];

        for (idx, utf8_byte) in bytes.iter().enumerate() {
            digital_bytes[idx + 1] = match alphabet.digital(*utf8_byte) {
                Some(b) => b,
                None => {
                    return Err(UnknownUtf8SequenceByteError {
                        byte: *utf8_byte,
                        alphabet,
                    })
                }
            };
        }

        Ok(Sequence {
            name: "".to_string(),
            details: None,
            length: bytes.len(),
            alphabet,
            digital_bytes,
            utf8_bytes,
        })
    }

    /// Draw a sequence uniformly over the unambiguous residues of the alphabet.
    pub fn random(length: usize, alphabet: Alphabet, rng: &mut impl Rng) -> Self {
        let symbols = alphabet.core_symbols();

        let mut utf8_bytes: Vec<u8> = Vec::with_capacity(length + 1);
        let mut digital_bytes: Vec<u8> = Vec::with_capacity(length + 1);
        utf8_bytes.push(PAD_BYTE);
        digital_bytes.push(PAD_BYTE);

        for _ in 0..length {
            // the core symbols are never empty
            let utf8_byte = *symbols.choose(rng).unwrap_or(&symbols[0]);
            utf8_bytes.push(utf8_byte);
            digital_bytes.push(alphabet.digital(utf8_byte).unwrap_or(PAD_BYTE));
        }

        Sequence {
            name: "".to_string(),
            details: None,
            length,
            alphabet,
            digital_bytes,
            utf8_bytes,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The UTF8 residues, without the padding byte.
    pub fn residues(&self) -> &[u8] {
        &self.utf8_bytes[1..]
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}", self.name)?;

        if let Some(ref details) = self.details {
            write!(f, " {details}")?
        };

        writeln!(f)?;

        let mut iter = self.residues().chunks(80).peekable();

        while let Some(byte_chunk) = iter.next() {
            match std::str::from_utf8(byte_chunk) {
                Ok(seq_line) => {
                    write!(f, "{}", seq_line)?;
                    if iter.peek().is_some() {
                        // if we're not on the last
                        // line, add a linebreak
                        writeln!(f)?;
                    }
                }
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.residues()))
    }
}
