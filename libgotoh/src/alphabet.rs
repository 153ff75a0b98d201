use phf::phf_map;
use serde::{Deserialize, Serialize};

pub const UTF8_SPACE: u8 = 32;
pub const UTF8_UNDERSCORE: u8 = 95;
pub const UTF8_PIPE: u8 = 124;

/// The byte that marks a gap in an aligned sequence.
pub const GAP_BYTE: u8 = UTF8_UNDERSCORE;

/// The byte stored at index 0 of every sequence, so that residue `i` lives at index `i`.
pub const PAD_BYTE: u8 = 255;

pub const NUCLEOTIDE_CORE: [u8; 4] = *b"ACGT";

pub const AMINO_CORE: [u8; 20] = *b"ACDEFGHIKLMNPQRSTVWY";

/// maps from \<upper case UTF8 nucleotide\> -> \<digital code\>
pub static UTF8_TO_DIGITAL_NUCLEOTIDE: phf::Map<u8, u8> = phf_map! {
    65u8 => 0,    // A
    67u8 => 1,    // C
    71u8 => 2,    // G
    84u8 => 3,    // T
    85u8 => 4,    // U
    78u8 => 5,    // N
    // ambiguity codes
    82u8 => 6,    // R
    89u8 => 7,    // Y
    83u8 => 8,    // S
    87u8 => 9,    // W
    75u8 => 10,   // K
    77u8 => 11,   // M
    66u8 => 12,   // B
    68u8 => 13,   // D
    72u8 => 14,   // H
    86u8 => 15,   // V
};

pub static NUCLEOTIDE_INVERSE_MAP: phf::Map<u8, u8> = phf_map! {
    0u8  => 65,   // A
    1u8  => 67,   // C
    2u8  => 71,   // G
    3u8  => 84,   // T
    4u8  => 85,   // U
    5u8  => 78,   // N
    6u8  => 82,   // R
    7u8  => 89,   // Y
    8u8  => 83,   // S
    9u8  => 87,   // W
    10u8 => 75,   // K
    11u8 => 77,   // M
    12u8 => 66,   // B
    13u8 => 68,   // D
    14u8 => 72,   // H
    15u8 => 86,   // V
};

/// maps from \<upper case UTF8 amino acid\> -> \<digital code\>
pub static UTF8_TO_DIGITAL_AMINO: phf::Map<u8, u8> = phf_map! {
    65u8 => 0,    // A
    67u8 => 1,    // C
    68u8 => 2,    // D
    69u8 => 3,    // E
    70u8 => 4,    // F
    71u8 => 5,    // G
    72u8 => 6,    // H
    73u8 => 7,    // I
    75u8 => 8,    // K
    76u8 => 9,    // L
    77u8 => 10,   // M
    78u8 => 11,   // N
    80u8 => 12,   // P
    81u8 => 13,   // Q
    82u8 => 14,   // R
    83u8 => 15,   // S
    84u8 => 16,   // T
    86u8 => 17,   // V
    87u8 => 18,   // W
    89u8 => 19,   // Y
    // degenerate characters
    79u8 => 20,   // O
    85u8 => 21,   // U
    88u8 => 22,   // X
    66u8 => 23,   // B
    90u8 => 24,   // Z
    74u8 => 25,   // J
};

pub static AMINO_INVERSE_MAP: phf::Map<u8, u8> = phf_map! {
    0u8  => 65,   // A
    1u8  => 67,   // C
    2u8  => 68,   // D
    3u8  => 69,   // E
    4u8  => 70,   // F
    5u8  => 71,   // G
    6u8  => 72,   // H
    7u8  => 73,   // I
    8u8  => 75,   // K
    9u8  => 76,   // L
    10u8 => 77,   // M
    11u8 => 78,   // N
    12u8 => 80,   // P
    13u8 => 81,   // Q
    14u8 => 82,   // R
    15u8 => 83,   // S
    16u8 => 84,   // T
    17u8 => 86,   // V
    18u8 => 87,   // W
    19u8 => 89,   // Y
    20u8 => 79,   // O
    21u8 => 85,   // U
    22u8 => 88,   // X
    23u8 => 66,   // B
    24u8 => 90,   // Z
    25u8 => 74,   // J
};

/// The residue alphabet a sequence is read in.
///
/// The aligner itself only ever compares digital codes for equality,
/// so the choice of alphabet affects validation and random generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    #[default]
    Nucleotide,
    Amino,
}

impl Alphabet {
    /// Map a UTF8 byte (either case) to its digital code.
    pub fn digital(&self, utf8_byte: u8) -> Option<u8> {
        let upper = utf8_byte.to_ascii_uppercase();
        match self {
            Alphabet::Nucleotide => UTF8_TO_DIGITAL_NUCLEOTIDE.get(&upper).copied(),
            Alphabet::Amino => UTF8_TO_DIGITAL_AMINO.get(&upper).copied(),
        }
    }

    /// Map a digital code back to its upper case UTF8 byte.
    pub fn utf8(&self, digital_byte: u8) -> Option<u8> {
        match self {
            Alphabet::Nucleotide => NUCLEOTIDE_INVERSE_MAP.get(&digital_byte).copied(),
            Alphabet::Amino => AMINO_INVERSE_MAP.get(&digital_byte).copied(),
        }
    }

    pub fn core_symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Nucleotide => &NUCLEOTIDE_CORE,
            Alphabet::Amino => &AMINO_CORE,
        }
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alphabet::Nucleotide => write!(f, "nucleotide"),
            Alphabet::Amino => write!(f, "amino"),
        }
    }
}
