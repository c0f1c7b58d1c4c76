//! Strand orientation for annotated features.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
    /// "." or any other symbol in the strand column
    #[serde(rename = ".")]
    Unstranded,
}

impl Strand {
    /// Parse GFF column 7
    pub fn from_gff(s: &str) -> Self {
        match s.trim() {
            "+" => Self::Forward,
            "-" => Self::Reverse,
            _ => Self::Unstranded,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
            Self::Unstranded => '.',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
