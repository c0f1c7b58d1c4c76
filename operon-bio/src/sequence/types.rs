use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

impl Sequence {
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: None,
            sequence,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn header(&self) -> String {
        match &self.description {
            Some(desc) if !desc.is_empty() => format!(">{} {}", self.id, desc),
            _ => format!(">{}", self.id),
        }
    }

    /// Slice with a 0-based half-open range, clamped to the sequence length.
    ///
    /// Returns the symbols and whether the requested end ran past the record.
    pub fn slice(&self, start: usize, end: usize) -> (&[u8], bool) {
        let len = self.sequence.len();
        let lo = start.min(len);
        let hi = end.min(len).max(lo);
        (&self.sequence[lo..hi], end > len)
    }
}

/// Complement one nucleotide symbol, preserving case.
///
/// IUPAC ambiguity codes map to their complementary code; anything
/// unrecognised is returned unchanged.
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'a' => b't',
        b't' | b'u' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        // S, W, N and gaps are self-complementary
        other => other,
    }
}

pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&b| complement(b)).collect()
}
