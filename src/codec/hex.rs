use thiserror::Error;

/// Why a hex text could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Nothing but separators (or nothing at all).
    #[error("no hex data")]
    Empty,
    #[error(transparent)]
    InvalidFormat(#[from] FormatError),
}

/// Malformed hex content, after separators are removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// `digits` counts the characters left once whitespace is stripped.
    #[error("hex string length must be even, got {digits} digits")]
    OddLength { digits: usize },
    /// `index` counts characters of the input text, separators included.
    #[error("invalid hex character {ch:?} at position {index}")]
    InvalidDigit { ch: char, index: usize },
}

impl DecodeError {
    pub fn is_empty(&self) -> bool {
        matches!(self, DecodeError::Empty)
    }
}

/// Decode hex text such as `"34 1E 08 AC 0D"` into bytes.
///
/// Whitespace anywhere in the text is ignored. The remaining digit count must be
/// even, and every remaining character must be a hex digit; length is checked first.
/// Pairs are read high nibble first.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut stripped = String::with_capacity(text.len());
    // Index in `text` of every char kept in `stripped`
    let mut origin = Vec::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        if !ch.is_whitespace() {
            stripped.push(ch);
            origin.push(index);
        }
    }

    if origin.is_empty() {
        return Err(DecodeError::Empty);
    }
    if origin.len() % 2 != 0 {
        return Err(FormatError::OddLength {
            digits: origin.len(),
        }
        .into());
    }
    if !stripped.is_ascii() {
        // hex works on bytes; report the first offending char ourselves
        if let Some((ch, &index)) = stripped
            .chars()
            .zip(&origin)
            .find(|(ch, _)| !ch.is_ascii_hexdigit())
        {
            return Err(FormatError::InvalidDigit { ch, index }.into());
        }
    }

    hex::decode(&stripped).map_err(|e| {
        let error = match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => FormatError::InvalidDigit {
                ch: c,
                index: origin.get(index).copied().unwrap_or(index),
            },
            _ => FormatError::OddLength {
                digits: origin.len(),
            },
        };
        DecodeError::InvalidFormat(error)
    })
}
