//! Plain-text input and output for alphabet-offset texts.
//!
//! Input is whitespace-separated integers: the text length `n`, the alphabet
//! size `m`, then `n` offsets in `0..m`. Output is the refrain value, the
//! refrain length, and the refrain's offsets on one line.

use crate::refrain::Refrain;
use std::fmt::Write;

/// Largest supported alphabet (lowercase Latin letters).
pub const ALPHABET_SIZE: usize = 26;

/// Errors raised while decoding an input text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("missing header: expected text length and alphabet size")]
    MissingHeader,
    #[error("invalid number: {token:?}")]
    InvalidNumber { token: String },
    #[error("alphabet of {declared} symbols exceeds the maximum of {max}")]
    AlphabetTooLarge { declared: usize, max: usize },
    #[error("offset {offset} is outside the alphabet of {alphabet} symbols")]
    OffsetOutOfRange { offset: usize, alphabet: usize },
    #[error("truncated input: expected {expected} offsets, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

fn parse(token: &str) -> Result<usize, CodecError> {
    token.parse().map_err(|_| CodecError::InvalidNumber {
        token: token.to_owned(),
    })
}

/// Decodes a text of alphabet offsets.
pub fn decode(input: &str) -> Result<Vec<u8>, CodecError> {
    let mut tokens = input.split_ascii_whitespace();

    let (Some(length), Some(alphabet)) = (tokens.next(), tokens.next()) else {
        return Err(CodecError::MissingHeader);
    };
    let length = parse(length)?;
    let alphabet = parse(alphabet)?;

    if alphabet > ALPHABET_SIZE {
        return Err(CodecError::AlphabetTooLarge {
            declared: alphabet,
            max: ALPHABET_SIZE,
        });
    }

    let mut text = Vec::with_capacity(length.min(1 << 20));
    for token in tokens.take(length) {
        let offset = parse(token)?;
        if offset >= alphabet {
            return Err(CodecError::OffsetOutOfRange { offset, alphabet });
        }
        // alphabet <= 26, so the offset fits
        text.push(offset as u8);
    }

    if text.len() < length {
        return Err(CodecError::Truncated {
            expected: length,
            actual: text.len(),
        });
    }

    tracing::debug!(length, alphabet, "decoded text");
    Ok(text)
}

/// Encodes a refrain as value, length and space-separated offsets.
pub fn encode(refrain: &Refrain<u8>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", refrain.value);
    let _ = writeln!(out, "{}", refrain.len());

    let offsets: Vec<String> = refrain.symbols.iter().map(u8::to_string).collect();
    out.push_str(&offsets.join(" "));
    out.push('\n');
    out
}
