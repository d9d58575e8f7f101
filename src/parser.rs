//! Line parser for labeled x/y/z device output
//!
//! The device prints one sample per line in the form
//!
//! ```text
//! X: 0.123 Y: -1.045 Z: 9.812
//! ```
//!
//! Colons are dropped, the line is split on whitespace and the tokens at
//! positions 1, 3 and 5 are taken as x, y and z. Labels are never checked, and
//! tokens past position 5 are ignored.

use crate::error::LineError;
use crate::types::Reading;

/// Token positions of the x, y and z values after colon removal
pub const VALUE_POSITIONS: [usize; 3] = [1, 3, 5];

/// Minimum number of tokens a line needs to yield a reading
pub const MIN_TOKENS: usize = VALUE_POSITIONS[2] + 1;

/// What a raw line turned into
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank or whitespace-only line, ignored without a message
    Empty,
    /// A complete reading
    Reading(Reading),
    /// A rejected line, together with its (lossily decoded, trimmed) text
    Invalid { line: String, error: LineError },
}

/// Decode raw bytes as UTF-8 and trim surrounding whitespace (including `\r\n`)
pub fn decode_line(bytes: &[u8]) -> Result<String, LineError> {
    std::str::from_utf8(bytes)
        .map(|s| s.trim().to_string())
        .map_err(|e| LineError::Decode {
            valid_up_to: e.valid_up_to(),
        })
}

/// Parse an already decoded and trimmed line into a reading
pub fn parse_line(line: &str) -> Result<Reading, LineError> {
    let cleaned = line.replace(':', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    if tokens.len() < MIN_TOKENS {
        return Err(LineError::TokenCount {
            found: tokens.len(),
        });
    }

    let mut values = [0.0f64; 3];
    for (slot, &position) in values.iter_mut().zip(VALUE_POSITIONS.iter()) {
        let token = tokens[position];
        *slot = token.parse().map_err(|source| LineError::NumericParse {
            position,
            token: token.to_string(),
            source,
        })?;
    }

    Ok(Reading::new(values[0], values[1], values[2]))
}

/// Run a raw line through decode, trim and parse
pub fn classify(bytes: &[u8]) -> LineOutcome {
    let line = match decode_line(bytes) {
        Ok(line) => line,
        Err(error) => {
            return LineOutcome::Invalid {
                line: String::from_utf8_lossy(bytes).trim().to_string(),
                error,
            }
        }
    };

    if line.is_empty() {
        return LineOutcome::Empty;
    }

    match parse_line(&line) {
        Ok(reading) => LineOutcome::Reading(reading),
        Err(error) => LineOutcome::Invalid { line, error },
    }
}
