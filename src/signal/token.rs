use std::fmt;

use log::debug;

/// Marker used by acquisition software for a missing sample.
pub const MISSING_MARKER: &str = "NaN";

/// Sentinel written by acquisition software for a corrupted sample.
pub const BAD_DATA_SENTINEL: &str = "bad data";

/// A single cell of a raw recording, validated once at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Finite numeric sample
    Valid(f64),
    /// Missing-value marker (`NaN`)
    Missing,
    /// Non-numeric text, including the bad-data sentinel
    Invalid(String),
    /// Empty cell or a cell with embedded whitespace
    Blank,
}

impl Token {
    /// Classify one raw text cell.
    ///
    /// Surrounding whitespace is ignored; whitespace inside a value makes the
    /// cell blank, except for the bad-data sentinel itself.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.len() != raw.len() && !text.is_empty() {
            debug!("Trimmed padded cell {:?}", raw);
        }

        if text.is_empty() {
            return Token::Blank;
        }
        if text.eq_ignore_ascii_case(BAD_DATA_SENTINEL) {
            return Token::Invalid(text.to_string());
        }
        if text.eq_ignore_ascii_case(MISSING_MARKER) {
            return Token::Missing;
        }
        if text.chars().any(char::is_whitespace) {
            return Token::Blank;
        }

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Token::Valid(value),
            _ => Token::Invalid(text.to_string()),
        }
    }

    /// Classify one raw cell; bytes that are not UTF-8 are invalid text.
    pub fn from_bytes(raw: &[u8]) -> Self {
        match std::str::from_utf8(raw) {
            Ok(text) => Token::parse(text),
            Err(_) => Token::Invalid(String::from_utf8_lossy(raw).into_owned()),
        }
    }

    /// Numeric value of a valid token.
    pub fn value(&self) -> Option<f64> {
        match self {
            Token::Valid(v) => Some(*v),
            _ => None,
        }
    }

    /// True for the missing-value marker
    pub fn is_missing(&self) -> bool {
        matches!(self, Token::Missing)
    }

    /// True for non-numeric text
    pub fn is_invalid(&self) -> bool {
        matches!(self, Token::Invalid(_))
    }

    /// True for blank cells
    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Blank)
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Token::Missing
        } else if value.is_finite() {
            Token::Valid(value)
        } else {
            Token::Invalid(value.to_string())
        }
    }
}

impl From<&str> for Token {
    fn from(raw: &str) -> Self {
        Token::parse(raw)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Valid(v) => write!(f, "{}", v),
            Token::Missing => f.write_str(MISSING_MARKER),
            Token::Invalid(text) => f.write_str(text),
            Token::Blank => Ok(()),
        }
    }
}
