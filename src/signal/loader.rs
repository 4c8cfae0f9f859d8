use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{Recording, SignalError, Token};

/// Time and voltage channels as loaded, before quality screening.
///
/// Both channels always have the same length: a row with a missing column
/// contributes a [`Token::Blank`] for that channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecording {
    /// Time channel tokens
    pub time: Vec<Token>,
    /// Voltage channel tokens
    pub voltage: Vec<Token>,
}

impl RawRecording {
    /// Build a raw recording from already classified channels
    pub fn new(time: Vec<Token>, voltage: Vec<Token>) -> Result<Self, SignalError> {
        if time.len() != voltage.len() {
            return Err(SignalError::LengthMismatch {
                time: time.len(),
                voltage: voltage.len(),
            });
        }
        Ok(Self { time, voltage })
    }

    /// Build a raw recording from (time, voltage) text pairs
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (time, voltage) = rows
            .into_iter()
            .map(|(t, v)| (Token::parse(t), Token::parse(v)))
            .unzip();
        Self { time, voltage }
    }

    /// Build a raw recording from numeric channels (NaN becomes a missing token)
    pub fn from_samples(time: &[f64], voltage: &[f64]) -> Result<Self, SignalError> {
        Self::new(
            time.iter().copied().map(Token::from).collect(),
            voltage.iter().copied().map(Token::from).collect(),
        )
    }

    /// Parse a headerless two-column CSV file
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, SignalError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Parse headerless two-column CSV from a reader.
    ///
    /// Cells are classified from raw bytes, so a cell that is not UTF-8 becomes
    /// [`Token::Invalid`] instead of failing the whole load.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, SignalError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut time = Vec::new();
        let mut voltage = Vec::new();

        for record in csv_reader.byte_records() {
            let record = record?;
            time.push(record.get(0).map_or(Token::Blank, Token::from_bytes));
            voltage.push(record.get(1).map_or(Token::Blank, Token::from_bytes));
        }

        Ok(Self { time, voltage })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if the recording has no rows
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterate over aligned (time, voltage) token pairs
    pub fn rows(&self) -> impl Iterator<Item = (&Token, &Token)> {
        self.time.iter().zip(self.voltage.iter())
    }

    /// Keep only the rows for which `keep` returns true, in both channels
    pub fn retain_rows<F>(self, mut keep: F) -> Self
    where
        F: FnMut(&Token, &Token) -> bool,
    {
        let (time, voltage) = self
            .time
            .into_iter()
            .zip(self.voltage)
            .filter(|(t, v)| keep(t, v))
            .unzip();
        Self { time, voltage }
    }

    /// Convert to a numeric recording; every token must be valid
    pub fn into_recording(self) -> Result<Recording, SignalError> {
        let time = numeric_channel("time", &self.time)?;
        let voltage = numeric_channel("voltage", &self.voltage)?;
        Recording::new(time, voltage)
    }
}

fn numeric_channel(axis: &'static str, tokens: &[Token]) -> Result<Vec<f64>, SignalError> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| token.value().ok_or(SignalError::NonNumeric { axis, index }))
        .collect()
}
