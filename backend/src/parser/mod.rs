//! CSV loader: upload bytes to a validated square [`Grid`].
//!
//! Steps, in order:
//!
//! 1. decode the bytes (UTF-8, falling back to charset detection)
//! 2. check quoting the way a strict RFC 4180 reader does
//! 3. read records with the `csv` crate, tolerating ragged rows
//! 4. hand the rows to [`Grid::try_from_rows`] for the empty/square checks
//!    and whitespace trimming
//!
//! Ragged rows are never rejected by the CSV layer; they always reach the
//! square check and fail there as [`MatrixError::NotSquare`].

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use crate::error::{MatrixError, MatrixResult};
use crate::transform::Grid;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "iso-8859-15" | "latin-9" | "latin9" => "iso-8859-15".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode upload bytes to text.
///
/// Valid UTF-8 is borrowed as is (minus a leading BOM). Anything else goes
/// through charset detection. ISO-8859-1 is decoded as Windows-1252, which
/// agrees with it on every printable byte; undetected charsets get the
/// same treatment.
pub fn decode_content(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    match detect_encoding(bytes).as_str() {
        "iso-8859-15" => encoding_rs::ISO_8859_15.decode(bytes).0,
        _ => encoding_rs::WINDOWS_1252.decode(bytes).0,
    }
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Reject quoting a strict CSV reader would refuse.
///
/// The `csv` crate recovers silently from stray quotes; this pass surfaces
/// them instead, with 1-based line and column of the offending character.
pub fn check_quoting(content: &str) -> MatrixResult<()> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut column = 0;
    let mut quote_start = (1, 1);

    for ch in content.chars() {
        column += 1;

        state = match (state, ch) {
            (QuoteState::FieldStart, '"') => {
                quote_start = (line, column);
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, ',' | '\r' | '\n') => {
                QuoteState::FieldStart
            }
            (QuoteState::Unquoted, '"') => {
                return Err(malformed(line, column, "bare \" in non-quoted field"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, '"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, '"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, ',' | '\r' | '\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, _) => {
                return Err(malformed(line, column, "extraneous or missing \" in quoted-field"));
            }
        };

        if ch == '\n' {
            line += 1;
            column = 0;
        }
    }

    if let QuoteState::Quoted = state {
        let (line, column) = quote_start;
        return Err(malformed(line, column, "extraneous or missing \" in quoted-field"));
    }

    Ok(())
}

fn malformed(line: usize, column: usize, message: &str) -> MatrixError {
    MatrixError::MalformedInput(format!("line {}, column {}: {}", line, column, message))
}

/// Read comma-separated records without any field-count check.
///
/// Empty lines are skipped; every other line becomes one record.
pub fn parse_records(content: &str) -> MatrixResult<Vec<Vec<String>>> {
    check_quoting(content)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| MatrixError::MalformedInput(e.to_string()))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(records)
}

/// Load a validated grid from raw upload bytes.
///
/// # Example
/// ```
/// use matrixops::load_grid;
///
/// let grid = load_grid(b"1, 2\n3,4 \n").unwrap();
/// assert_eq!(grid.size(), 2);
/// assert_eq!(grid.echo(), "1,2\n3,4\n");
/// ```
pub fn load_grid(bytes: &[u8]) -> MatrixResult<Grid> {
    let content = decode_content(bytes);
    let records = parse_records(&content)?;
    Grid::try_from_rows(records)
}

/// Load a grid from any reader. The reader is consumed and dropped on
/// every path; read failures count as an unreadable file.
pub fn load_grid_reader<R: Read>(mut reader: R) -> MatrixResult<Grid> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| MatrixError::MissingFile(e.to_string()))?;
    load_grid(&bytes)
}

/// Load a grid from a CSV file on disk.
pub fn load_grid_file<P: AsRef<Path>>(path: P) -> MatrixResult<Grid> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        MatrixError::MissingFile(format!("cannot open '{}': {}", path.as_ref().display(), e))
    })?;
    load_grid_reader(file)
}
