//! Student identifier format: `STU-<YYYY><NNNN>`.
//!
//! The sequence is fixed at four digits so that string order and numeric
//! order agree; the next identifier is derived from the greatest existing one
//! by plain text comparison. Once a year reaches 9999 the generator refuses
//! to continue rather than emit a five-digit sequence that would sort before
//! `STU-<YYYY>9999`.

use super::error::{StoreError, StoreResult};

pub const PREFIX: &str = "STU-";
pub const SEQUENCE_WIDTH: usize = 4;
pub const MAX_SEQUENCE: u32 = 9999;

/// `STU-2025` for 2025.
pub fn year_prefix(year: i32) -> String {
    format!("{}{:04}", PREFIX, year)
}

/// SQLite `GLOB` pattern matching only well-formed ids of `year`.
pub fn glob_pattern(year: i32) -> String {
    format!("{}{}", year_prefix(year), "[0-9]".repeat(SEQUENCE_WIDTH))
}

pub fn format_id(year: i32, sequence: u32) -> StoreResult<String> {
    if sequence == 0 || sequence > MAX_SEQUENCE {
        return Err(StoreError::SequenceExhausted(year));
    }
    Ok(format!("{}{:0width$}", year_prefix(year), sequence, width = SEQUENCE_WIDTH))
}

/// Trailing sequence of `id` if it is a well-formed id of `year`.
pub fn parse_sequence(id: &str, year: i32) -> Option<u32> {
    let digits = id.strip_prefix(&year_prefix(year))?;
    if digits.len() != SEQUENCE_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Identifier following `last`, the greatest existing id of `year`.
pub fn next_after(last: Option<&str>, year: i32) -> StoreResult<String> {
    let sequence = match last {
        Some(id) => parse_sequence(id, year).ok_or_else(|| StoreError::MalformedStudentId(id.to_string()))? + 1,
        None => 1,
    };
    format_id(year, sequence)
}
