//! Conversions from the export's fixed-width scalar columns to the decimal text written into the
//! legacy tables.

use crate::error::{Error, Result};
use crate::txt_data::{slice, slice_from};

fn expect_len(field: &'static str, raw: &str, expected: usize) -> Result<()> {
    let actual = raw.chars().count();
    if actual != expected {
        return Err(Error::FieldLength {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| Error::NotANumber {
        field,
        value: raw.to_string(),
    })
}

/// A column is blank when it is non-empty and holds only whitespace.
pub fn is_blank(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(char::is_whitespace)
}

/// `040123456` -> `40.123456`
pub fn to_pmdg_lat(raw: &str) -> Result<String> {
    expect_len("latitude", raw, 9)?;
    let deg = parse_int("latitude", slice(raw, 0, 3))?;
    Ok(format!("{}.{}", deg, slice_from(raw, 3)))
}

/// `0040123456` -> `40.123456`
pub fn to_pmdg_lon(raw: &str) -> Result<String> {
    expect_len("longitude", raw, 10)?;
    let deg = parse_int("longitude", slice(raw, 0, 4))?;
    Ok(format!("{}.{}", deg, slice_from(raw, 4)))
}

/// Positive elevations lose their leading `+`. Negative ones keep only the last four
/// characters; the character after the sign is dropped.
// FIXME: confirm against real data whether that dropped character is ever a significant digit.
pub fn to_pmdg_elev(raw: &str) -> Result<String> {
    expect_len("elevation", raw, 6)?;
    if raw.starts_with('+') {
        Ok(raw.trim_start_matches('+').to_string())
    } else {
        Ok(format!("-{}", slice(raw, 2, 6)))
    }
}

/// NDB frequencies are whole kHz with a trailing tenths digit that is discarded
/// (`03500` -> `350.00`). Everything else is MHz (`11050` -> `110.50`).
pub fn to_pmdg_freq(raw: &str, navaid_type: &str) -> Result<String> {
    expect_len("frequency", raw, 5)?;
    if navaid_type == "NDB" {
        let khz = parse_int("frequency", slice(raw, 0, 4))?;
        Ok(format!("{:.2}", khz as f64))
    } else {
        Ok(format!("{}.{}", slice(raw, 0, 3), slice_from(raw, 3)))
    }
}
