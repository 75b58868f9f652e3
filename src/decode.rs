use crate::error::{Error, Result};

/// Length of the opaque header in front of the masked export body.
pub const HEADER_LEN: usize = 65;

const MASK: u8 = 0x85;

/// Reverses the mask on a single byte. Line breaks are stored unmasked.
pub fn unmask(b: u8) -> u8 {
    match b {
        b'\r' | b'\n' => b,
        _ => b ^ MASK,
    }
}

/// Strips the header from a raw export and unmasks the remaining body.
pub fn decode(raw: &[u8]) -> Result<Vec<u8>> {
    if raw.len() < HEADER_LEN {
        return Err(Error::ShortExport { actual: raw.len() });
    }

    Ok(raw[HEADER_LEN..].iter().map(|&b| unmask(b)).collect())
}
