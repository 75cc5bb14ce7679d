//! Fixed-width census geocode decoding. A block geocode is 15 digits:
//! state (2) + county (3) + tract (6) + block (4); parent geographies are
//! prefixes of it.

use std::error::Error;
use std::fmt;

pub const BLOCK_WIDTH: usize = 15;
pub const TRACT_WIDTH: usize = 11;
pub const STATE_WIDTH: usize = 2;
pub const COUNTY_END: usize = 5;

/// A validated block geocode, zero-padded on the left to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeoKey(String);

impl GeoKey {
    /// Accepts raw source geocodes, which may arrive with leading zeros
    /// stripped. Anything longer than 15 characters or containing a
    /// non-digit is malformed.
    pub fn parse(raw: &str) -> Result<GeoKey, GeoKeyError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(GeoKeyError::Empty);
        }
        if raw.len() > BLOCK_WIDTH {
            return Err(GeoKeyError::TooLong {
                raw: raw.to_string(),
                len: raw.len(),
            });
        }
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(GeoKeyError::NonDigit {
                raw: raw.to_string(),
            });
        }
        Ok(GeoKey(format!("{:0>width$}", raw, width = BLOCK_WIDTH)))
    }

    pub fn block(&self) -> &str {
        &self.0
    }

    pub fn tract(&self) -> &str {
        &self.0[..TRACT_WIDTH]
    }

    pub fn county(&self) -> &str {
        &self.0[STATE_WIDTH..COUNTY_END]
    }

    pub fn state(&self) -> &str {
        &self.0[..STATE_WIDTH]
    }
}

impl fmt::Display for GeoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Truncates an over-long geography code to `width` characters. Some boundary
/// sources publish 12-character tract GEOIDs whose last character is a suffix;
/// the stated compatibility rule is to keep the leading `width` characters.
/// Counts characters, not bytes, so a non-ASCII identifier (junk input, it
/// will never match a unit) truncates without panicking.
pub fn truncate_id(id: &str, width: usize) -> &str {
    match id.char_indices().nth(width) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoKeyError {
    Empty,
    TooLong { raw: String, len: usize },
    NonDigit { raw: String },
}

impl fmt::Display for GeoKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoKeyError::Empty => write!(f, "empty geocode"),
            GeoKeyError::TooLong { raw, len } => {
                write!(f, "geocode {raw} is {len} characters, expected at most {BLOCK_WIDTH}")
            }
            GeoKeyError::NonDigit { raw } => {
                write!(f, "geocode {raw} contains non-digit characters")
            }
        }
    }
}

impl Error for GeoKeyError {}
