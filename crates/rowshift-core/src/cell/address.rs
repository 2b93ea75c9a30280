//! A1-style cell addresses

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// Zero-based cell position, written in A1 notation
///
/// `$` markers are accepted when parsing and dropped: a position is neither
/// absolute nor relative.
///
/// ```
/// use rowshift_core::CellAddress;
///
/// let addr: CellAddress = "$C$10".parse().unwrap();
/// assert_eq!((addr.row, addr.col), (9, 2));
/// assert_eq!(addr.to_string(), "C10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress(text.to_string());

        let rest = text.trim();
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (letters, digits) = rest.split_at(split);
        let digits = digits.strip_prefix('$').unwrap_or(digits);

        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let number: u64 = digits.parse().map_err(|_| invalid())?;
        let row = number.checked_sub(1).ok_or_else(invalid)?;
        let row = u32::try_from(row).unwrap_or(u32::MAX);
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self {
            row,
            col: column_index(letters)?,
        })
    }
}

/// `A` is 0, `Z` 25, `AA` 26
fn column_index(letters: &str) -> Result<u16> {
    let mut number: u32 = 0;
    for b in letters.bytes() {
        number = number * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
        if number > u32::from(MAX_COLS) {
            return Err(Error::InvalidAddress(format!(
                "column {letters} is past the last column"
            )));
        }
    }
    u16::try_from(number - 1).map_err(|_| Error::InvalidAddress(letters.to_string()))
}

fn column_letters(col: u16) -> String {
    let mut number = u32::from(col) + 1;
    let mut letters = Vec::new();
    while number > 0 {
        number -= 1;
        letters.push(char::from(b'A' + (number % 26) as u8));
        number /= 26;
    }
    letters.iter().rev().collect()
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), u64::from(self.row) + 1)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_columns() {
        for (col, letters) in [(0, "A"), (25, "Z"), (26, "AA"), (701, "ZZ"), (16383, "XFD")] {
            assert_eq!(column_letters(col), letters);
            assert_eq!(column_index(letters).unwrap(), col);
        }
        assert_eq!(column_index("xfd").unwrap(), 16383);
        assert!(column_index("XFE").is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("b$5").unwrap(), CellAddress::new(4, 1));
        assert_eq!(CellAddress::parse(" $AB$2 ").unwrap(), CellAddress::new(1, 27));
    }

    #[test]
    fn test_parse_errors() {
        for text in ["", "12", "A", "A0", "$$A1", "A1B", "A-1", "Ä1"] {
            assert!(CellAddress::parse(text).is_err(), "{text}");
        }
        assert!(matches!(
            CellAddress::parse("A1048577"),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(CellAddress::parse("A99999999999999999999999").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["A1", "XFD1048576", "AA20"] {
            assert_eq!(CellAddress::parse(text).unwrap().to_string(), text);
        }
    }
}
