//! Errors raised by the sheet

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a cell address: {0}")]
    InvalidAddress(String),

    /// Row index and the last valid row
    #[error("row {0} is past the last row {1}")]
    RowOutOfBounds(u32, u32),

    /// Column index and the last valid column
    #[error("column {0} is past the last column {1}")]
    ColumnOutOfBounds(u16, u16),

    /// A row shift whose destination would fall past the last row
    #[error("cannot move rows {start}..={end} down by {distance}: last row is {max}")]
    ShiftOutOfBounds {
        start: u32,
        end: u32,
        distance: u32,
        max: u32,
    },

    #[error("no style with index {0}")]
    InvalidStyleIndex(u32),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other<S: Into<String>>(message: S) -> Self {
        Error::Other(message.into())
    }
}
