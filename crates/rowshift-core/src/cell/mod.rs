//! Cell values, addresses and storage

mod address;
mod storage;
mod value;

pub use address::CellAddress;
pub(crate) use storage::shift_keys_down;
pub use storage::{CellData, CellStorage};
pub use value::{CellError, CellValue, SharedString};
