//! Prelude module - common imports for rowshift users
//!
//! ```rust
//! use rowshift::prelude::*;
//! ```

pub use crate::{
    CellAddress,
    CellComment,
    CellContent,
    CellError,
    CellValue,
    CopyStats,
    Error,
    FormulaTranslator,
    // Extension traits
    Grid,
    NumberFormat,
    Result,
    RowShiftExt,
    ShiftOptions,
    ShiftStats,
    Style,
    Worksheet,
};
