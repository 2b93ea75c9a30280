//! Row metadata

/// A created row
///
/// Rows carry no cells; those live in the worksheet's cell storage. `index`
/// follows the row when it is shifted.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: u32,
    /// Custom height in points, `None` for the sheet default
    pub height: Option<f64>,
}

impl Row {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            height: None,
        }
    }
}
