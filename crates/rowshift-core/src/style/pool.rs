//! Deduplicated style storage

use ahash::AHashMap;

use super::Style;

/// Interned styles addressed by `u32` index, the default style at 0
///
/// Cells hold indices, so a cell copy shares the source's style entry.
#[derive(Debug)]
pub(crate) struct StylePool {
    styles: Vec<Style>,
    index: AHashMap<Style, u32>,
}

impl StylePool {
    pub(crate) fn new() -> Self {
        let mut pool = Self {
            styles: Vec::new(),
            index: AHashMap::new(),
        };
        pool.intern(Style::default());
        pool
    }

    /// Index of an equal style, adding it first if needed
    pub(crate) fn intern(&mut self, style: Style) -> u32 {
        if let Some(&index) = self.index.get(&style) {
            return index;
        }
        let index = u32::try_from(self.styles.len()).unwrap_or(u32::MAX);
        self.index.insert(style.clone(), index);
        self.styles.push(style);
        index
    }

    pub(crate) fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(usize::try_from(index).ok()?)
    }
}
