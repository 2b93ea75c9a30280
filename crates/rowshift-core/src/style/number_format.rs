//! Number formats

/// How a cell displays numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    #[default]
    General,
    /// One of the spreadsheet's numbered built-in formats
    BuiltIn(u32),
    /// A format code
    Custom(String),
}

impl NumberFormat {
    /// `m/d/yyyy`
    pub const ID_DATE_SHORT: u32 = 14;
    /// `m/d/yyyy h:mm`
    pub const ID_DATETIME: u32 = 22;

    pub fn date_short() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATE_SHORT)
    }

    pub fn datetime() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATETIME)
    }

    /// Whether numbers display as dates or times
    ///
    /// Built-in formats 14 to 22 and the elapsed-time formats 45 to 47 are
    /// dates. A format code is a date when it has a `y m d h s` placeholder
    /// outside quoted text and bracketed sections.
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(code) => has_date_placeholder(code),
        }
    }
}

fn has_date_placeholder(code: &str) -> bool {
    let mut quoted = false;
    let mut bracketed = false;
    for c in code.chars() {
        match c {
            '"' => quoted = !quoted,
            _ if quoted => {}
            '[' => bracketed = true,
            ']' => bracketed = false,
            _ if bracketed => {}
            _ if "ymdhs".contains(c.to_ascii_lowercase()) => return true,
            _ => {}
        }
    }
    false
}
