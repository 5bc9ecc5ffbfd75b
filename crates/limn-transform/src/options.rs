/// Column designated as the date column unless told otherwise.
pub const DEFAULT_DATE_KEY: &str = "date";

/// How text cells in the date column are turned into dates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateStrings {
    /// Text is a parse error. Callers must supply dates.
    #[default]
    Reject,
    /// Parse with a `strftime` format (time fields are discarded).
    Format(String),
    /// Try ISO-8601 and common date / date-time layouts.
    BestEffort,
}

/// Options for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Name of the date column. `None` builds a table without one.
    pub date_key: Option<String>,

    /// Handling of text values in the date column.
    pub date_strings: DateStrings,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_key: Some(DEFAULT_DATE_KEY.to_string()),
            date_strings: DateStrings::default(),
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_key(mut self, key: impl Into<String>) -> Self {
        self.date_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn without_date(mut self) -> Self {
        self.date_key = None;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_strings = DateStrings::Format(format.into());
        self
    }

    #[must_use]
    pub fn with_best_effort_dates(mut self) -> Self {
        self.date_strings = DateStrings::BestEffort;
        self
    }
}
