use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::{IngestError, Result};

/// A column chosen by header name or by zero-based position.
///
/// Parsing treats an all-digit argument as a position, so `0` selects the
/// first column and `Hour` selects the column named `Hour`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl ColumnSelector {
    /// Resolves the selector against `headers`, returning the column name.
    pub fn resolve<'a>(&self, headers: &'a [String]) -> Result<&'a str> {
        match self {
            ColumnSelector::Index(index) => headers
                .get(*index)
                .map(String::as_str)
                .ok_or(IngestError::ColumnIndexOutOfRange {
                    index: *index,
                    width: headers.len(),
                }),
            ColumnSelector::Name(name) => headers
                .iter()
                .find(|header| *header == name)
                .map(String::as_str)
                .ok_or_else(|| IngestError::ColumnNotFound {
                    column: name.clone(),
                    available: headers.to_vec(),
                }),
        }
    }
}

impl FromStr for ColumnSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && let Ok(index) = s.parse()
        {
            return Ok(ColumnSelector::Index(index));
        }
        Ok(ColumnSelector::Name(s.to_string()))
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Index(index) => write!(f, "{index}"),
            ColumnSelector::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for ColumnSelector {
    fn from(index: usize) -> Self {
        ColumnSelector::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["Hour".to_string(), "Continent".to_string(), "Count".to_string()]
    }

    #[test]
    fn test_parse_digits_as_index() {
        assert_eq!("2".parse::<ColumnSelector>(), Ok(ColumnSelector::Index(2)));
        assert_eq!(
            "Hour".parse::<ColumnSelector>(),
            Ok(ColumnSelector::Name("Hour".to_string()))
        );
        assert_eq!(
            "-1".parse::<ColumnSelector>(),
            Ok(ColumnSelector::Name("-1".to_string()))
        );
    }

    #[test]
    fn test_resolve() {
        let headers = headers();
        assert_eq!(ColumnSelector::Index(1).resolve(&headers).unwrap(), "Continent");
        assert_eq!(ColumnSelector::Name("Count".to_string()).resolve(&headers).unwrap(), "Count");
    }

    #[test]
    fn test_resolve_out_of_range() {
        let err = ColumnSelector::Index(3).resolve(&headers()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::ColumnIndexOutOfRange { index: 3, width: 3 }
        ));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = ColumnSelector::Name("date".to_string()).resolve(&headers()).unwrap_err();
        assert!(matches!(err, IngestError::ColumnNotFound { .. }));
    }
}
