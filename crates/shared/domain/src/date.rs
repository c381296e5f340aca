//! Calendar dates without a time of day.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DATE_LAYOUT;
use crate::error::{DomainError, DomainResult};

/// A date-only value written and read as `YYYY-MM-DD`.
///
/// Stored as a `DATE` column through its [`NaiveDate`] conversions, so values
/// come back from persistence exactly as they went in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OnlyDate(NaiveDate);

impl OnlyDate {
    /// Parse the fixed layout. Non-canonical spellings such as `2024-2-9` or
    /// surrounding whitespace are rejected.
    pub fn parse(value: &str) -> DomainResult<Self> {
        NaiveDate::parse_from_str(value, DATE_LAYOUT)
            .ok()
            .map(Self)
            .filter(|date| date.to_string() == value)
            .ok_or_else(|| DomainError::InvalidDate {
                value: value.to_string(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for OnlyDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_LAYOUT))
    }
}

impl std::str::FromStr for OnlyDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OnlyDate::parse(s)
    }
}

impl TryFrom<&str> for OnlyDate {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        OnlyDate::parse(value)
    }
}

impl From<NaiveDate> for OnlyDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<OnlyDate> for NaiveDate {
    fn from(date: OnlyDate) -> Self {
        date.0
    }
}

impl Serialize for OnlyDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OnlyDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OnlyDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_day_round_trip() {
        let date = OnlyDate::parse("2024-02-29").unwrap();
        let stored: NaiveDate = date.into();
        assert_eq!(OnlyDate::from(stored).to_string(), "2024-02-29");
    }

    #[test]
    fn test_year_end_round_trip() {
        let date = OnlyDate::parse("2023-12-31").unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(date.to_string(), "2023-12-31");
    }

    #[test]
    fn test_invalid_dates_are_errors() {
        for raw in ["", "2023-02-29", "2024-13-01", "31/12/2023", "2024-2-9", " 2024-01-01", "2024-01-01T00:00:00Z"] {
            assert!(
                matches!(OnlyDate::parse(raw), Err(DomainError::InvalidDate { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_uses_layout_string() {
        let date = OnlyDate::parse("2024-02-29").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-02-29\"");
        let back: OnlyDate = serde_json::from_str("\"2024-02-29\"").unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<OnlyDate>("\"yesterday\"").is_err());
    }
}
