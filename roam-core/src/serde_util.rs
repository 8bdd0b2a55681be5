//! Lenient deserializers for the loosely-typed JSON the booking pages send.

/// Accepts a calendar date as `"2025-01-01"`, a full ISO timestamp
/// (`"2025-01-01T00:00:00.000Z"`), or anything unparseable, which maps to
/// `None` the way the original forms treated bad dates.
pub mod date_like {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::date_like;
    use chrono::NaiveDate;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            date_like::parse("2025-01-01"),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
    }

    #[test]
    fn truncates_iso_timestamps() {
        assert_eq!(
            date_like::parse("2025-06-15T18:30:00.000Z"),
            Some(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
        );
    }

    #[test]
    fn garbage_maps_to_none() {
        assert_eq!(date_like::parse("next tuesday"), None);
        assert_eq!(date_like::parse(""), None);
    }
}
