//! Per-request timestamp capture.
//!
//! Each request carries the same instant in two forms: Unix epoch seconds
//! (signed into the signature) and an RFC-1123-style UTC string (signed into
//! the identity). Both are derived from a single clock read so the backend
//! never sees them disagree.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::KyteError;

/// Format of the identity timestamp, e.g. `Wed, 14 Aug 2024 12:00:00 GMT`.
/// Part of the signed payload; must match the backend byte-for-byte.
const HTTP_DATE_FORMAT: &'static [BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// A single wall-clock instant, formatted both ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTimestamp {
    /// Unix epoch seconds (signature input)
    pub epoch_seconds: i64,
    /// RFC-1123-style UTC string (identity input)
    pub http_date: String,
}

impl RequestTimestamp {
    /// Capture the current instant.
    pub fn now() -> Result<Self, KyteError> {
        Self::from_datetime(OffsetDateTime::now_utc())
    }

    /// Derive both timestamp forms from one instant.
    pub fn from_datetime(at: OffsetDateTime) -> Result<Self, KyteError> {
        let at = at.to_offset(UtcOffset::UTC);
        Ok(Self {
            epoch_seconds: at.unix_timestamp(),
            http_date: at.format(HTTP_DATE_FORMAT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_http_date_format() {
        let timestamp = RequestTimestamp::from_datetime(datetime!(2024-08-14 12:00:00 UTC)).unwrap();
        assert_eq!(timestamp.http_date, "Wed, 14 Aug 2024 12:00:00 GMT");
        assert_eq!(timestamp.epoch_seconds, 1723636800);
    }

    #[test]
    fn test_http_date_zero_padding() {
        let timestamp = RequestTimestamp::from_datetime(datetime!(2024-01-02 03:04:05 UTC)).unwrap();
        assert_eq!(timestamp.http_date, "Tue, 02 Jan 2024 03:04:05 GMT");
    }

    #[test]
    fn test_non_utc_input_is_normalized() {
        let timestamp = RequestTimestamp::from_datetime(datetime!(2024-08-14 14:00:00 +02:00)).unwrap();
        assert_eq!(timestamp.http_date, "Wed, 14 Aug 2024 12:00:00 GMT");
        assert_eq!(timestamp.epoch_seconds, 1723636800);
    }

    #[test]
    fn test_now_forms_agree() {
        let timestamp = RequestTimestamp::now().unwrap();
        let reparsed = OffsetDateTime::from_unix_timestamp(timestamp.epoch_seconds).unwrap();
        assert_eq!(
            reparsed.format(HTTP_DATE_FORMAT).unwrap(),
            timestamp.http_date
        );
    }
}
