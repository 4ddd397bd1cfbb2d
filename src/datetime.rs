//! ISO-8601 handling for the `expires` field

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::{Error, ErrorKind, Result};

/// Parse an ISO-8601 timestamp
///
/// RFC 3339 is tried first since every XRD/JRD example in the wild uses it.
/// A timestamp without an offset is read as UTC.
pub fn parse(value: &str) -> Result<OffsetDateTime> {
    let value = value.trim();
    OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(value, &Iso8601::DEFAULT))
        .or_else(|_| PrimitiveDateTime::parse(value, &Iso8601::DEFAULT).map(|dt| dt.assume_utc()))
        .map_err(|_| invalid(value))
}

/// Format a timestamp as RFC 3339
///
/// RFC 3339 offsets have minute precision; a value whose offset carries
/// seconds is written in UTC instead.
pub fn format(value: &OffsetDateTime) -> Result<String> {
    let value = if value.offset().seconds_past_minute() == 0 {
        *value
    } else {
        value.to_offset(UtcOffset::UTC)
    };
    value
        .format(&Rfc3339)
        .map_err(|_| invalid(&value.to_string()))
}

fn invalid(value: &str) -> Error {
    Error::new(ErrorKind::InvalidTimestamp {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_rfc3339() -> Result<()> {
        assert_eq!(parse("1970-01-01T00:00:00Z")?, datetime!(1970-01-01 0:00 UTC));
        assert_eq!(
            parse("2012-10-12T20:56:11+02:00")?,
            datetime!(2012-10-12 20:56:11 +2)
        );
        Ok(())
    }

    #[test]
    fn test_parse_without_offset_is_utc() -> Result<()> {
        assert_eq!(parse("2012-10-12T20:56:11")?, datetime!(2012-10-12 20:56:11 UTC));
        Ok(())
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("next tuesday").map_err(|e| e.kind().clone());
        assert_eq!(
            err,
            Err(ErrorKind::InvalidTimestamp {
                value: "next tuesday".to_string()
            })
        );
    }

    #[test]
    fn test_format_keeps_minute_offsets() -> Result<()> {
        let value = datetime!(2012-10-12 20:56:11 +2);
        assert_eq!(format(&value)?, "2012-10-12T20:56:11+02:00");
        Ok(())
    }

    #[test]
    fn test_format_second_offset_as_utc() -> Result<()> {
        let value = datetime!(2012-10-12 20:56:11 +01:00:30);
        let text = format(&value)?;
        assert_eq!(text, "2012-10-12T19:55:41Z");
        assert_eq!(parse(&text)?, value);
        Ok(())
    }

    #[test]
    fn test_format_round_trip() -> Result<()> {
        let value = datetime!(2012-10-12 20:56:11 UTC);
        let text = format(&value)?;
        assert_eq!(text, "2012-10-12T20:56:11Z");
        assert_eq!(parse(&text)?, value);
        Ok(())
    }
}
