use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::error::{FieldError, FieldResult};
use crate::{TIMESTAMP_BARE_LEN, TIMESTAMP_PATTERN, TIMESTAMP_TOKEN_LEN};

/// Parse an access-log timestamp into a fixed-offset time.
///
/// Accepts `[13/Nov/2015:11:45:42 +0000]` as it appears in a log line, or
/// the same text without the surrounding delimiters. The date/time is
/// read as local time in the trailing offset; no timezone database is
/// consulted.
pub fn parse_timestamp(raw: &str) -> FieldResult<DateTime<FixedOffset>> {
    if !raw.is_ascii() {
        return Err(FieldError::Parse(format!("non-ASCII timestamp {:?}", raw)));
    }

    // Format: DD/Mon/YYYY:HH:MM:SS ±HHMM (optionally wrapped in one delimiter pair)
    let body = match raw.len() {
        TIMESTAMP_TOKEN_LEN => &raw[1..raw.len() - 1],
        TIMESTAMP_BARE_LEN => raw,
        other => {
            return Err(FieldError::Parse(format!(
                "expected {} or {} characters, got {} in {:?}",
                TIMESTAMP_TOKEN_LEN, TIMESTAMP_BARE_LEN, other, raw
            )))
        }
    };

    let (datetime_part, zone_part) = body.split_at(20);
    let zone = zone_part.as_bytes();
    if zone[0] != b' ' {
        return Err(FieldError::Parse(format!(
            "missing space before offset in {:?}",
            raw
        )));
    }

    let offset = parse_offset(&zone_part[1..])
        .map_err(|reason| FieldError::Parse(format!("{} in {:?}", reason, raw)))?;

    let naive = NaiveDateTime::parse_from_str(datetime_part, TIMESTAMP_PATTERN)
        .map_err(|e| FieldError::Parse(format!("{} in {:?}", e, raw)))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| FieldError::Parse(format!("unrepresentable local time {:?}", raw)))
}

/// `±HHMM` to a fixed offset. The sign applies to hours and minutes alike.
fn parse_offset(text: &str) -> Result<FixedOffset, String> {
    let bytes = text.as_bytes();
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        other => return Err(format!("invalid offset sign {:?}", other as char)),
    };

    let digits = &text[1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("non-numeric offset {:?}", text));
    }
    let hours: i32 = digits[..2].parse().map_err(|_| format!("bad offset hours {:?}", text))?;
    let minutes: i32 = digits[2..].parse().map_err(|_| format!("bad offset minutes {:?}", text))?;
    if minutes >= 60 {
        return Err(format!("offset minutes out of range {:?}", text));
    }

    let total_minutes = sign * (hours * 60 + minutes);
    FixedOffset::east_opt(total_minutes * 60).ok_or_else(|| format!("offset out of range {:?}", text))
}

/// Render a time back into the bracketed access-log form.
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    format!("[{}]", dt.format("%d/%b/%Y:%H:%M:%S %z"))
}

/// Offset from UTC in minutes (east positive).
pub fn offset_minutes(dt: &DateTime<FixedOffset>) -> i32 {
    dt.offset().local_minus_utc() / 60
}
