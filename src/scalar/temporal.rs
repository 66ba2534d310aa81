/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Wire formats for the temporal scalars.
//!
//! All shapes are ISO-8601 subsets:
//! - date:             `YYYY-MM-DD`
//! - time:             `HH:MM[:SS[.fraction]]`, canonical form always
//!   carries seconds and trims the fraction to significant digits
//! - date-time:        `<date>T<time>`
//! - offset-date-time: `<date>T<time><Z or ±HH[:MM[:SS]]>`
//! - timestamp:        `<date>T<time>` pinned to UTC, no offset suffix
//!
//! `time::format_description` handles the fixed-width fields; optional
//! seconds, fractions, and offsets are stitched by hand because the wire
//! grammar wants them present only when meaningful.

use std::time::SystemTime;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_HMS_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
const TIME_HM_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

pub(crate) fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, DATE_FORMAT).map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}

pub(crate) fn format_date(value: Date) -> Result<String, String> {
    value.format(DATE_FORMAT).map_err(|e| e.to_string())
}

pub(crate) fn parse_time(raw: &str) -> Result<Time, String> {
    let (clock, fraction) = match raw.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (raw, None),
    };

    let base = Time::parse(clock, TIME_HMS_FORMAT)
        .or_else(|_| Time::parse(clock, TIME_HM_FORMAT))
        .map_err(|e| format!("expected HH:MM or HH:MM:SS ({e})"))?;

    match fraction {
        None => Ok(base),
        Some(digits) => {
            let nanos = parse_fraction(digits)?;
            base.replace_nanosecond(nanos).map_err(|e| e.to_string())
        }
    }
}

pub(crate) fn format_time(value: Time) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        value.hour(),
        value.minute(),
        value.second()
    );
    push_fraction(&mut out, value.nanosecond());
    out
}

pub(crate) fn parse_date_time(raw: &str) -> Result<PrimitiveDateTime, String> {
    let (date_part, time_part) = raw
        .split_once('T')
        .ok_or_else(|| "expected date and time separated by 'T'".to_string())?;
    let date = parse_date(date_part)?;
    let time = parse_time(time_part)?;
    Ok(PrimitiveDateTime::new(date, time))
}

pub(crate) fn format_date_time(value: PrimitiveDateTime) -> Result<String, String> {
    Ok(format!(
        "{}T{}",
        format_date(value.date())?,
        format_time(value.time())
    ))
}

pub(crate) fn parse_offset_date_time(raw: &str) -> Result<OffsetDateTime, String> {
    let (date_part, rest) = raw
        .split_once('T')
        .ok_or_else(|| "expected date and time separated by 'T'".to_string())?;
    let offset_at = rest
        .find(['Z', 'z', '+', '-'])
        .ok_or_else(|| "missing utc offset, expected Z or ±HH:MM".to_string())?;
    let (time_part, offset_part) = rest.split_at(offset_at);

    let date = parse_date(date_part)?;
    let time = parse_time(time_part)?;
    let offset = parse_offset(offset_part)?;
    Ok(OffsetDateTime::new_in_offset(date, time, offset))
}

pub(crate) fn format_offset_date_time(value: OffsetDateTime) -> Result<String, String> {
    Ok(format!(
        "{}T{}{}",
        format_date(value.date())?,
        format_time(value.time()),
        format_offset(value.offset())
    ))
}

/// Timestamps travel as offset-less local date-times pinned to UTC. The
/// zone never crosses the wire, so a reading in any other zone collapses
/// to its UTC instant.
pub(crate) fn parse_timestamp(raw: &str) -> Result<SystemTime, String> {
    parse_date_time(raw).map(|value| SystemTime::from(value.assume_utc()))
}

pub(crate) fn format_timestamp(value: SystemTime) -> Result<String, String> {
    let utc = OffsetDateTime::from(value).to_offset(UtcOffset::UTC);
    format_date_time(PrimitiveDateTime::new(utc.date(), utc.time()))
}

/// 1 to 9 fractional-second digits, right-padded to nanoseconds.
fn parse_fraction(digits: &str) -> Result<u32, String> {
    if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("fraction must be 1 to 9 digits".to_string());
    }
    let mut padded = [b'0'; 9];
    padded[..digits.len()].copy_from_slice(digits.as_bytes());
    // All bytes are ASCII digits, so the parse cannot fail.
    std::str::from_utf8(&padded)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| "fraction must be 1 to 9 digits".to_string())
}

fn push_fraction(out: &mut String, nanosecond: u32) {
    if nanosecond == 0 {
        return;
    }
    let digits = format!("{nanosecond:09}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

fn parse_offset(raw: &str) -> Result<UtcOffset, String> {
    if raw == "Z" || raw == "z" {
        return Ok(UtcOffset::UTC);
    }

    let unknown = || format!("unknown utc offset {raw:?}, expected Z or ±HH:MM");
    let (sign, body) = match raw.split_at_checked(1) {
        Some(("+", body)) => (1i8, body),
        Some(("-", body)) => (-1i8, body),
        _ => return Err(unknown()),
    };

    let mut parts = body.split(':');
    let hours = parse_offset_component(parts.next())?;
    let minutes = parse_offset_component(parts.next())?;
    let seconds = parse_offset_component(parts.next())?;
    if parts.next().is_some() {
        return Err(unknown());
    }

    UtcOffset::from_hms(sign * hours, sign * minutes, sign * seconds).map_err(|e| e.to_string())
}

/// Offset fields are unsigned digits; the sign lives on the whole offset.
/// Values are capped at 127 before the sign applies, so the later range
/// check in `UtcOffset::from_hms` is reached without overflow.
fn parse_offset_component(part: Option<&str>) -> Result<i8, String> {
    let digits = part.unwrap_or("0");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("offset fields must be unsigned digits".to_string());
    }
    digits
        .parse::<u8>()
        .ok()
        .and_then(|value| i8::try_from(value).ok())
        .ok_or_else(|| "offset field out of range".to_string())
}

fn format_offset(offset: UtcOffset) -> String {
    if offset.whole_seconds() == 0 {
        return "Z".to_string();
    }
    let sign = if offset.is_negative() { '-' } else { '+' };
    let hours = offset.whole_hours().unsigned_abs();
    let minutes = offset.minutes_past_hour().unsigned_abs();
    let seconds = offset.seconds_past_minute().unsigned_abs();
    let mut out = format!("{sign}{hours:02}:{minutes:02}");
    if seconds != 0 {
        out.push_str(&format!(":{seconds:02}"));
    }
    out
}
