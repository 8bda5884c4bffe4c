// Coarse "N units ago" rendering of ISO-8601 timestamps.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Relative time of `iso` against the current clock.
pub fn format_time(iso: Option<&str>) -> String {
    format_time_at(iso, Utc::now())
}

/// Relative time of `iso` against `now`.
///
/// Empty input reads "unknown" and unparseable input is echoed back.
/// Timestamps without an offset are taken as local time. Future timestamps
/// read "just now".
pub fn format_time_at(iso: Option<&str>, now: DateTime<Utc>) -> String {
    let iso = match iso {
        Some(s) if !s.is_empty() => s,
        _ => return "unknown".into(),
    };
    match elapsed_seconds(iso, now) {
        Some(secs) => bucket(secs),
        None => iso.to_string(),
    }
}

fn elapsed_seconds(iso: &str, now: DateTime<Utc>) -> Option<i64> {
    let expanded = expand_basic(iso);
    let iso = expanded.as_deref().unwrap_or(iso);
    if let Some(dt) = parse_offset(iso) {
        return Some((now - dt.with_timezone(&Utc)).num_seconds());
    }
    let naive = parse_naive(iso)?;
    let local_now = now.with_timezone(&Local).naive_local();
    Some((local_now - naive).num_seconds())
}

fn parse_offset(iso: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt);
    }
    // `+0000` style offsets, with `Z` spelled out so `%z` accepts it.
    let iso = match iso.strip_suffix('Z') {
        Some(rest) => format!("{}+0000", rest),
        None => iso.to_string(),
    };
    ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"]
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&iso, fmt).ok())
}

/// Rewrite the basic form `20260130T120000...` as `2026-01-30T12:00:00...`.
fn expand_basic(iso: &str) -> Option<String> {
    let b = iso.as_bytes();
    let digits = |r: std::ops::Range<usize>| b.get(r).map_or(false, |s| s.iter().all(u8::is_ascii_digit));
    if b.get(8) != Some(&b'T') || !digits(0..8) || !digits(9..15) {
        return None;
    }
    Some(format!(
        "{}-{}-{}T{}:{}:{}{}",
        &iso[0..4],
        &iso[4..6],
        &iso[6..8],
        &iso[9..11],
        &iso[11..13],
        &iso[13..15],
        &iso[15..]
    ))
}

fn parse_naive(iso: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn bucket(secs: i64) -> String {
    if secs < MINUTE {
        return "just now".into();
    }
    let days = secs / DAY;
    if days > 0 {
        return format!("{}d ago", days);
    }
    let rem = secs % DAY;
    if rem >= HOUR {
        return format!("{}h ago", rem / HOUR);
    }
    format!("{}m ago", rem / MINUTE)
}
