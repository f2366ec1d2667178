use std::fmt::Write;

use crate::settings::{DisplaySettings, HourPolicy, Precision};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Format elapsed milliseconds as `HH:MM:SS` or `HH:MM:SS.mmm`.
///
/// Minutes and seconds are always two digits and milliseconds three. Hours are
/// at least two digits; with [`HourPolicy::Unbounded`] they widen past 99,
/// with [`HourPolicy::Wrap24`] they wrap modulo 24.
pub fn format_elapsed(elapsed_ms: u64, settings: &DisplaySettings) -> String {
    let mut out = String::with_capacity(12);
    write_elapsed(&mut out, elapsed_ms, settings);
    out
}

/// Like [`format_elapsed`], reusing `buf`. The tick path calls this every refresh.
pub fn write_elapsed(buf: &mut String, elapsed_ms: u64, settings: &DisplaySettings) {
    buf.clear();
    let mut hours = elapsed_ms / MS_PER_HOUR;
    if settings.hours == HourPolicy::Wrap24 {
        hours %= 24;
    }
    let minutes = (elapsed_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (elapsed_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let _ = write!(buf, "{hours:02}:{minutes:02}:{seconds:02}");
    if settings.precision == Precision::Millis {
        let millis = elapsed_ms % MS_PER_SECOND;
        let _ = write!(buf, ".{millis:03}");
    }
}

/// Parse a display string produced by [`format_elapsed`] back into milliseconds.
///
/// Accepts both precisions. Only unbounded-hour output round-trips; a wrapped
/// hour field parses as the wrapped value.
pub fn parse_elapsed(raw: &str) -> Option<u64> {
    let (clock, millis) = match raw.split_once('.') {
        Some((clock, millis)) => (clock, Some(millis)),
        None => (raw, None),
    };

    let mut fields = clock.split(':');
    let hours = parse_hours(fields.next()?)?;
    let minutes = parse_fixed(fields.next()?, 2).filter(|m| *m < 60)?;
    let seconds = parse_fixed(fields.next()?, 2).filter(|s| *s < 60)?;
    if fields.next().is_some() {
        return None;
    }
    let millis = match millis {
        Some(raw) => parse_fixed(raw, 3)?,
        None => 0,
    };

    hours
        .checked_mul(MS_PER_HOUR)?
        .checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
}

fn parse_fixed(raw: &str, width: usize) -> Option<u64> {
    if raw.len() != width || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_hours(raw: &str) -> Option<u64> {
    if raw.len() < 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Widened hour fields never carry a leading zero.
    if raw.len() > 2 && raw.starts_with('0') {
        return None;
    }
    raw.parse().ok()
}
