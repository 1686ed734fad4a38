//! `document.cookie`-style helpers on top of a [`CookiesHandle`].
//!
//! [`set_cookie`] and [`get_cookie`] are the only cookie operations the rest
//! of the crate uses: a single-cookie write with a relative retention window,
//! and a single-cookie read that scans the aggregate cookie string. Both are
//! tolerant by construction and never fail; a cookie that cannot be found or
//! parsed reads as absent.

use std::sync::OnceLock;

use time::format_description::FormatItem;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use super::jar::CookiesHandle;

/// Writes `name=value` with a retention window of `days` days.
///
/// The full directive handed to the jar is
/// `name=value;expires=<RFC 1123 date>;path=/`, matching what the aggregate
/// read expects back. The value is written verbatim. A window reaching past
/// the largest date `time` can represent saturates to that date.
pub fn set_cookie(cookies: &CookiesHandle, name: &str, value: &str, days: u32) {
    let expires_at = OffsetDateTime::now_utc()
        .checked_add(Duration::days(i64::from(days)))
        .unwrap_or(PrimitiveDateTime::MAX.assume_utc());
    let directive = format!("{name}={value};expires={};path=/", format_expires(expires_at));
    cookies.write().unwrap().write_cookie(&directive);
}

/// Reads the cookie called `name`, or `None` when no such cookie is set.
///
/// The aggregate cookie string is percent-decoded first, then scanned
/// segment by segment: split on `;`, leading spaces trimmed, and the first
/// segment starting with `name=` wins. The value is everything after that
/// prefix.
pub fn get_cookie(cookies: &CookiesHandle, name: &str) -> Option<String> {
    let raw = cookies.read().unwrap().cookie_string();
    let decoded = percent_decode(&raw);
    let prefix = format!("{name}=");

    decoded
        .split(';')
        .map(|segment| segment.trim_start_matches(' '))
        .find_map(|segment| segment.strip_prefix(prefix.as_str()).map(str::to_string))
}

fn expires_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT",
        )
        .expect("valid time format")
    })
}

/// Formats `at` the way `Expires` attributes are spelled on the wire
/// (RFC 1123, e.g. `Thu, 18 Sep 2025 12:00:00 GMT`).
pub(crate) fn format_expires(at: OffsetDateTime) -> String {
    at.format(expires_format()).unwrap_or_else(|_| String::new())
}

/// Parses an `Expires` attribute previously produced by [`format_expires`].
/// Returns `None` for anything unparseable.
pub(crate) fn parse_expires(raw: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(raw.trim(), expires_format())
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Decodes `%XX` escapes in `input`. Malformed escapes pass through
/// untouched and invalid UTF-8 is replaced, so decoding itself never fails.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::jar::InMemoryPageCookies;
    use super::*;
    use std::sync::{Arc, RwLock};

    fn jar() -> CookiesHandle {
        InMemoryPageCookies::new().into_handle()
    }

    #[test]
    fn set_then_get_round_trips() {
        let cookies = jar();
        set_cookie(&cookies, "mock-user", "premium", 30);
        assert_eq!(get_cookie(&cookies, "mock-user").as_deref(), Some("premium"));
    }

    #[test]
    fn absent_cookie_reads_as_none() {
        let cookies = jar();
        assert_eq!(get_cookie(&cookies, "missing"), None);
    }

    #[test]
    fn name_prefixes_do_not_match() {
        let cookies = jar();
        set_cookie(&cookies, "mock-user", "premium", 30);
        assert_eq!(get_cookie(&cookies, "mock"), None);
    }

    #[test]
    fn scan_skips_unrelated_cookies() {
        let cookies = jar();
        set_cookie(&cookies, "first", "1", 30);
        set_cookie(&cookies, "second", "2", 30);
        assert_eq!(get_cookie(&cookies, "second").as_deref(), Some("2"));
    }

    #[test]
    fn percent_escapes_are_decoded_on_read() {
        let cookies = jar();
        cookies
            .write()
            .unwrap()
            .write_cookie("city=G%C3%B6teborg;path=/");
        assert_eq!(get_cookie(&cookies, "city").as_deref(), Some("Göteborg"));
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("a%2zb"), "a%2zb");
        assert_eq!(percent_decode("%41%42"), "AB");
    }

    #[test]
    fn expires_is_rfc1123() {
        let date = time::Date::from_calendar_date(1994, time::Month::November, 6).unwrap();
        let at = date.with_hms(8, 49, 37).unwrap().assume_utc();
        assert_eq!(format_expires(at), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn expires_round_trips_through_parse() {
        let at = OffsetDateTime::now_utc() + Duration::days(30);
        let formatted = format_expires(at);
        assert!(formatted.ends_with(" GMT"));
        let parsed = parse_expires(&formatted).unwrap();
        assert_eq!(parsed.unix_timestamp(), at.unix_timestamp());
    }

    #[test]
    fn oversized_retention_saturates_the_expiry() {
        let concrete = Arc::new(RwLock::new(InMemoryPageCookies::new()));
        let handle: CookiesHandle = concrete.clone();
        set_cookie(&handle, "mock-user", "premium", u32::MAX);
        assert_eq!(get_cookie(&handle, "mock-user").as_deref(), Some("premium"));

        let jar = concrete.read().unwrap();
        let expires = parse_expires(jar.records()[0].expires.as_deref().unwrap()).unwrap();
        assert_eq!(expires.year(), 9999);
    }

    #[test]
    fn written_directive_carries_expiry_and_path() {
        let concrete = Arc::new(RwLock::new(InMemoryPageCookies::new()));
        let handle: CookiesHandle = concrete.clone();
        set_cookie(&handle, "mock-user", "premium", 30);

        let jar = concrete.read().unwrap();
        let record = &jar.records()[0];
        assert_eq!(record.path.as_deref(), Some("/"));
        let expires = parse_expires(record.expires.as_deref().unwrap()).unwrap();
        assert!(expires > OffsetDateTime::now_utc() + Duration::days(29));
    }
}
