//! Page cookie jar abstraction and a simple in-memory implementation.
//!
//! A **page cookie jar** holds the cookies readable by a single host page.
//! The overlay only ever talks to it through two operations that mirror the
//! `document.cookie` surface: one aggregate read and one directive write.
//!
//! This module defines the [`PageCookies`] trait and a reference
//! implementation, [`InMemoryPageCookies`], which stores cookies **in memory
//! only** (no persistence).
//!
//! ## Notes & limitations
//! - Parsing is intentionally **minimal**: only the `Path` and `Expires`
//!   attributes are recognized; `Domain`, `Secure`, `HttpOnly`, `SameSite`,
//!   `Max-Age`, size limits, and eviction policies are not.
//! - There is no origin bucketing. One jar belongs to one page.
//! - Expiration **is** enforced: records whose `Expires` lies in the past are
//!   omitted from the aggregate read.
//! - This module is **not** internally synchronized. Use it via a
//!   `CookiesHandle = Arc<RwLock<dyn PageCookies + Send + Sync>>`.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::adapter::parse_expires;

/// A handle to a page cookie jar.
///
/// This is a reference-counted, read/write-locked pointer to a type-erased
/// [`PageCookies`]. Obtain a **read lock** for the aggregate read and a
/// **write lock** for directive writes.
pub type CookiesHandle = Arc<RwLock<dyn PageCookies + Send + Sync>>;

/// The cookies visible to one host page.
///
/// Types implementing this trait decide how cookies are actually kept; an
/// embedder bridging to a real browser would forward both operations to
/// `document.cookie`, while [`InMemoryPageCookies`] keeps plain records.
pub trait PageCookies: Send + Sync {
    /// Returns the aggregate readable cookie string: all live cookies as
    /// `name=value` pairs joined with `"; "`. Empty when the jar is empty.
    fn cookie_string(&self) -> String;

    /// Applies one write directive of the form
    /// `name=value;expires=<date>;path=/`.
    ///
    /// Attributes after the value are optional. A directive that carries no
    /// name is ignored; writing an existing name replaces that record
    /// ("last write wins").
    fn write_cookie(&mut self, directive: &str);
}

/// A single stored cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    /// `Path` attribute, stored verbatim.
    pub path: Option<String>,
    /// `Expires` attribute, stored as the raw date string.
    pub expires: Option<String>,
}

impl CookieRecord {
    /// True when the record carries a parseable `Expires` attribute that lies
    /// at or before `now`. Records without one never expire.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        match self.expires.as_deref().and_then(parse_expires) {
            Some(expires) => expires <= now,
            None => false,
        }
    }
}

/// Default page cookie jar, **in-memory only** with **no persistence**.
///
/// Records keep their insertion order, which makes the aggregate read stable
/// across repeated calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryPageCookies {
    entries: Vec<CookieRecord>,
}

impl InMemoryPageCookies {
    /// Creates an empty in-memory jar.
    pub fn new() -> Self {
        InMemoryPageCookies {
            entries: Vec::new(),
        }
    }

    /// Wraps the jar in the shared handle the rest of the crate works with.
    pub fn into_handle(self) -> CookiesHandle {
        Arc::new(RwLock::new(self))
    }

    /// All stored records, including expired ones (diagnostics/inspection).
    pub fn records(&self) -> &[CookieRecord] {
        &self.entries
    }
}

impl PageCookies for InMemoryPageCookies {
    fn cookie_string(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.entries
            .iter()
            .filter(|record| !record.is_expired(now))
            .map(|record| format!("{}={}", record.name, record.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write_cookie(&mut self, directive: &str) {
        let Some((name, rest)) = directive.split_once('=') else {
            log::warn!("Ignoring cookie directive without a name: {directive:?}");
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            log::warn!("Ignoring cookie directive without a name: {directive:?}");
            return;
        }

        let mut record = CookieRecord {
            name: name.to_string(),
            value: String::new(),
            path: None,
            expires: None,
        };

        // The first `;`-separated part is the value, everything after it is
        // attributes. The value itself may contain `=` (base64 padding).
        let mut value_seen = false;
        for part in rest.split(';') {
            let part = part.trim();
            if !value_seen {
                record.value = part.to_string();
                value_seen = true;
                continue;
            }

            if let Some((k, v)) = part.split_once('=') {
                match k.to_ascii_lowercase().as_str() {
                    "path" => record.path = Some(v.to_string()),
                    "expires" => record.expires = Some(v.to_string()),
                    _ => {}
                }
            }
        }

        // Replace existing cookie with same name
        if let Some(existing) = self.entries.iter_mut().find(|c| c.name == record.name) {
            *existing = record;
        } else {
            self.entries.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::adapter::format_expires;
    use super::*;
    use time::Duration;

    #[test]
    fn write_then_read_aggregate() {
        let mut jar = InMemoryPageCookies::new();
        jar.write_cookie("alpha=1;path=/");
        jar.write_cookie("beta=2;path=/");
        assert_eq!(jar.cookie_string(), "alpha=1; beta=2");
    }

    #[test]
    fn last_write_wins_per_name() {
        let mut jar = InMemoryPageCookies::new();
        jar.write_cookie("alpha=1;path=/");
        jar.write_cookie("alpha=2;path=/");
        assert_eq!(jar.cookie_string(), "alpha=2");
        assert_eq!(jar.records().len(), 1);
    }

    #[test]
    fn attributes_are_split_off_the_value() {
        let mut jar = InMemoryPageCookies::new();
        jar.write_cookie("alpha=hello;expires=Thu, 18 Sep 2025 12:00:00 GMT;path=/");
        let record = &jar.records()[0];
        assert_eq!(record.value, "hello");
        assert_eq!(record.path.as_deref(), Some("/"));
        assert_eq!(
            record.expires.as_deref(),
            Some("Thu, 18 Sep 2025 12:00:00 GMT")
        );
    }

    #[test]
    fn base64_padding_survives_in_the_value() {
        let mut jar = InMemoryPageCookies::new();
        jar.write_cookie("blob=dGVzdA==;path=/");
        assert_eq!(jar.cookie_string(), "blob=dGVzdA==");
    }

    #[test]
    fn expired_records_are_omitted_from_the_aggregate() {
        let mut jar = InMemoryPageCookies::new();
        let past = format_expires(OffsetDateTime::now_utc() - Duration::days(1));
        jar.write_cookie(&format!("stale=x;expires={past};path=/"));
        assert_eq!(jar.cookie_string(), "");

        // A fresh write under the same name brings it back.
        jar.write_cookie("stale=y;path=/");
        assert_eq!(jar.cookie_string(), "stale=y");
    }

    #[test]
    fn unparseable_expires_means_session_cookie() {
        let mut jar = InMemoryPageCookies::new();
        jar.write_cookie("alpha=1;expires=whenever;path=/");
        assert_eq!(jar.cookie_string(), "alpha=1");
    }

    #[test]
    fn nameless_directives_are_ignored() {
        let mut jar = InMemoryPageCookies::new();
        jar.write_cookie("=orphan");
        jar.write_cookie("no-equals-at-all");
        assert_eq!(jar.cookie_string(), "");
        assert!(jar.records().is_empty());
    }
}
