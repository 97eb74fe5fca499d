//! cookie storage for requests that are replayed verbatim to a server
use super::DataContainer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// attributes that only mean something to a browser; a cookie that is sent back
/// to the server must not carry them
pub const BROWSER_ONLY_ATTRIBUTES: [&str; 4] = ["path", "expires", "domain", "max-age"];

/// mapping of cookie name to value(s)
///
/// # Examples
///
/// ```
/// # use seedreq::containers::Cookie;
/// let cookie = Cookie::for_replay("id=42; Path=/; Domain=h; HttpOnly");
///
/// assert_eq!(cookie.get_first("id"), Some("42"));
/// assert!(cookie.get("Path").is_none());
/// assert_eq!(cookie.to_string(), "id=42");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cookie {
    values: DataContainer,
}

impl Cookie {
    /// create an empty cookie
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// parse a `Cookie`/`Set-Cookie` style string (`name=value; other=value`)
    ///
    /// segments without an `=` (`Secure`, `HttpOnly`) are flags, not pairs, and
    /// are skipped. Values are kept verbatim, no percent-decoding occurs.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let values = raw
            .split(';')
            .filter_map(|segment| segment.split_once('='))
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Self { values }
    }

    /// parse `raw` and strip every [`BROWSER_ONLY_ATTRIBUTES`] entry, regardless of case
    #[must_use]
    pub fn for_replay(raw: &str) -> Self {
        let mut cookie = Self::parse(raw);
        cookie.strip_browser_attributes();
        cookie
    }

    /// remove `path`, `expires`, `domain` and `max-age`; missing keys are fine
    pub fn strip_browser_attributes(&mut self) {
        let doomed: Vec<String> = self
            .values
            .keys()
            .filter(|name| {
                BROWSER_ONLY_ATTRIBUTES
                    .iter()
                    .any(|attribute| name.eq_ignore_ascii_case(attribute))
            })
            .map(String::from)
            .collect();

        for name in doomed {
            self.values.remove(&name);
        }
    }

    /// get every value stored for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name)
    }

    /// get the first value stored for `name`
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.values.get_first(name)
    }

    /// view the cookie as a [`DataContainer`]
    #[must_use]
    pub const fn data_container(&self) -> &DataContainer {
        &self.values
    }

    /// number of distinct cookie names
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// returns `true` if the cookie holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Display for Cookie {
    /// renders the value of a `Cookie` request header
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (name, value) in self.values.pairs() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;

            write!(f, "{name}={value}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// all four browser-only attributes are removed, case-insensitively
    #[test]
    fn for_replay_strips_every_browser_attribute() {
        let cookie = Cookie::for_replay(
            "sid=abc; path=/; EXPIRES=Wed, 21 Oct 2015 07:28:00 GMT; Domain=h; Max-Age=3600",
        );

        assert_eq!(cookie.len(), 1);
        assert_eq!(cookie.get_first("sid"), Some("abc"));
    }

    /// a cookie without any of the attributes is left alone
    #[test]
    fn strip_is_best_effort() {
        let mut cookie = Cookie::parse("a=1; b=2");
        cookie.strip_browser_attributes();

        assert_eq!(cookie.to_string(), "a=1; b=2");
    }

    /// values may themselves contain `=`
    #[test]
    fn parse_splits_on_first_equals_only() {
        let cookie = Cookie::parse("token=abc==; flag");

        assert_eq!(cookie.get_first("token"), Some("abc=="));
        assert!(cookie.get("flag").is_none());
    }

    /// empty input yields an empty cookie
    #[test]
    fn parse_empty_string() {
        assert!(Cookie::parse("").is_empty());
        assert!(Cookie::parse(" ; ;").is_empty());
    }
}
