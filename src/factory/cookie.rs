use crate::containers::{Cookie, Headers};

use tracing::{instrument, trace};

/// build the cookie to replay alongside requests derived from a response
///
/// every header whose name contains `cookie` (`Set-Cookie`, `Set-Cookie2`,
/// `Cookie`, ...) contributes its values; browser-only attributes are then
/// stripped, since the result is sent back to the server verbatim.
///
/// # Examples
///
/// ```
/// # use seedreq::containers::Headers;
/// # use seedreq::factory::cookie_from_headers;
/// let headers: Headers = [("Set-Cookie", "id=42; Path=/; Domain=h")].into_iter().collect();
///
/// let cookie = cookie_from_headers(&headers);
///
/// assert_eq!(cookie.to_string(), "id=42");
/// ```
#[must_use]
#[instrument(skip_all, level = "trace")]
pub fn cookie_from_headers(headers: &Headers) -> Cookie {
    let raw: Vec<&str> = headers
        .iter()
        .filter(|(name, _)| name.to_ascii_lowercase().contains("cookie"))
        .flat_map(|(_, values)| values.iter().map(String::as_str))
        .collect();

    // separate headers are separate cookies; joining with `;` keeps them from
    // fusing into a single name/value pair
    let cookie = Cookie::for_replay(&raw.join("; "));

    trace!(%cookie, "built replay cookie");

    cookie
}
