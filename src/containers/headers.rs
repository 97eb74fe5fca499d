//! case-insensitive, multi-valued http header storage
use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// a single header: the name as it was first seen plus all of its values
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

/// ordered http headers
///
/// lookups ignore case, while the casing used on first insertion is kept for
/// serialization.
///
/// # Examples
///
/// ```
/// # use seedreq::containers::Headers;
/// let mut headers = Headers::new();
/// headers.append("Set-Cookie", "a=1");
/// headers.append("set-cookie", "b=2");
///
/// assert_eq!(headers.get("SET-COOKIE"), Some(["a=1".to_string(), "b=2".to_string()].as_slice()));
/// assert_eq!(headers.names().collect::<Vec<_>>(), ["Set-Cookie"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Headers {
    entries: IndexMap<String, HeaderEntry>,
}

impl Headers {
    /// create an empty set of headers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// replace every value of `name`
    ///
    /// an existing header keeps its position and original casing
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();

        self.entries
            .entry(name.to_ascii_lowercase())
            .and_modify(|entry| entry.values = vec![value.clone()])
            .or_insert_with(|| HeaderEntry {
                name,
                values: vec![value],
            });
    }

    /// add a value to `name`, creating the header if necessary
    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();

        self.entries
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| HeaderEntry {
                name,
                values: Vec::new(),
            })
            .values
            .push(value.into());
    }

    /// get every value of `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|entry| entry.values.as_slice())
    }

    /// get the first value of `name`; repeated headers are ignored past the first
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// remove `name`, returning its values
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries
            .shift_remove(&name.to_ascii_lowercase())
            .map(|entry| entry.values)
    }

    /// returns `true` if `name` is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// merge `other` into `self`; on conflicting names, `other`'s values win
    pub fn extend_overriding(&mut self, other: &Self) {
        for (lowered, entry) in &other.entries {
            match self.entries.get_mut(lowered) {
                Some(existing) => existing.values.clone_from(&entry.values),
                None => {
                    self.entries.insert(lowered.clone(), entry.clone());
                }
            }
        }
    }

    /// iterate over the original header names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }

    /// iterate over each header's original name and all of its values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    /// number of distinct header names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// returns `true` if there are no headers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();

        for (name, value) in iter {
            headers.append(name, value);
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// insert on an existing header keeps the first casing and position
    #[test]
    fn insert_replaces_values_and_keeps_casing() {
        let mut headers: Headers = [("Content-Type", "text/html"), ("X-Other", "1")]
            .into_iter()
            .collect();

        headers.insert("content-type", "application/json");

        assert_eq!(headers.names().collect::<Vec<_>>(), ["Content-Type", "X-Other"]);
        assert_eq!(headers.get_first("CONTENT-TYPE"), Some("application/json"));
    }

    /// the incoming side of a merge wins on conflicts, other headers are untouched
    #[test]
    fn extend_overriding_prefers_incoming_values() {
        let mut base: Headers = [("Referer", "a"), ("Accept", "*/*"), ("Accept", "text/html")]
            .into_iter()
            .collect();
        let extra: Headers = [("accept", "application/json"), ("X-New", "1")]
            .into_iter()
            .collect();

        base.extend_overriding(&extra);

        assert_eq!(base.get_first("referer"), Some("a"));
        assert_eq!(
            base.get("Accept"),
            Some(["application/json".to_string()].as_slice())
        );
        assert_eq!(base.names().collect::<Vec<_>>(), ["Referer", "Accept", "X-New"]);
    }

    /// remove is case-insensitive
    #[test]
    fn remove_ignores_case() {
        let mut headers: Headers = [("Content-Length", "10")].into_iter().collect();

        assert_eq!(headers.remove("content-LENGTH"), Some(vec!["10".to_string()]));
        assert!(headers.is_empty());
        assert!(!headers.contains("content-length"));
    }
}
