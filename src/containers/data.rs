//! ordered, multi-valued key/value storage used for query strings, form fields and
//! JSON members

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use std::fmt::{self, Display, Formatter};

/// ordered mapping from a field name to every value that field carries
///
/// keys are unique and keep the order in which they were first seen, which
/// makes replaying and diffing a request deterministic. Repeated fields
/// (i.e. `a=1&a=2`) are stored as a single key with multiple values.
///
/// # Examples
///
/// ```
/// # use seedreq::containers::DataContainer;
/// let container = DataContainer::parse_urlencoded("b=2&a=1&b=3");
///
/// assert_eq!(container.keys().collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(container.get("b"), Some(["2".to_string(), "3".to_string()].as_slice()));
/// assert_eq!(container.to_urlencoded(), "b=2&b=3&a=1");
/// ```
#[derive(Clone, Debug, Default, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataContainer {
    fields: IndexMap<String, Vec<String>>,
}

impl DataContainer {
    /// create an empty container
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// parse an `application/x-www-form-urlencoded` string into a container
    ///
    /// blank values are kept (`a=&b` yields `a -> [""]` and `b -> [""]`), since
    /// an empty parameter is still an injection point
    #[must_use]
    pub fn parse_urlencoded(input: &str) -> Self {
        form_urlencoded::parse(input.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// replace every value associated with `key`; a new key is added at the end
    pub fn insert<K, I, V>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.fields
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    /// add a single value to `key`, creating the key if necessary
    pub fn append<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// get every value associated with `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// get the first value associated with `key`
    #[must_use]
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// remove `key`, preserving the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.fields.shift_remove(key)
    }

    /// returns `true` if `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// iterate over the keys, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// iterate over every key and its values, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// iterate over every key/value pair, flattening repeated fields
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().flat_map(|(key, values)| {
            values.iter().map(move |value| (key, value.as_str()))
        })
    }

    /// number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// returns `true` if the container holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// serialize the container as `application/x-www-form-urlencoded`
    ///
    /// a key without values is emitted once with an empty value
    #[must_use]
    pub fn to_urlencoded(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for (key, values) in &self.fields {
            if values.is_empty() {
                serializer.append_pair(key, "");
                continue;
            }

            for value in values {
                serializer.append_pair(key, value);
            }
        }

        serializer.finish()
    }
}

// order matters for replay, so equality can't be IndexMap's order-insensitive version
impl PartialEq for DataContainer {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl Display for DataContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_urlencoded())
    }
}

impl<K, V> FromIterator<(K, V)> for DataContainer
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut container = Self::new();

        for (key, value) in iter {
            container.append(key, value);
        }

        container
    }
}

impl<K, V> Extend<(K, V)> for DataContainer
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl From<IndexMap<String, Vec<String>>> for DataContainer {
    fn from(fields: IndexMap<String, Vec<String>>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// repeated keys collapse onto the first occurrence's position
    #[test]
    fn from_pairs_merges_repeated_keys_in_first_seen_order() {
        let container: DataContainer = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

        assert_eq!(container.len(), 2);
        assert_eq!(container.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            container.get("a"),
            Some(["1".to_string(), "3".to_string()].as_slice())
        );
    }

    /// blank values survive parsing
    #[test]
    fn parse_urlencoded_keeps_blank_values() {
        let container = DataContainer::parse_urlencoded("a=&b");

        assert_eq!(container.get_first("a"), Some(""));
        assert_eq!(container.get_first("b"), Some(""));
    }

    /// percent-encoding and plus signs are decoded
    #[test]
    fn parse_urlencoded_decodes_values() {
        let container = DataContainer::parse_urlencoded("q=hello+world&x=%3Cscript%3E");

        assert_eq!(container.get_first("q"), Some("hello world"));
        assert_eq!(container.get_first("x"), Some("<script>"));
    }

    /// two containers with the same pairs in a different order are not equal
    #[test]
    fn equality_is_order_sensitive() {
        let first = DataContainer::parse_urlencoded("a=1&b=2");
        let second = DataContainer::parse_urlencoded("b=2&a=1");

        assert_ne!(first, second);
        assert_eq!(first, DataContainer::parse_urlencoded("a=1&b=2"));
    }

    /// removing a key keeps the remaining keys in order
    #[test]
    fn remove_preserves_order() {
        let mut container = DataContainer::parse_urlencoded("a=1&b=2&c=3");

        assert_eq!(container.remove("b"), Some(vec!["2".to_string()]));
        assert_eq!(container.keys().collect::<Vec<_>>(), ["a", "c"]);
        assert!(container.remove("b").is_none());
    }

    /// insert replaces values without moving the key
    #[test]
    fn insert_replaces_in_place() {
        let mut container = DataContainer::parse_urlencoded("a=1&b=2");

        container.insert("a", ["9", "8"]);

        assert_eq!(container.to_urlencoded(), "a=9&a=8&b=2");
    }

    /// a key with no values is still serialized
    #[test]
    fn to_urlencoded_emits_empty_keys() {
        let mut container = DataContainer::new();
        container.insert("empty", Vec::<String>::new());
        container.append("full", "a b");

        assert_eq!(container.to_urlencoded(), "empty=&full=a+b");
        assert_eq!(container.pairs().count(), 1);
    }
}
