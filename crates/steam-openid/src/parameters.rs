use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// `openid.*` parameters attached to a request, keyed by their literal (dotted) names.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Parameters {
    inner: BTreeMap<String, String>,
}

impl Parameters {
    /// Decodes `application/x-www-form-urlencoded` data.
    ///
    /// This works for both query strings and POST bodies. If a key appears more than once, the
    /// first value is kept.
    pub fn from_urlencoded(data: &[u8]) -> Self {
        form_urlencoded::parse(data)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over all parameters, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut inner = BTreeMap::new();

        for (key, value) in iter {
            inner.entry(key.into()).or_insert_with(|| value.into());
        }

        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_encoding() {
        let params = Parameters::from_urlencoded(
            b"openid.return_to=https%3A%2F%2Fexample.com%2Fcallback&openid.mode=id_res",
        );

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("openid.return_to"), Some("https://example.com/callback"));
        assert_eq!(params.get("openid.mode"), Some("id_res"));
    }

    #[test]
    fn first_value_wins() {
        let params = Parameters::from_urlencoded(b"openid.mode=id_res&openid.mode=cancel");

        assert_eq!(params.get("openid.mode"), Some("id_res"));
    }

    #[test]
    fn empty_input() {
        assert!(Parameters::from_urlencoded(b"").is_empty());
    }
}
