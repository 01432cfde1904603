//! Query parameters for Genji API requests.
//!
//! The API follows a JSON:API-like convention (`page[limit]`, `filter[x]`)
//! and expects list values as positional entries: `key[0]=a&key[1]=b`.

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Sent as one `key=value` entry.
    Scalar(String),
    /// Sent as one `key[i]=item` entry per item, in order.
    List(Vec<String>),
}

/// Ordered mapping of parameter names to values.
///
/// Insertion order is preserved on the wire. Absent values are never
/// stored, so they are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiQuery {
    params: Vec<(String, QueryValue)>,
}

impl ApiQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar parameter, stringified with `Display`.
    pub fn scalar(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params
            .push((key.into(), QueryValue::Scalar(value.to_string())));
        self
    }

    /// Append a scalar parameter only when a value is present.
    pub fn scalar_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.scalar(key, value),
            None => self,
        }
    }

    /// Append a list parameter.
    pub fn list<I, T>(mut self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let items = items.into_iter().map(|item| item.to_string()).collect();
        self.params.push((key.into(), QueryValue::List(items)));
        self
    }

    /// Whether no parameter has been added.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Look up a parameter by name.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Expand into the flat `(key, value)` entries sent on the wire.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            match value {
                QueryValue::Scalar(value) => pairs.push((key.clone(), value.clone())),
                QueryValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        pairs.push((format!("{key}[{index}]"), item.clone()));
                    }
                }
            }
        }
        pairs
    }

    /// URL-encoded query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.pairs()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(query: &str) -> Vec<(String, String)> {
        serde_urlencoded::from_str(query).unwrap()
    }

    #[test]
    fn test_list_expands_to_indexed_entries() {
        let query = ApiQuery::new().list("filter[vol_str]", ["a", "b"]);
        assert_eq!(
            query.pairs(),
            vec![
                ("filter[vol_str][0]".to_string(), "a".to_string()),
                ("filter[vol_str][1]".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let query = ApiQuery::new()
            .scalar("page[limit]", 20)
            .scalar("page[offset]", 0)
            .list("filter[vol_str]", ["桐壺", "帚木"])
            .scalar("q", "源氏");

        let keys: Vec<_> = query.pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "page[limit]",
                "page[offset]",
                "filter[vol_str][0]",
                "filter[vol_str][1]",
                "q"
            ]
        );
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let query = ApiQuery::new()
            .scalar_opt("sort", None::<String>)
            .scalar_opt("q", Some("光"));
        assert!(query.get("sort").is_none());
        assert_eq!(query.get("q"), Some(&QueryValue::Scalar("光".to_string())));
        assert_eq!(query.pairs().len(), 1);
    }

    #[test]
    fn test_empty_list_sends_nothing() {
        let query = ApiQuery::new().list("filter[vol_str]", Vec::<String>::new());
        assert!(!query.is_empty());
        assert!(query.pairs().is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_query_string_decodes_to_bracket_keys() {
        let query = ApiQuery::new()
            .scalar("filter[unifyDakuon]", false)
            .list("filter[vol_str]", ["a", "b"]);

        let encoded = query.to_query_string();
        assert!(!encoded.contains('['));

        let decoded = decode(&encoded);
        let joined: Vec<_> = decoded.iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(
            joined.join("&"),
            "filter[unifyDakuon]=false&filter[vol_str][0]=a&filter[vol_str][1]=b"
        );
    }
}
