//! Ordered request parameters and their signed form.

use std::fmt;

use url::form_urlencoded;

/// Ordered `name=value` pairs for one request.
///
/// Insertion order is preserved; it is the order used for the canonical
/// encoding that gets signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter and return `self` (builder style).
    ///
    /// Any `Display` value is accepted; booleans render as `true`/`false`.
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-url-encode the pairs in insertion order.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Parameters with `timestamp`, `recvWindow` and `signature` appended.
///
/// Built by [`crate::RequestSigner`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: RequestParams,
    timestamp_ms: u64,
    recv_window: u64,
    payload: String,
    signature: String,
}

impl SignedRequest {
    pub(crate) fn new(
        params: RequestParams,
        timestamp_ms: u64,
        recv_window: u64,
        payload: String,
        signature: String,
    ) -> Self {
        Self {
            params,
            timestamp_ms,
            recv_window,
            payload,
            signature,
        }
    }

    /// Parameters that were signed, including `timestamp` and `recvWindow`.
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    /// The exact string the signature was computed over.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Lowercase hex HMAC-SHA256 of [`Self::payload`].
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The wire form: payload followed by `&signature=...`.
    ///
    /// Used as the query string for GET and as the form body for POST.
    pub fn query_string(&self) -> String {
        if self.payload.is_empty() {
            format!("signature={}", self.signature)
        } else {
            format!("{}&signature={}", self.payload, self.signature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_preserve_insertion_order() {
        let params = RequestParams::new()
            .with("zebra", 1)
            .with("alpha", 2)
            .with("middle", 3);

        assert_eq!(params.encode(), "zebra=1&alpha=2&middle=3");
    }

    #[test]
    fn test_bool_renders_lowercase() {
        let params = RequestParams::new().with("reduceOnly", false);
        assert_eq!(params.get("reduceOnly"), Some("false"));
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let params = RequestParams::new().with("note", "a b&c=d");
        assert_eq!(params.encode(), "note=a+b%26c%3Dd");
    }

    #[test]
    fn test_empty_params_encode_to_empty_string() {
        assert_eq!(RequestParams::new().encode(), "");
        assert!(RequestParams::new().is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let params: RequestParams = [("symbol", "BTCUSDT"), ("side", "BUY")]
            .into_iter()
            .collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("side"), Some("BUY"));
    }
}
