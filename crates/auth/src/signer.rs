//! HMAC-SHA256 request signing for the futures API.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::credentials::ApiCredentials;
use crate::params::{RequestParams, SignedRequest};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default server-side staleness tolerance in milliseconds.
pub const DEFAULT_RECV_WINDOW: u64 = 5000;

/// Milliseconds since the Unix epoch, from the local wall clock.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Request signer for authenticated API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
    recv_window: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials and receive window.
    pub fn new(credentials: &'a ApiCredentials, recv_window: u64) -> Self {
        Self {
            credentials,
            recv_window,
        }
    }

    /// Sign a message and return the hex-encoded signature.
    ///
    /// This computes HMAC-SHA256 of the message using the secret key
    /// and returns the result as a lowercase hex string.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        let result = mac.finalize();
        hex::encode(result.into_bytes())
    }

    /// Sign `params` with the current wall-clock time.
    ///
    /// The timestamp is read once, immediately before encoding.
    pub fn sign_params(&self, params: &RequestParams) -> SignedRequest {
        self.sign_params_at(params, current_timestamp_ms())
    }

    /// Sign `params` as of `timestamp_ms`.
    ///
    /// The caller's parameters are left untouched. The signed copy is the
    /// original pairs in insertion order, then `timestamp`, then `recvWindow`;
    /// the signature covers the form-url-encoded form of exactly that sequence.
    pub fn sign_params_at(&self, params: &RequestParams, timestamp_ms: u64) -> SignedRequest {
        let mut signed = params.clone();
        signed.push("timestamp", timestamp_ms);
        signed.push("recvWindow", self.recv_window);

        let payload = signed.encode();
        let signature = self.sign(&payload);

        SignedRequest::new(signed, timestamp_ms, self.recv_window, payload, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> ApiCredentials {
        ApiCredentials::new("key".into(), "secret".into())
    }

    #[test]
    fn test_sign_known_vector() {
        // Test vector from the exchange's signed-endpoint documentation.
        let creds = ApiCredentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A".into(),
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j".into(),
        );

        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);

        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        let signature = signer.sign(query);

        assert_eq!(
            signature,
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_sign_params_matches_manual_signature() {
        let creds = ApiCredentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A".into(),
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j".into(),
        );
        let signer = RequestSigner::new(&creds, 5000);

        let params = RequestParams::new()
            .with("symbol", "LTCBTC")
            .with("side", "BUY")
            .with("type", "LIMIT")
            .with("timeInForce", "GTC")
            .with("quantity", 1)
            .with("price", "0.1");

        let signed = signer.sign_params_at(&params, 1499827319559);

        assert_eq!(
            signed.payload(),
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&timestamp=1499827319559&recvWindow=5000"
        );
        assert_eq!(signed.signature(), signer.sign(signed.payload()));
    }

    #[test]
    fn test_sign_params_appends_timestamp_then_recv_window() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, 7000);

        let params = RequestParams::new().with("zebra", 1).with("alpha", 2);
        let signed = signer.sign_params_at(&params, 1000);

        assert_eq!(
            signed.payload(),
            "zebra=1&alpha=2&timestamp=1000&recvWindow=7000"
        );
        assert!(signed
            .query_string()
            .starts_with("zebra=1&alpha=2&timestamp=1000&recvWindow=7000&signature="));
        assert_eq!(signed.timestamp_ms(), 1000);
        assert_eq!(signed.recv_window(), 7000);
    }

    #[test]
    fn test_sign_params_does_not_mutate_input() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);

        let params = RequestParams::new().with("symbol", "BTCUSDT");
        let before = params.clone();
        let _ = signer.sign_params_at(&params, 1000);

        assert_eq!(params, before);
        assert!(params.get("timestamp").is_none());
        assert!(params.get("signature").is_none());
    }

    #[test]
    fn test_sign_params_reproducible_at_fixed_time() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);
        let params = RequestParams::new().with("symbol", "BTCUSDT").with("side", "BUY");

        let a = signer.sign_params_at(&params, 1_700_000_000_000);
        let b = signer.sign_params_at(&params, 1_700_000_000_000);

        assert_eq!(a, b);
    }

    #[test]
    fn test_single_character_change_changes_signature() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);

        let a = signer.sign_params_at(&RequestParams::new().with("symbol", "BTCUSDT"), 1000);
        let b = signer.sign_params_at(&RequestParams::new().with("symbol", "BTCUSDU"), 1000);
        let c = signer.sign_params_at(&RequestParams::new().with("symbol", "BTCUSDT"), 1001);

        assert_ne!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());
    }

    #[test]
    fn test_different_secrets_differ() {
        let creds_a = ApiCredentials::new("key".into(), "secret_a".into());
        let creds_b = ApiCredentials::new("key".into(), "secret_b".into());
        let params = RequestParams::new().with("symbol", "BTCUSDT");

        let a = RequestSigner::new(&creds_a, DEFAULT_RECV_WINDOW).sign_params_at(&params, 1000);
        let b = RequestSigner::new(&creds_b, DEFAULT_RECV_WINDOW).sign_params_at(&params, 1000);

        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);
        let sig = signer.sign("data");

        assert_eq!(sig.len(), 64);
        assert!(sig
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn test_sign_empty_params() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);

        let signed = signer.sign_params_at(&RequestParams::new(), 42);
        assert_eq!(signed.payload(), "timestamp=42&recvWindow=5000");
    }

    #[test]
    fn test_sign_params_uses_current_time() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, DEFAULT_RECV_WINDOW);

        let before = current_timestamp_ms();
        let signed = signer.sign_params(&RequestParams::new());
        let after = current_timestamp_ms();

        assert!(signed.timestamp_ms() >= before && signed.timestamp_ms() <= after);
    }
}
