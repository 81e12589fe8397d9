//! # Polar Webhook Verification
//!
//! Polar signs webhooks with the Standard Webhooks scheme:
//!
//! - headers `webhook-id`, `webhook-timestamp`, `webhook-signature`
//! - signed content `{id}.{timestamp}.{body}`, HMAC-SHA256, base64
//! - signature header is a space-separated list of `v1,<signature>` entries
//!
//! Signing and verification are done by the `standardwebhooks` crate.
//! Polar hands out a raw secret; the scheme expects a base64 one, so the
//! raw secret is base64-encoded before it is handed over.

use base64::{engine::general_purpose::STANDARD, Engine};
use http::HeaderMap;
use shop_core::ShopError;
use thiserror::Error;
use tracing::debug;

pub use standardwebhooks::{HEADER_WEBHOOK_ID, HEADER_WEBHOOK_SIGNATURE, HEADER_WEBHOOK_TIMESTAMP};

const SECRET_PREFIX: &str = "whsec_";

/// Reasons a webhook fails verification
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid webhook secret: {0}")]
    InvalidSecret(String),

    #[error(transparent)]
    Rejected(#[from] standardwebhooks::WebhookError),
}

impl From<WebhookError> for ShopError {
    fn from(err: WebhookError) -> Self {
        ShopError::WebhookVerificationFailed(err.to_string())
    }
}

/// Standard Webhooks verifier
pub struct Webhook {
    inner: standardwebhooks::Webhook,
}

impl Webhook {
    /// Create a verifier from a base64 secret, optionally prefixed with `whsec_`.
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        if secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret).is_empty() {
            return Err(WebhookError::InvalidSecret("secret is empty".to_string()));
        }

        let inner = standardwebhooks::Webhook::new(secret)
            .map_err(|e| WebhookError::InvalidSecret(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Create a verifier from the raw secret shown in the Polar dashboard
    pub fn from_raw_secret(raw: &str) -> Result<Self, WebhookError> {
        Self::new(&STANDARD.encode(raw.as_bytes()))
    }

    /// Sign a payload, producing a `v1,<signature>` header entry
    pub fn sign(
        &self,
        msg_id: &str,
        timestamp: i64,
        payload: &[u8],
    ) -> Result<String, WebhookError> {
        Ok(self.inner.sign(msg_id, timestamp, payload)?)
    }

    /// Verify a delivery against its headers and the current time.
    ///
    /// Timestamps more than five minutes away from now are rejected.
    pub fn verify(&self, payload: &[u8], headers: &HeaderMap) -> Result<(), WebhookError> {
        self.inner.verify(payload, headers)?;

        debug!(
            "Verified webhook: id={}",
            headers
                .get(HEADER_WEBHOOK_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
        );
        Ok(())
    }
}

impl std::fmt::Debug for Webhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webhook").field("key", &"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use http::HeaderValue;
    use uuid::Uuid;

    const BODY: &[u8] = br#"{"type":"order.paid","data":{"id":"ord_1"}}"#;

    fn msg_id() -> String {
        format!("msg_{}", Uuid::new_v4().simple())
    }

    fn headers(id: &str, timestamp: i64, signature: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(HEADER_WEBHOOK_ID, HeaderValue::from_str(id).unwrap());
        map.insert(
            HEADER_WEBHOOK_TIMESTAMP,
            HeaderValue::from_str(&timestamp.to_string()).unwrap(),
        );
        map.insert(
            HEADER_WEBHOOK_SIGNATURE,
            HeaderValue::from_str(signature).unwrap(),
        );
        map
    }

    fn rejected(result: Result<(), WebhookError>) -> standardwebhooks::WebhookError {
        match result {
            Err(WebhookError::Rejected(e)) => e,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_vector() {
        let wh = Webhook::new("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw").unwrap();

        let sig = wh
            .sign("msg_p5jXN8AQM9LWM0D4loKWxJek", 1614265330, br#"{"test": 2432232314}"#)
            .unwrap();
        assert_eq!(sig, "v1,g0hM9SsE+OTPJTGt/tmIKtSyZlE3uFJELVlNIOLJ1OE=");
    }

    #[test]
    fn test_sign_and_verify() {
        let wh = Webhook::from_raw_secret("polar_whs_test").unwrap();
        let id = msg_id();
        let ts = Utc::now().timestamp();
        let sig = wh.sign(&id, ts, BODY).unwrap();
        assert!(sig.starts_with("v1,"));

        let headers = headers(&id, ts, &sig);
        assert!(wh.verify(BODY, &headers).is_ok());
        // Same inputs, same outcome
        assert!(wh.verify(BODY, &headers).is_ok());
    }

    #[test]
    fn test_raw_secret_is_base64_encoded_first() {
        let raw = Webhook::from_raw_secret("polar_whs_test").unwrap();
        let encoded = Webhook::new(&STANDARD.encode("polar_whs_test")).unwrap();
        let prefixed = Webhook::new(&format!("whsec_{}", STANDARD.encode("polar_whs_test"))).unwrap();

        let sig = raw.sign("msg_1", 1_700_000_000, BODY).unwrap();
        assert_eq!(sig, encoded.sign("msg_1", 1_700_000_000, BODY).unwrap());
        assert_eq!(sig, prefixed.sign("msg_1", 1_700_000_000, BODY).unwrap());
    }

    #[test]
    fn test_tampered_headers_fail() {
        let wh = Webhook::from_raw_secret("polar_whs_test").unwrap();
        let id = msg_id();
        let ts = Utc::now().timestamp();
        let sig = wh.sign(&id, ts, BODY).unwrap();

        let cases = [
            headers("msg_other", ts, &sig),
            headers(&id, ts - 1, &sig),
            headers(&id, ts, "v1,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="),
        ];

        for headers in cases {
            assert!(matches!(
                rejected(wh.verify(BODY, &headers)),
                standardwebhooks::WebhookError::InvalidSignature
            ));
        }
    }

    #[test]
    fn test_tampered_body_fails() {
        let wh = Webhook::from_raw_secret("polar_whs_test").unwrap();
        let ts = Utc::now().timestamp();
        let sig = wh.sign("msg_1", ts, BODY).unwrap();

        assert!(wh.verify(b"{}", &headers("msg_1", ts, &sig)).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let signer = Webhook::from_raw_secret("secret-one").unwrap();
        let verifier = Webhook::from_raw_secret("secret-two").unwrap();
        let ts = Utc::now().timestamp();
        let sig = signer.sign("msg_1", ts, BODY).unwrap();

        assert!(matches!(
            rejected(verifier.verify(BODY, &headers("msg_1", ts, &sig))),
            standardwebhooks::WebhookError::InvalidSignature
        ));
    }

    #[test]
    fn test_any_v1_entry_may_match() {
        let wh = Webhook::from_raw_secret("polar_whs_test").unwrap();
        let ts = Utc::now().timestamp();
        let good = wh.sign("msg_1", ts, BODY).unwrap();
        let good_value = good.trim_start_matches("v1,");
        let header = format!("v1,bm90LWEtc2lnbmF0dXJl v2,{} {}", good_value, good);

        assert!(wh.verify(BODY, &headers("msg_1", ts, &header)).is_ok());

        // A valid signature under an unknown version does not count
        let header = format!("v2,{}", good_value);
        assert!(wh.verify(BODY, &headers("msg_1", ts, &header)).is_err());
    }

    #[test]
    fn test_timestamp_tolerance() {
        let wh = Webhook::from_raw_secret("polar_whs_test").unwrap();
        let now = Utc::now().timestamp();

        let old = now - 5 * 60 - 60;
        let sig = wh.sign("msg_1", old, BODY).unwrap();
        assert!(matches!(
            rejected(wh.verify(BODY, &headers("msg_1", old, &sig))),
            standardwebhooks::WebhookError::TimestampTooOldError
        ));

        let future = now + 5 * 60 + 60;
        let sig = wh.sign("msg_1", future, BODY).unwrap();
        assert!(matches!(
            rejected(wh.verify(BODY, &headers("msg_1", future, &sig))),
            standardwebhooks::WebhookError::FutureTimestampError
        ));

        let recent = now - 60;
        let sig = wh.sign("msg_1", recent, BODY).unwrap();
        assert!(wh.verify(BODY, &headers("msg_1", recent, &sig)).is_ok());
    }

    #[test]
    fn test_missing_and_malformed_headers() {
        let wh = Webhook::from_raw_secret("polar_whs_test").unwrap();

        let mut map = headers("msg_1", 1, "v1,x");
        map.remove(HEADER_WEBHOOK_ID);
        assert!(matches!(
            rejected(wh.verify(BODY, &map)),
            standardwebhooks::WebhookError::MissingHeader(_)
        ));

        let mut map = headers("msg_1", 1, "v1,x");
        map.insert(HEADER_WEBHOOK_TIMESTAMP, HeaderValue::from_static("yesterday"));
        assert!(matches!(
            rejected(wh.verify(BODY, &map)),
            standardwebhooks::WebhookError::InvalidTimestamp
        ));
    }

    #[test]
    fn test_malformed_secret() {
        assert!(matches!(
            Webhook::new("whsec_***not base64***"),
            Err(WebhookError::InvalidSecret(_))
        ));
        assert!(matches!(
            Webhook::from_raw_secret(""),
            Err(WebhookError::InvalidSecret(_))
        ));
    }

    #[test]
    fn test_error_converts_to_forbidden() {
        let err: ShopError =
            WebhookError::Rejected(standardwebhooks::WebhookError::InvalidSignature).into();
        assert_eq!(err.status_code(), 403);
    }
}
