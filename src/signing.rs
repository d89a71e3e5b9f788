use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the payload signature on outbound deliveries.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Algorithm tag prefixed to the hex digest, `sha256=<hex>`.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the signature sent alongside a webhook delivery.
///
/// The digest is an HMAC-SHA256 keyed by the route's shared secret over the
/// exact serialized request body bytes, hex-encoded and prefixed with the
/// algorithm tag.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes()))
}

/// Verify a received `sha256=<hex>` signature against the raw body bytes.
///
/// Receiver-side counterpart to [`compute_signature`], for consumers that
/// want to authenticate deliveries from this service.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Some(digest_hex) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let Ok(digest) = hex::decode(digest_hex) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    mac.verify_slice(&digest).is_ok()
}
