//! Payment confirmation signature verification.
//!
//! After the hosted checkout completes, the payment gateway hands the client
//! an `(order_id, payment_id, signature)` triple where the signature is
//! `HMAC-SHA256(key_secret, order_id + "|" + payment_id)` hex-encoded. The
//! backend recomputes it and compares in constant time. This check is the
//! only proof that the payment happened, so the gateway-supplied fields must
//! be fed into the MAC byte-for-byte, without any transformation.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected confirmation signature for an order/payment pair.
///
/// Returns the hex-encoded HMAC-SHA256 of `"{order_id}|{payment_id}"` keyed
/// with the gateway key secret.
pub fn payment_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}

/// Verify a gateway-supplied confirmation signature.
///
/// Recomputes the expected signature and compares it to `signature` in
/// constant time so a forged value reveals nothing about the expected one.
pub fn verify_payment_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let expected = payment_signature(key_secret, order_id, payment_id);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// Encode bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Byte-wise comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
