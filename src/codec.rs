//! Base64 decoding for embedded data URIs
//!
//! Two interchangeable implementations sit behind [`decode_base64`]: the
//! `base64` crate engine and a table-free scalar decoder. The caller picks
//! one per decode through [`CodecPolicy`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{GltfError, Result};
use crate::options::CodecPolicy;

/// Decode a standard-alphabet base64 payload with the selected implementation.
pub fn decode_base64(input: &str, policy: CodecPolicy) -> Result<Vec<u8>> {
    match policy {
        CodecPolicy::Accelerated => STANDARD
            .decode(input)
            .map_err(|e| GltfError::InvalidDocument(format!("base64 decode failed: {e}"))),
        CodecPolicy::Scalar => decode_scalar(input),
    }
}

/// Scalar fallback decoder for the standard base64 alphabet.
///
/// Enforces the same canonical form as the accelerated engine: the payload
/// length must be a multiple of four including trailing `=` padding, and any
/// leftover bits in the final quantum must be zero.
fn decode_scalar(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() % 4 != 0 {
        return Err(GltfError::InvalidDocument(
            "base64 payload length is not a multiple of four".into(),
        ));
    }

    let padding = bytes.iter().rev().take_while(|&&b| b == b'=').count();
    if padding > 2 {
        return Err(GltfError::InvalidDocument(
            "base64 payload has more than two padding characters".into(),
        ));
    }
    let data = &bytes[..bytes.len() - padding];

    let mut out = Vec::with_capacity(data.len() / 4 * 3 + 2);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for &b in data {
        let value = match b {
            b'A'..=b'Z' => b - b'A',
            b'a'..=b'z' => b - b'a' + 26,
            b'0'..=b'9' => b - b'0' + 52,
            b'+' => 62,
            b'/' => 63,
            b'=' => {
                return Err(GltfError::InvalidDocument(
                    "base64 padding in the middle of the payload".into(),
                ))
            }
            _ => {
                return Err(GltfError::InvalidDocument(format!(
                    "invalid base64 character 0x{b:02x}"
                )))
            }
        };

        acc = (acc << 6) | u32::from(value);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
        }
    }

    // A canonical final quantum leaves only zero bits behind.
    if bits > 0 && acc & ((1 << bits) - 1) != 0 {
        return Err(GltfError::InvalidDocument(
            "base64 payload has non-zero trailing bits".into(),
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_payload() {
        for policy in [CodecPolicy::Accelerated, CodecPolicy::Scalar] {
            let decoded = decode_base64("QQ==", policy).unwrap();
            assert_eq!(decoded, vec![0x41], "policy {policy:?}");
        }
    }

    #[test]
    fn test_policies_agree() {
        let payloads = ["", "QQ==", "QUI=", "QUJD", "aGVsbG8gd29ybGQ="];
        for payload in payloads {
            let fast = decode_base64(payload, CodecPolicy::Accelerated).unwrap();
            let slow = decode_base64(payload, CodecPolicy::Scalar).unwrap();
            assert_eq!(fast, slow, "payload {payload:?}");
        }
    }

    #[test]
    fn test_policies_agree_on_malformed_payloads() {
        // Unpadded, short-padded, and non-canonical payloads must fail
        // under both implementations.
        let payloads = ["QQ", "QQ=", "QR==", "QUI", "Q=QQ"];
        for payload in payloads {
            let fast = decode_base64(payload, CodecPolicy::Accelerated);
            let slow = decode_base64(payload, CodecPolicy::Scalar);
            assert!(fast.is_err(), "accelerated accepted {payload:?}");
            assert!(slow.is_err(), "scalar accepted {payload:?}");
        }
    }

    #[test]
    fn test_scalar_rejects_invalid_character() {
        let result = decode_base64("QQ!=", CodecPolicy::Scalar);
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_rejects_interior_padding() {
        let result = decode_base64("Q=QQ", CodecPolicy::Scalar);
        assert!(result.is_err());
    }
}
