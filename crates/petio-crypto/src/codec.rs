//! # Content Identifier Codec
//!
//! Conversions between the object store's external identifier — an
//! unpadded base64url string — and the fixed 32-byte binary form the
//! contract records ([`ContentId`]).
//!
//! Both directions are total, pure, and deterministic; no I/O. For every
//! 32-byte array `b`, `decode(encode(b)) == b`, and for every
//! syntactically valid external identifier `x`, `encode(decode(x)) == x`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use petio_core::ContentId;

use crate::error::CryptoError;

/// Decode an external identifier string into its 32-byte binary form.
///
/// Fails with [`CryptoError::Format`] when the string is not valid
/// unpadded base64url or decodes to a length other than 32 bytes.
pub fn decode_content_id(id: &str) -> Result<ContentId, CryptoError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(id)
        .map_err(|e| CryptoError::Format(format!("invalid base64url {id:?}: {e}")))?;
    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        CryptoError::Format(format!(
            "identifier {id:?} decoded to {} bytes, expected 32",
            v.len()
        ))
    })?;
    Ok(ContentId::from_bytes(arr))
}

/// Encode a 32-byte content identifier into its external string form.
pub fn encode_content_id(id: &ContentId) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}
