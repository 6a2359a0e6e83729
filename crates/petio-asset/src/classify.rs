//! # Byte Classification
//!
//! Decides whether fetched bytes are the final plaintext or ciphertext
//! that still needs decryption.
//!
//! The pointer's `scheme` tag is the primary signal. Magic-byte sniffing
//! — the only classification signal records had before the scheme field
//! existed — survives solely inside this module, where it validates a
//! plaintext claim; it never overrides the scheme tag.

use petio_core::EncryptionScheme;

/// PNG file signature — the one plaintext format signature pads produce.
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// What the fetched bytes turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Final bytes; no decryption needed.
    Plaintext,
    /// Ciphertext; key material is required.
    Encrypted,
    /// The pointer claims plaintext but the bytes carry no recognizable
    /// format signature.
    Unrecognized,
}

/// Classify fetched bytes using the pointer's scheme tag.
pub fn classify(scheme: EncryptionScheme, bytes: &[u8]) -> Classification {
    match scheme {
        EncryptionScheme::Aes256Gcm => Classification::Encrypted,
        EncryptionScheme::None => legacy_sniff(bytes),
    }
}

/// Magic-byte sniff retained for records that predate the scheme tag:
/// a recognizable format signature means plaintext, anything else is
/// unrecognized rather than assumed encrypted.
fn legacy_sniff(bytes: &[u8]) -> Classification {
    if is_png(bytes) {
        Classification::Plaintext
    } else {
        Classification::Unrecognized
    }
}

fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_SIGNATURE.len() && bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}
