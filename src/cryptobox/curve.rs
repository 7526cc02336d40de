//! Curve25519 scalar multiplication, delegated to `x25519-dalek`.

use x25519_dalek::{PublicKey as MontgomeryPublic, StaticSecret};

/// `scalar · point`, with the scalar clamped per RFC 7748.
///
/// Low-order points yield the all-zero output rather than an error, matching
/// NaCl's `crypto_scalarmult`.
#[must_use]
pub fn scalarmult(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    let secret = StaticSecret::from(*scalar);
    secret
        .diffie_hellman(&MontgomeryPublic::from(*point))
        .to_bytes()
}

/// `scalar · basepoint`.
#[must_use]
pub fn scalarmult_base(scalar: &[u8; 32]) -> [u8; 32] {
    let secret = StaticSecret::from(*scalar);
    MontgomeryPublic::from(&secret).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_SK: [u8; 32] = [
        0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d, 0x3c, 0x16, 0xc1, 0x72, 0x51, 0xb2, 0x66,
        0x45, 0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a, 0xb1, 0x77, 0xfb, 0xa5, 0x1d, 0xb9,
        0x2c, 0x2a,
    ];
    const ALICE_PK: [u8; 32] = [
        0x85, 0x20, 0xf0, 0x09, 0x89, 0x30, 0xa7, 0x54, 0x74, 0x8b, 0x7d, 0xdc, 0xb4, 0x3e, 0xf7,
        0x5a, 0x0d, 0xbf, 0x3a, 0x0d, 0x26, 0x38, 0x1a, 0xf4, 0xeb, 0xa4, 0xa9, 0x8e, 0xaa, 0x9b,
        0x4e, 0x6a,
    ];
    const BOB_PK: [u8; 32] = [
        0xde, 0x9e, 0xdb, 0x7d, 0x7b, 0x7d, 0xc1, 0xb4, 0xd3, 0x5b, 0x61, 0xc2, 0xec, 0xe4, 0x35,
        0x37, 0x3f, 0x83, 0x43, 0xc8, 0x5b, 0x78, 0x67, 0x4d, 0xad, 0xfc, 0x7e, 0x14, 0x6f, 0x88,
        0x2b, 0x4f,
    ];
    const SHARED: [u8; 32] = [
        0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1, 0x72, 0x8e, 0x3b, 0xf4, 0x80, 0x35, 0x0f,
        0x25, 0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33, 0x76, 0xf0, 0x9b, 0x3c, 0x1e, 0x16,
        0x17, 0x42,
    ];

    #[test]
    fn base_multiplication_matches_rfc7748() {
        assert_eq!(scalarmult_base(&ALICE_SK), ALICE_PK);
    }

    #[test]
    fn shared_point_matches_rfc7748() {
        assert_eq!(scalarmult(&ALICE_SK, &BOB_PK), SHARED);
    }

    #[test]
    fn base_agrees_with_explicit_basepoint() {
        let scalar = [0x31u8; 32];
        assert_eq!(
            scalarmult(&scalar, &x25519_dalek::X25519_BASEPOINT_BYTES),
            scalarmult_base(&scalar)
        );
    }

    #[test]
    fn low_order_point_gives_zero() {
        assert_eq!(scalarmult(&ALICE_SK, &[0u8; 32]), [0u8; 32]);
    }
}
