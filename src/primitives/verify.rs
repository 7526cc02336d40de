//! Fixed-time comparison of fixed-length buffers.
//!
//! Every byte is visited and folded into a single accumulator; the result is
//! derived arithmetically from that accumulator, so neither the position nor
//! the presence of a difference changes the instruction stream.

/// Compare two arrays of the same fixed length without early exit.
#[must_use]
pub fn ct_eq<const N: usize>(a: &[u8; N], b: &[u8; N]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    // (diff - 1) >> 8 has its low bit set only when diff == 0.
    let is_equal = 1 & (u32::from(diff).wrapping_sub(1) >> 8);
    core::hint::black_box(is_equal) == 1
}

/// Compare two 16-byte buffers (Poly1305 tags) in constant time.
#[must_use]
pub fn verify_16(a: &[u8; 16], b: &[u8; 16]) -> bool {
    ct_eq(a, b)
}

/// Compare two 32-byte buffers (keys) in constant time.
#[must_use]
pub fn verify_32(a: &[u8; 32], b: &[u8; 32]) -> bool {
    ct_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_buffers() {
        assert!(verify_16(&[0x5a; 16], &[0x5a; 16]));
        assert!(verify_32(&[0u8; 32], &[0u8; 32]));
        assert!(ct_eq::<0>(&[], &[]));
    }

    #[test]
    fn single_byte_difference_at_every_position() {
        let base = [0x33u8; 32];
        for position in 0..32 {
            for flip in [0x01u8, 0x80, 0xff] {
                let mut other = base;
                other[position] ^= flip;
                assert!(!verify_32(&base, &other), "position {position} flip {flip:#x}");
            }
        }

        let tag = [0xc3u8; 16];
        for position in 0..16 {
            let mut other = tag;
            other[position] = other[position].wrapping_add(1);
            assert!(!verify_16(&tag, &other), "position {position}");
        }
    }

    #[test]
    fn all_bytes_different() {
        assert!(!verify_16(&[0u8; 16], &[0xff; 16]));
    }
}
