//! Salsa20 and XSalsa20 keystream generation in counter mode.
//!
//! The 16-byte core input is the 8-byte nonce followed by a 64-bit
//! little-endian block counter starting at zero. Encryption and decryption are
//! the same operation. The `_at` variants start at an absolute keystream byte
//! offset, which is how the box layer skips the 32 bytes it reserves for the
//! Poly1305 key without materialising any padding.

use zeroize::Zeroize;

use super::salsa20::{BLOCK_LEN, SIGMA, hsalsa20, salsa20_core};

/// Length of a raw Salsa20 nonce in bytes.
pub const NONCE_LEN: usize = 8;
/// Length of an XSalsa20 nonce in bytes.
pub const XNONCE_LEN: usize = 24;

/// Increment the little-endian counter held in bytes 8..16 of a core input block.
#[inline]
pub(crate) fn increment_counter(input: &mut [u8; 16]) {
    let mut carry = 1u32;
    for byte in &mut input[8..] {
        carry += u32::from(*byte);
        *byte = carry as u8;
        carry >>= 8;
    }
}

pub(crate) fn split_xnonce(nonce: &[u8; XNONCE_LEN]) -> ([u8; 16], [u8; NONCE_LEN]) {
    let mut prefix = [0u8; 16];
    let mut suffix = [0u8; NONCE_LEN];
    prefix.copy_from_slice(&nonce[..16]);
    suffix.copy_from_slice(&nonce[16..]);
    (prefix, suffix)
}

/// XOR the keystream starting at byte `offset` into `data`, using `core` for each block.
pub(crate) fn apply_salsa20<F>(
    core: F,
    data: &mut [u8],
    offset: u64,
    nonce: &[u8; NONCE_LEN],
    key: &[u8; 32],
) where
    F: Fn(&[u8; 16], &[u8; 32], &[u8; 16]) -> [u8; 64],
{
    if data.is_empty() {
        return;
    }

    let mut input = [0u8; 16];
    input[..NONCE_LEN].copy_from_slice(nonce);
    input[NONCE_LEN..].copy_from_slice(&(offset / BLOCK_LEN as u64).to_le_bytes());

    let mut skip = (offset % BLOCK_LEN as u64) as usize;
    let mut position = 0;
    while position < data.len() {
        let mut block = core(&input, key, &SIGMA);
        let take = (BLOCK_LEN - skip).min(data.len() - position);
        for (dst, src) in data[position..position + take]
            .iter_mut()
            .zip(block[skip..].iter())
        {
            *dst ^= src;
        }
        block.zeroize();

        increment_counter(&mut input);
        position += take;
        skip = 0;
    }
}

/// XSalsa20 on top of caller-chosen core and HSalsa20 implementations.
pub(crate) fn apply_xsalsa20<F, H>(
    core: F,
    hsalsa: H,
    data: &mut [u8],
    offset: u64,
    nonce: &[u8; XNONCE_LEN],
    key: &[u8; 32],
) where
    F: Fn(&[u8; 16], &[u8; 32], &[u8; 16]) -> [u8; 64],
    H: Fn(&[u8; 16], &[u8; 32], &[u8; 16]) -> [u8; 32],
{
    if data.is_empty() {
        return;
    }
    let (prefix, suffix) = split_xnonce(nonce);
    let mut subkey = hsalsa(&prefix, key, &SIGMA);
    apply_salsa20(core, data, offset, &suffix, &subkey);
    subkey.zeroize();
}

/// Fill `out` with raw Salsa20 keystream.
pub fn salsa20_keystream(out: &mut [u8], nonce: &[u8; NONCE_LEN], key: &[u8; 32]) {
    out.fill(0);
    salsa20_xor(out, nonce, key);
}

/// Encrypt or decrypt `data` in place with Salsa20.
pub fn salsa20_xor(data: &mut [u8], nonce: &[u8; NONCE_LEN], key: &[u8; 32]) {
    apply_salsa20(salsa20_core, data, 0, nonce, key);
}

/// Like [`salsa20_xor`], but `data[0]` is combined with keystream byte `offset`.
pub fn salsa20_xor_at(data: &mut [u8], offset: u64, nonce: &[u8; NONCE_LEN], key: &[u8; 32]) {
    apply_salsa20(salsa20_core, data, offset, nonce, key);
}

/// Fill `out` with raw XSalsa20 keystream.
pub fn xsalsa20_keystream(out: &mut [u8], nonce: &[u8; XNONCE_LEN], key: &[u8; 32]) {
    out.fill(0);
    xsalsa20_xor(out, nonce, key);
}

/// Encrypt or decrypt `data` in place with XSalsa20.
pub fn xsalsa20_xor(data: &mut [u8], nonce: &[u8; XNONCE_LEN], key: &[u8; 32]) {
    apply_xsalsa20(salsa20_core, hsalsa20, data, 0, nonce, key);
}

/// Like [`xsalsa20_xor`], but `data[0]` is combined with keystream byte `offset`.
pub fn xsalsa20_xor_at(data: &mut [u8], offset: u64, nonce: &[u8; XNONCE_LEN], key: &[u8; 32]) {
    apply_xsalsa20(salsa20_core, hsalsa20, data, offset, nonce, key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn sequential<const N: usize>(start: u8) -> [u8; N] {
        let mut out = [0u8; N];
        for (idx, byte) in out.iter_mut().enumerate() {
            *byte = start.wrapping_add(idx as u8);
        }
        out
    }

    #[test]
    fn salsa20_keystream_spans_two_blocks() {
        let key: [u8; 32] = sequential(0);
        let nonce: [u8; 8] = sequential(100);
        let mut out = [0u8; 80];
        salsa20_keystream(&mut out, &nonce, &key);
        let expected = "
            dac41fef88bcf58c96656f911f208f70
            fc63e045cdcd6d30eb76fdbc24be6930
            5c8f6ec704d87dd6af859d5753768f9c
            4e274b2312fb7b5a3eb3706e027549bc
            861039863cd6d2692b720d0b967d4dcb";
        assert_eq!(hex(&out), expected.split_whitespace().collect::<String>());
    }

    #[test]
    fn xsalsa20_keystream_known_answer() {
        let key: [u8; 32] = sequential(0);
        let nonce: [u8; 24] = sequential(0);
        let mut out = [0u8; 70];
        xsalsa20_keystream(&mut out, &nonce, &key);
        let expected = "
            7cb660afdd9ec6468f57dd6d2433f934
            28fd82cd7386c5471a24d8ad2a525b6e
            5eff384fc7caa210bb3c8f3e688f4a97
            52a546df8c253fef17a2679455c7a1e1
            83dbf5d545b0";
        assert_eq!(hex(&out), expected.split_whitespace().collect::<String>());
    }

    #[test]
    fn first_block_is_core_output() {
        let key: [u8; 32] = sequential(11);
        let nonce: [u8; 8] = sequential(42);
        let mut out = [0u8; 64];
        salsa20_keystream(&mut out, &nonce, &key);

        let mut input = [0u8; 16];
        input[..8].copy_from_slice(&nonce);
        assert_eq!(out, salsa20_core(&input, &key, &SIGMA));
    }

    #[test]
    fn xor_twice_restores_message() {
        let key: [u8; 32] = sequential(5);
        let nonce: [u8; 24] = sequential(77);
        let message: Vec<u8> = (0..300u32).map(|i| (i * 7) as u8).collect();
        let mut data = message.clone();
        xsalsa20_xor(&mut data, &nonce, &key);
        assert_ne!(data, message);
        xsalsa20_xor(&mut data, &nonce, &key);
        assert_eq!(data, message);
    }

    #[test]
    fn zero_length_is_noop() {
        let mut empty: [u8; 0] = [];
        salsa20_xor(&mut empty, &[0u8; 8], &[0u8; 32]);
        xsalsa20_xor_at(&mut empty, 17, &[0u8; 24], &[0u8; 32]);
    }

    #[test]
    fn offset_matches_slice_of_full_stream() {
        let key: [u8; 32] = sequential(1);
        let nonce: [u8; 24] = sequential(9);
        let mut full = [0u8; 256];
        xsalsa20_keystream(&mut full, &nonce, &key);

        for offset in [0usize, 1, 31, 32, 63, 64, 65, 100, 128, 191] {
            let mut part = vec![0u8; 256 - offset];
            xsalsa20_xor_at(&mut part, offset as u64, &nonce, &key);
            assert_eq!(part.as_slice(), &full[offset..], "offset {offset}");
        }
    }

    #[test]
    fn split_apply_equals_single_pass() {
        let key: [u8; 32] = sequential(21);
        let nonce: [u8; 8] = sequential(3);
        let message: Vec<u8> = (0..150u8).collect();

        let mut whole = message.clone();
        salsa20_xor(&mut whole, &nonce, &key);

        let mut pieces = message.clone();
        let (head, tail) = pieces.split_at_mut(32);
        salsa20_xor_at(head, 0, &nonce, &key);
        salsa20_xor_at(tail, 32, &nonce, &key);
        assert_eq!(pieces, whole);
    }

    #[test]
    fn counter_increment_carries_across_bytes() {
        let mut input = [0u8; 16];
        input[8..].copy_from_slice(&0x00ff_ffff_ffff_ffffu64.to_le_bytes());
        increment_counter(&mut input);
        assert_eq!(&input[8..], &0x0100_0000_0000_0000u64.to_le_bytes());

        input[8..].copy_from_slice(&[0xff; 8]);
        increment_counter(&mut input);
        assert_eq!(&input[8..], &[0u8; 8], "counter wraps to zero");
        assert_eq!(&input[..8], &[0u8; 8], "nonce bytes untouched");
    }

    #[test]
    fn counter_increment_matches_u64_addition() {
        for start in [0u64, 1, 255, 256, 0xffff, 0x1234_5678_9abc_def0] {
            let mut input = [0xaau8; 16];
            input[8..].copy_from_slice(&start.to_le_bytes());
            increment_counter(&mut input);
            assert_eq!(&input[8..], &(start + 1).to_le_bytes());
        }
    }

    #[test]
    fn second_block_uses_counter_one() {
        let key: [u8; 32] = sequential(60);
        let nonce: [u8; 8] = sequential(61);
        let mut out = [0u8; 128];
        salsa20_keystream(&mut out, &nonce, &key);

        let mut input = [0u8; 16];
        input[..8].copy_from_slice(&nonce);
        input[8] = 1;
        assert_eq!(&out[64..], &salsa20_core(&input, &key, &SIGMA)[..]);
    }
}
