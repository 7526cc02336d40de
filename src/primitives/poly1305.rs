//! Poly1305 one-time authenticator.
//!
//! The accumulator is 17 limbs of 8 bits each, held in `u32`s so that every
//! partial product of the schoolbook multiplication fits without overflow.
//! Reduction uses 2^130 = 5 (mod 2^130 - 5): limbs that wrap past limb 16 are
//! folded back multiplied by 320 (5 << 6, the 2-bit offset of limb 16).

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::verify::verify_16;

/// Length of a Poly1305 one-time key in bytes.
pub const KEY_LEN: usize = 32;
/// Length of a Poly1305 tag in bytes.
pub const TAG_LEN: usize = 16;

const BLOCK_LEN: usize = 16;
const LIMBS: usize = 17;

/// -p = -(2^130 - 5) as limbs modulo 2^136.
const MINUS_P: [u32; LIMBS] = [5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 252];

fn add_limbs(h: &mut [u32; LIMBS], c: &[u32; LIMBS]) {
    let mut carry = 0u32;
    for (limb, addend) in h.iter_mut().zip(c.iter()) {
        carry += *limb + addend;
        *limb = carry & 255;
        carry >>= 8;
    }
}

/// Carry-propagate after a multiplication, folding bits above 2^130 back in.
fn squeeze(h: &mut [u32; LIMBS]) {
    let mut carry = 0u32;
    for limb in &mut h[..16] {
        carry += *limb;
        *limb = carry & 255;
        carry >>= 8;
    }
    carry += h[16];
    h[16] = carry & 3;
    carry = 5 * (carry >> 2);
    for limb in &mut h[..16] {
        carry += *limb;
        *limb = carry & 255;
        carry >>= 8;
    }
    carry += h[16];
    h[16] = carry;
}

/// Fully reduce `h` modulo p. Branch-free: the subtraction of p is kept or
/// discarded with a mask derived from the sign bit of the top limb.
fn freeze(h: &mut [u32; LIMBS]) {
    let mut original = *h;
    add_limbs(h, &MINUS_P);
    let keep_original = (h[16] >> 7).wrapping_neg();
    for (limb, orig) in h.iter_mut().zip(original.iter()) {
        *limb ^= keep_original & (*orig ^ *limb);
    }
    original.zeroize();
}

fn multiply(h: &mut [u32; LIMBS], r: &[u32; LIMBS]) {
    let mut product = [0u32; LIMBS];
    for (i, out) in product.iter_mut().enumerate() {
        let mut sum = 0u32;
        for (j, limb) in h.iter().enumerate() {
            let factor = if j <= i {
                r[i - j]
            } else {
                320 * r[i + LIMBS - j]
            };
            sum += limb * factor;
        }
        *out = sum;
    }
    *h = product;
    product.zeroize();
    squeeze(h);
}

/// Absorb one chunk of at most 16 bytes, terminated by a single 0x01 byte.
fn absorb(h: &mut [u32; LIMBS], r: &[u32; LIMBS], chunk: &[u8]) {
    debug_assert!(!chunk.is_empty() && chunk.len() <= BLOCK_LEN);
    let mut block = [0u32; LIMBS];
    for (limb, &byte) in block.iter_mut().zip(chunk.iter()) {
        *limb = u32::from(byte);
    }
    block[chunk.len()] = 1;
    add_limbs(h, &block);
    multiply(h, r);
    block.zeroize();
}

/// Incremental Poly1305 state for one message under one one-time key.
///
/// Full 16-byte blocks are absorbed as soon as they are available; a trailing
/// partial block is buffered until [`Poly1305::finalize`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    r: [u32; LIMBS],
    h: [u32; LIMBS],
    s: [u8; 16],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
}

impl Poly1305 {
    /// Start authenticating with a 32-byte one-time key (`r || s`).
    #[must_use]
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        let mut r = [0u32; LIMBS];
        for (limb, &byte) in r.iter_mut().zip(key[..16].iter()) {
            *limb = u32::from(byte);
        }
        r[3] &= 15;
        r[4] &= 252;
        r[7] &= 15;
        r[8] &= 252;
        r[11] &= 15;
        r[12] &= 252;
        r[15] &= 15;

        let mut s = [0u8; 16];
        s.copy_from_slice(&key[16..]);

        Self {
            r,
            h: [0u32; LIMBS],
            s,
            buffer: [0u8; BLOCK_LEN],
            buffered: 0,
        }
    }

    /// Feed more message bytes.
    pub fn update(&mut self, data: &[u8]) {
        let mut input = data;

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(input.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];
            if self.buffered < BLOCK_LEN {
                return;
            }
            absorb(&mut self.h, &self.r, &self.buffer);
            self.buffered = 0;
        }

        let mut blocks = input.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            absorb(&mut self.h, &self.r, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Produce the 16-byte tag, consuming (and wiping) the state.
    #[must_use]
    pub fn finalize(mut self) -> [u8; TAG_LEN] {
        if self.buffered > 0 {
            absorb(&mut self.h, &self.r, &self.buffer[..self.buffered]);
        }
        freeze(&mut self.h);

        let mut s = [0u32; LIMBS];
        for (limb, &byte) in s.iter_mut().zip(self.s.iter()) {
            *limb = u32::from(byte);
        }
        add_limbs(&mut self.h, &s);

        let mut tag = [0u8; TAG_LEN];
        for (out, limb) in tag.iter_mut().zip(self.h.iter()) {
            *out = *limb as u8;
        }
        tag
    }
}

/// Compute the Poly1305 tag of `msg` under the one-time key `key`.
#[must_use]
pub fn poly1305_tag(msg: &[u8], key: &[u8; KEY_LEN]) -> [u8; TAG_LEN] {
    let mut state = Poly1305::new(key);
    state.update(msg);
    state.finalize()
}

/// Recompute the tag of `msg` and compare it with `tag` in constant time.
#[must_use]
pub fn poly1305_verify(tag: &[u8; TAG_LEN], msg: &[u8], key: &[u8; KEY_LEN]) -> bool {
    let mut expected = poly1305_tag(msg, key);
    let ok = verify_16(tag, &expected);
    expected.zeroize();
    ok
}
