//! Provider backed by the RustCrypto `salsa20` and `poly1305` crates, which
//! pick SIMD code paths at runtime where the CPU supports them.
//!
//! Only the NaCl constant is supported natively; any other constant, and any
//! position the external cipher refuses to seek to, is served by the pure
//! implementation so results stay bit-exact.

use poly1305::universal_hash::KeyInit;
use salsa20::cipher::consts::U10;
use salsa20::cipher::generic_array::GenericArray;
use salsa20::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use salsa20::{Key, Nonce, Salsa20, XNonce, XSalsa20, hsalsa};

use super::Primitives;
use crate::primitives::{self, BLOCK_LEN, SIGMA};

/// Accelerated provider; selected only after passing the startup probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedPrimitives;

impl Primitives for AcceleratedPrimitives {
    fn name(&self) -> &'static str {
        "rustcrypto"
    }

    fn salsa20_core(&self, input: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 64] {
        if constant != &SIGMA {
            return primitives::salsa20_core(input, key, constant);
        }

        let mut counter = [0u8; 8];
        counter.copy_from_slice(&input[8..]);
        let Some(position) = u64::from_le_bytes(counter).checked_mul(BLOCK_LEN as u64) else {
            return primitives::salsa20_core(input, key, constant);
        };

        let mut block = [0u8; 64];
        let mut cipher = Salsa20::new(Key::from_slice(key), Nonce::from_slice(&input[..8]));
        if cipher.try_seek(position).is_err() || cipher.try_apply_keystream(&mut block).is_err() {
            return primitives::salsa20_core(input, key, constant);
        }
        block
    }

    fn hsalsa20(&self, nonce: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 32] {
        if constant != &SIGMA {
            return primitives::hsalsa20(nonce, key, constant);
        }
        let derived = hsalsa::<U10>(Key::from_slice(key), GenericArray::from_slice(nonce));
        let mut subkey = [0u8; 32];
        subkey.copy_from_slice(&derived);
        subkey
    }

    fn poly1305_tag(&self, msg: &[u8], key: &[u8; 32]) -> [u8; 16] {
        let mac = poly1305::Poly1305::new(poly1305::Key::from_slice(key));
        let tag = mac.compute_unpadded(msg);
        let mut out = [0u8; 16];
        out.copy_from_slice(&tag);
        out
    }

    fn salsa20_xor_at(&self, data: &mut [u8], offset: u64, nonce: &[u8; 8], key: &[u8; 32]) {
        if data.is_empty() {
            return;
        }
        let mut cipher = Salsa20::new(Key::from_slice(key), Nonce::from_slice(nonce));
        if cipher.try_seek(offset).is_ok() && cipher.try_apply_keystream(data).is_ok() {
            return;
        }
        primitives::salsa20_xor_at(data, offset, nonce, key);
    }

    fn xsalsa20_xor_at(&self, data: &mut [u8], offset: u64, nonce: &[u8; 24], key: &[u8; 32]) {
        if data.is_empty() {
            return;
        }
        let mut cipher = XSalsa20::new(Key::from_slice(key), XNonce::from_slice(nonce));
        // Both calls check bounds before touching `data`, so a refusal leaves it intact.
        if cipher.try_seek(offset).is_ok() && cipher.try_apply_keystream(data).is_ok() {
            return;
        }
        primitives::xsalsa20_xor_at(data, offset, nonce, key);
    }
}
