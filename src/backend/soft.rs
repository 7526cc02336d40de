//! The pure-Rust provider.

use super::Primitives;
use crate::primitives;

/// Provider backed by [`crate::primitives`]; always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftPrimitives;

impl Primitives for SoftPrimitives {
    fn name(&self) -> &'static str {
        "soft"
    }

    fn salsa20_core(&self, input: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 64] {
        primitives::salsa20_core(input, key, constant)
    }

    fn hsalsa20(&self, nonce: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 32] {
        primitives::hsalsa20(nonce, key, constant)
    }

    fn poly1305_tag(&self, msg: &[u8], key: &[u8; 32]) -> [u8; 16] {
        primitives::poly1305_tag(msg, key)
    }

    fn salsa20_xor_at(&self, data: &mut [u8], offset: u64, nonce: &[u8; 8], key: &[u8; 32]) {
        primitives::salsa20_xor_at(data, offset, nonce, key);
    }

    fn xsalsa20_xor_at(&self, data: &mut [u8], offset: u64, nonce: &[u8; 24], key: &[u8; 32]) {
        primitives::xsalsa20_xor_at(data, offset, nonce, key);
    }

    fn poly1305_verify(&self, tag: &[u8; 16], msg: &[u8], key: &[u8; 32]) -> bool {
        primitives::poly1305_verify(tag, msg, key)
    }
}
