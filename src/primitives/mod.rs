//! Pure-Rust symmetric primitives: Salsa20 core, HSalsa20, (X)Salsa20 keystreams,
//! Poly1305, and constant-time comparison.
//!
//! Everything here is a pure function over caller-owned buffers; scratch state
//! lives on the stack and is wiped before returning.

mod poly1305;
mod salsa20;
mod stream;
mod verify;

pub use poly1305::{KEY_LEN as POLY1305_KEY_LEN, Poly1305, TAG_LEN, poly1305_tag, poly1305_verify};
pub use salsa20::{BLOCK_LEN, CONSTANT_LEN, INPUT_LEN, SIGMA, SUBKEY_LEN, hsalsa20, salsa20_core};
pub use stream::{
    NONCE_LEN as SALSA20_NONCE_LEN, XNONCE_LEN, salsa20_keystream, salsa20_xor, salsa20_xor_at,
    xsalsa20_keystream, xsalsa20_xor, xsalsa20_xor_at,
};
pub use verify::{ct_eq, verify_16, verify_32};

pub(crate) use stream::{apply_salsa20, apply_xsalsa20, split_xnonce};
