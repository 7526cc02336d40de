//! Public-key authenticated encryption (NaCl `crypto_box`).
//!
//! Curve25519 agrees on a shared point, HSalsa20 turns it into a symmetric
//! key ([`beforenm`]), and every message is then sealed with XSalsa20 and a
//! Poly1305 tag keyed from the same keystream.
//!
//! Three output layouts are offered:
//!
//! - combined ([`seal`], [`seal_afternm`]): `tag || ciphertext`, 16 bytes longer
//!   than the message;
//! - detached ([`seal_detached_in_place`]): ciphertext in the caller's buffer,
//!   tag returned separately;
//! - padded ([`seal_afternm_padded`]): NaCl's original layout with
//!   [`ZERO_BYTES`] of leading zeros on the plaintext and
//!   [`BOX_ZERO_BYTES`] on the ciphertext.
//!
//! Opening always verifies the tag before any plaintext is produced.
//!
//! A nonce must never be reused with the same key pair; doing so leaks the
//! XOR of the two plaintexts.

mod afternm;
pub mod curve;
mod keys;
mod precomputed;

use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::instrument;
use zeroize::Zeroize;

use crate::backend;
use crate::error::{CryptoError, Result};
use crate::primitives::SIGMA;

pub use afternm::{
    open_afternm, open_afternm_padded, open_detached_in_place, seal_afternm, seal_afternm_padded,
    seal_detached_in_place,
};
pub use keys::{KeyPair, Nonce, PublicKey, SecretKey, SharedKey, Tag};
pub use precomputed::PrecomputedBox;

/// Public key length.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Secret key length.
pub const SECRET_KEY_LEN: usize = 32;
/// Shared key length (`beforenm` output).
pub const SHARED_KEY_LEN: usize = 32;
/// Box nonce length.
pub const NONCE_LEN: usize = 24;
/// Authentication tag length.
pub const MAC_LEN: usize = 16;
/// Leading zero bytes required on a padded plaintext.
pub const ZERO_BYTES: usize = 32;
/// Leading zero bytes produced on a padded ciphertext.
pub const BOX_ZERO_BYTES: usize = 16;

/// Derive the symmetric key shared by `their_public` and `our_secret`.
///
/// `beforenm(pk_a, sk_b) == beforenm(pk_b, sk_a)`.
#[must_use]
pub fn beforenm(their_public: &PublicKey, our_secret: &SecretKey) -> SharedKey {
    let mut point = curve::scalarmult(our_secret.as_bytes(), their_public.as_bytes());
    let key = backend::active().hsalsa20(&[0u8; 16], &point, &SIGMA);
    point.zeroize();
    SharedKey::from_array(key)
}

/// One-shot box: `beforenm` followed by [`seal_afternm`].
#[instrument(level = "trace", skip_all, fields(len = message.len()))]
#[must_use]
pub fn seal(
    message: &[u8],
    nonce: &Nonce,
    their_public: &PublicKey,
    our_secret: &SecretKey,
) -> Vec<u8> {
    let key = beforenm(their_public, our_secret);
    seal_afternm(message, nonce, &key)
}

/// One-shot open: `beforenm` followed by [`open_afternm`].
#[instrument(level = "trace", skip_all, fields(len = boxed.len()))]
pub fn open(
    boxed: &[u8],
    nonce: &Nonce,
    their_public: &PublicKey,
    our_secret: &SecretKey,
) -> Result<Vec<u8>> {
    let key = beforenm(their_public, our_secret);
    open_afternm(boxed, nonce, &key)
}

/// Generate a key pair from the operating system's random source.
pub fn keypair() -> Result<KeyPair> {
    keypair_from_rng(&mut OsRng)
}

/// Generate a key pair from `rng`.
pub fn keypair_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair> {
    let mut bytes = [0u8; SECRET_KEY_LEN];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|err| CryptoError::RandomUnavailable {
            reason: err.to_string(),
        })?;
    let secret = SecretKey::from_array(bytes);
    bytes.zeroize();
    Ok(KeyPair::from_secret_key(secret))
}
