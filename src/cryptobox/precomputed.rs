//! A box bound to one correspondent, so the scalar multiplication runs once.

use super::afternm;
use super::beforenm;
use super::keys::{Nonce, PublicKey, SecretKey, SharedKey, Tag};
use crate::error::Result;

/// Shared key cached for repeated messages to and from one peer.
///
/// ```rust
/// use naclbox::{Nonce, PrecomputedBox, SecretKey};
///
/// let alice = SecretKey::from_array([1u8; 32]);
/// let bob = SecretKey::from_array([2u8; 32]);
///
/// let to_bob = PrecomputedBox::new(&bob.public_key(), &alice);
/// let from_alice = PrecomputedBox::new(&alice.public_key(), &bob);
///
/// let nonce = Nonce::from_array([0u8; 24]);
/// let boxed = to_bob.seal(b"hi bob", &nonce);
/// assert_eq!(from_alice.open(&boxed, &nonce)?, b"hi bob");
/// # Ok::<(), naclbox::CryptoError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecomputedBox {
    key: SharedKey,
}

impl PrecomputedBox {
    /// Derive the shared key for `their_public` / `our_secret`.
    #[must_use]
    pub fn new(their_public: &PublicKey, our_secret: &SecretKey) -> Self {
        Self {
            key: beforenm(their_public, our_secret),
        }
    }

    /// Wrap an existing shared (or random symmetric) key.
    #[must_use]
    pub fn from_shared_key(key: SharedKey) -> Self {
        Self { key }
    }

    /// The cached key.
    #[must_use]
    pub fn shared_key(&self) -> &SharedKey {
        &self.key
    }

    /// Encrypt to `tag || ciphertext`.
    #[must_use]
    pub fn seal(&self, message: &[u8], nonce: &Nonce) -> Vec<u8> {
        afternm::seal_afternm(message, nonce, &self.key)
    }

    /// Authenticate and decrypt `tag || ciphertext`.
    pub fn open(&self, boxed: &[u8], nonce: &Nonce) -> Result<Vec<u8>> {
        afternm::open_afternm(boxed, nonce, &self.key)
    }

    /// Encrypt in place, returning the tag.
    pub fn seal_detached_in_place(&self, buffer: &mut [u8], nonce: &Nonce) -> Tag {
        afternm::seal_detached_in_place(buffer, nonce, &self.key)
    }

    /// Verify then decrypt in place; `buffer` is untouched on failure.
    pub fn open_detached_in_place(&self, buffer: &mut [u8], tag: &Tag, nonce: &Nonce) -> Result<()> {
        afternm::open_detached_in_place(buffer, tag, nonce, &self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;

    #[test]
    fn both_sides_agree() {
        let alice = SecretKey::from_array([0x11; 32]);
        let bob = SecretKey::from_array([0x22; 32]);
        let to_bob = PrecomputedBox::new(&bob.public_key(), &alice);
        let from_alice = PrecomputedBox::new(&alice.public_key(), &bob);
        assert_eq!(to_bob, from_alice);

        let mut nonce = Nonce::from_array([0u8; 24]);
        for round in 0..4u8 {
            let message = vec![round; usize::from(round) * 50];
            let boxed = to_bob.seal(&message, &nonce);
            assert_eq!(from_alice.open(&boxed, &nonce).unwrap(), message);
            nonce.increment();
        }
    }

    #[test]
    fn detached_round_trip_and_wrong_nonce() {
        let sealer = PrecomputedBox::from_shared_key(SharedKey::from_array([5u8; 32]));
        let nonce = Nonce::from_array([9u8; 24]);
        let mut buffer = *b"detached payload";
        let tag = sealer.seal_detached_in_place(&mut buffer, &nonce);

        let mut other = nonce;
        other.increment();
        assert_eq!(
            sealer.open_detached_in_place(&mut buffer, &tag, &other),
            Err(CryptoError::AuthenticationFailed)
        );
        sealer.open_detached_in_place(&mut buffer, &tag, &nonce).unwrap();
        assert_eq!(&buffer, b"detached payload");
    }

    #[test]
    fn debug_hides_key() {
        let sealer = PrecomputedBox::from_shared_key(SharedKey::from_array([0xab; 32]));
        assert!(format!("{sealer:?}").contains("REDACTED"));
    }
}
