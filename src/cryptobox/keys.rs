//! Fixed-size key, nonce, and tag types for the box layer.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::curve;
use super::{MAC_LEN, NONCE_LEN, PUBLIC_KEY_LEN, SECRET_KEY_LEN, SHARED_KEY_LEN};
use crate::error::{Result, copy_checked};
use crate::primitives::{verify_16, verify_32};

/// Curve25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Construct from a fixed-size array.
    #[must_use]
    pub const fn from_array(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from raw byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self(copy_checked(bytes, "public key")?))
    }

    /// Borrow as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Curve25519 secret scalar. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Construct from a fixed-size array.
    #[must_use]
    pub const fn from_array(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from raw byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self(copy_checked(bytes, "secret key")?))
    }

    /// Borrow as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }

    /// Derive the matching public key (base-point multiplication).
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey(curve::scalarmult_base(&self.0))
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        verify_32(&self.0, &other.0)
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Symmetric key shared by two correspondents (output of `beforenm`).
///
/// Any uniformly random 32-byte key works here too, which turns the
/// afternm operations into NaCl's `secretbox`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedKey([u8; SHARED_KEY_LEN]);

impl SharedKey {
    /// Construct from a fixed-size array.
    #[must_use]
    pub const fn from_array(bytes: [u8; SHARED_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from raw byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self(copy_checked(bytes, "shared key")?))
    }

    /// Borrow as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SHARED_KEY_LEN] {
        &self.0
    }
}

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        verify_32(&self.0, &other.0)
    }
}

impl Eq for SharedKey {}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedKey([REDACTED])")
    }
}

/// 24-byte box nonce. Must never repeat under the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Construct from a fixed-size array.
    #[must_use]
    pub const fn from_array(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self(copy_checked(bytes, "nonce")?))
    }

    /// Borrow as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Increment nonce in place (little-endian).
    pub fn increment(&mut self) {
        for byte in &mut self.0 {
            let (next, carry) = byte.overflowing_add(1);
            *byte = next;
            if !carry {
                break;
            }
        }
    }
}

impl From<[u8; NONCE_LEN]> for Nonce {
    fn from(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }
}

/// Poly1305 authentication tag. Compared in constant time.
#[derive(Clone, Copy, Debug)]
pub struct Tag([u8; MAC_LEN]);

impl Tag {
    /// Construct from a fixed-size array.
    #[must_use]
    pub const fn from_array(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self(copy_checked(bytes, "tag")?))
    }

    /// Borrow as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; MAC_LEN] {
        &self.0
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        verify_16(&self.0, &other.0)
    }
}

impl Eq for Tag {}

/// A secret key together with its public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl KeyPair {
    /// Build the pair from an existing secret key.
    #[must_use]
    pub fn from_secret_key(secret: SecretKey) -> Self {
        Self {
            public: secret.public_key(),
            secret,
        }
    }

    /// Access the public half.
    #[must_use]
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// Access the secret half.
    #[must_use]
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}
