//! naclbox - NaCl `crypto_box` on a pure-Rust Salsa20/Poly1305 core
//!
//! This library implements public-key authenticated encryption compatible with
//! NaCl's `crypto_box_curve25519xsalsa20poly1305`. The symmetric primitives are
//! implemented here; Curve25519 is delegated to `x25519-dalek`.
//!
//! # Quick Start
//!
//! ```rust
//! use naclbox::{Nonce, keypair, open, seal};
//!
//! let alice = keypair()?;
//! let bob = keypair()?;
//! let nonce = Nonce::from_array([7u8; 24]);
//!
//! let boxed = seal(b"Hello, Bob!", &nonce, bob.public(), alice.secret());
//! let opened = open(&boxed, &nonce, alice.public(), bob.secret())?;
//! assert_eq!(opened, b"Hello, Bob!");
//! # Ok::<(), naclbox::CryptoError>(())
//! ```
//!
//! # Features
//!
//! - **Bit-exact NaCl output** - same ciphertext and tags as the reference
//! - **Fail-closed decryption** - tags are checked in constant time before any
//!   plaintext is written
//! - **Pluggable primitives** - an optional accelerated provider (feature
//!   `accelerated`) is probed once at startup and used only if it agrees with
//!   the pure implementation
//! - **Secret hygiene** - key types and scratch buffers are zeroized
//!
//! Nonces are the caller's responsibility: never reuse one under the same key.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod cryptobox;
pub mod error;
pub mod primitives;

pub use backend::{Backend, BackendConfig, BackendPreference};
pub use cryptobox::{
    BOX_ZERO_BYTES, KeyPair, MAC_LEN, NONCE_LEN, Nonce, PUBLIC_KEY_LEN, PrecomputedBox, PublicKey,
    SECRET_KEY_LEN, SHARED_KEY_LEN, SecretKey, SharedKey, Tag, ZERO_BYTES, beforenm, keypair,
    keypair_from_rng, open, open_afternm, open_afternm_padded, open_detached_in_place, seal,
    seal_afternm, seal_afternm_padded, seal_detached_in_place,
};
pub use error::{CryptoError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
