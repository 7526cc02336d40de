//! Per-message symmetric half of the box: XSalsa20 for confidentiality,
//! Poly1305 keyed from the first 32 keystream bytes for integrity.
//!
//! Keystream layout for one message under `(nonce, key)`:
//!
//! ```text
//! byte   0 .. 32   one-time Poly1305 key
//! byte  32 .. 32+n XOR'ed with the n message bytes
//! ```

use tracing::{debug, instrument};
use zeroize::Zeroize;

use super::keys::{Nonce, SharedKey, Tag};
use super::{BOX_ZERO_BYTES, MAC_LEN, ZERO_BYTES};
use crate::backend::{self, Primitives};
use crate::error::{CryptoError, Result};
use crate::primitives::{BLOCK_LEN, POLY1305_KEY_LEN, SIGMA, split_xnonce};

/// XSalsa20 keystream for one `(nonce, key)`, reduced to its Salsa20 form.
struct MessageStream<'a> {
    primitives: &'a dyn Primitives,
    subkey: [u8; 32],
    nonce: [u8; 8],
}

impl<'a> MessageStream<'a> {
    fn new(primitives: &'a dyn Primitives, nonce: &Nonce, key: &SharedKey) -> Self {
        let (prefix, suffix) = split_xnonce(nonce.as_bytes());
        Self {
            primitives,
            subkey: primitives.hsalsa20(&prefix, key.as_bytes(), &SIGMA),
            nonce: suffix,
        }
    }

    /// Keystream block 0: one-time key followed by the first 32 message pad bytes.
    fn first_block(&self) -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        self.primitives
            .salsa20_xor_at(&mut block, 0, &self.nonce, &self.subkey);
        block
    }

    /// XOR the message keystream (starting at byte 32) into `body`.
    fn apply(&self, first_block: &[u8; BLOCK_LEN], body: &mut [u8]) {
        let head = body.len().min(BLOCK_LEN - ZERO_BYTES);
        for (byte, pad) in body[..head].iter_mut().zip(&first_block[ZERO_BYTES..]) {
            *byte ^= pad;
        }
        if body.len() > head {
            self.primitives.salsa20_xor_at(
                &mut body[head..],
                BLOCK_LEN as u64,
                &self.nonce,
                &self.subkey,
            );
        }
    }
}

impl Drop for MessageStream<'_> {
    fn drop(&mut self) {
        self.subkey.zeroize();
    }
}

fn one_time_key(first_block: &[u8; BLOCK_LEN]) -> [u8; POLY1305_KEY_LEN] {
    let mut key = [0u8; POLY1305_KEY_LEN];
    key.copy_from_slice(&first_block[..POLY1305_KEY_LEN]);
    key
}

pub(crate) fn seal_detached_with(
    primitives: &dyn Primitives,
    buffer: &mut [u8],
    nonce: &Nonce,
    key: &SharedKey,
) -> Tag {
    let stream = MessageStream::new(primitives, nonce, key);
    let mut block = stream.first_block();
    let mut auth_key = one_time_key(&block);

    stream.apply(&block, buffer);
    let tag = primitives.poly1305_tag(buffer, &auth_key);

    block.zeroize();
    auth_key.zeroize();
    Tag::from_array(tag)
}

pub(crate) fn open_detached_with(
    primitives: &dyn Primitives,
    buffer: &mut [u8],
    tag: &Tag,
    nonce: &Nonce,
    key: &SharedKey,
) -> Result<()> {
    let stream = MessageStream::new(primitives, nonce, key);
    let mut block = stream.first_block();
    let mut auth_key = one_time_key(&block);

    let authentic = primitives.poly1305_verify(tag.as_bytes(), buffer, &auth_key);
    auth_key.zeroize();
    if !authentic {
        block.zeroize();
        debug!(len = buffer.len(), "box authentication failed");
        return Err(CryptoError::AuthenticationFailed);
    }

    stream.apply(&block, buffer);
    block.zeroize();
    Ok(())
}

/// Encrypt `buffer` in place and return its authentication tag.
pub fn seal_detached_in_place(buffer: &mut [u8], nonce: &Nonce, key: &SharedKey) -> Tag {
    seal_detached_with(backend::active(), buffer, nonce, key)
}

/// Verify `tag` over the ciphertext in `buffer`, then decrypt it in place.
///
/// On failure `buffer` is left exactly as it was.
pub fn open_detached_in_place(
    buffer: &mut [u8],
    tag: &Tag,
    nonce: &Nonce,
    key: &SharedKey,
) -> Result<()> {
    open_detached_with(backend::active(), buffer, tag, nonce, key)
}

/// Encrypt `message`, returning `tag || ciphertext`.
#[instrument(level = "trace", skip_all, fields(len = message.len()))]
pub fn seal_afternm(message: &[u8], nonce: &Nonce, key: &SharedKey) -> Vec<u8> {
    let mut boxed = vec![0u8; MAC_LEN + message.len()];
    let (tag_out, body) = boxed.split_at_mut(MAC_LEN);
    body.copy_from_slice(message);
    let tag = seal_detached_in_place(body, nonce, key);
    tag_out.copy_from_slice(tag.as_bytes());
    boxed
}

/// Authenticate and decrypt `tag || ciphertext`.
#[instrument(level = "trace", skip_all, fields(len = boxed.len()))]
pub fn open_afternm(boxed: &[u8], nonce: &Nonce, key: &SharedKey) -> Result<Vec<u8>> {
    if boxed.len() < MAC_LEN {
        return Err(CryptoError::BufferTooShort {
            needed: MAC_LEN,
            actual: boxed.len(),
        });
    }
    let (tag, ciphertext) = boxed.split_at(MAC_LEN);
    let tag = Tag::from_bytes(tag)?;
    let mut message = ciphertext.to_vec();
    open_detached_in_place(&mut message, &tag, nonce, key)?;
    Ok(message)
}

/// NaCl `crypto_box_afternm` layout.
///
/// `message` starts with 32 zero bytes; `ciphertext` receives 16 zero bytes,
/// the 16-byte tag, then the encrypted message. Both buffers share a length.
#[instrument(level = "trace", skip_all, fields(len = message.len()))]
pub fn seal_afternm_padded(
    ciphertext: &mut [u8],
    message: &[u8],
    nonce: &Nonce,
    key: &SharedKey,
) -> Result<()> {
    check_padded_lengths(message.len(), ciphertext.len(), ZERO_BYTES)?;
    if message[..ZERO_BYTES].iter().any(|&byte| byte != 0) {
        return Err(CryptoError::InvalidPadding);
    }

    let (prefix, body) = ciphertext.split_at_mut(ZERO_BYTES);
    body.copy_from_slice(&message[ZERO_BYTES..]);
    let tag = seal_detached_in_place(body, nonce, key);
    prefix[..BOX_ZERO_BYTES].fill(0);
    prefix[BOX_ZERO_BYTES..].copy_from_slice(tag.as_bytes());
    Ok(())
}

/// NaCl `crypto_box_open_afternm` layout.
///
/// The first 16 bytes of `ciphertext` are ignored. On success `message`
/// holds 32 zero bytes followed by the plaintext; on failure it is zeroed.
#[instrument(level = "trace", skip_all, fields(len = ciphertext.len()))]
pub fn open_afternm_padded(
    message: &mut [u8],
    ciphertext: &[u8],
    nonce: &Nonce,
    key: &SharedKey,
) -> Result<()> {
    check_padded_lengths(ciphertext.len(), message.len(), ZERO_BYTES)?;
    let tag = Tag::from_bytes(&ciphertext[BOX_ZERO_BYTES..ZERO_BYTES])?;

    let (prefix, body) = message.split_at_mut(ZERO_BYTES);
    prefix.fill(0);
    body.copy_from_slice(&ciphertext[ZERO_BYTES..]);
    open_detached_in_place(body, &tag, nonce, key).inspect_err(|_| body.fill(0))
}

fn check_padded_lengths(input: usize, output: usize, needed: usize) -> Result<()> {
    if input < needed {
        return Err(CryptoError::BufferTooShort {
            needed,
            actual: input,
        });
    }
    if input != output {
        return Err(CryptoError::LengthMismatch { input, output });
    }
    Ok(())
}
