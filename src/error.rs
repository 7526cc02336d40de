//! Error types shared by the primitive and box layers.

/// Errors produced by box construction, key handling, and key generation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A fixed-size input (key, nonce, tag) had the wrong length.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending argument.
        what: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A padded or boxed buffer is shorter than its mandatory prefix.
    #[error("buffer too short: need at least {needed} bytes, got {actual}")]
    BufferTooShort {
        /// Minimum length in bytes.
        needed: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Input and output buffers of a padded operation differ in length.
    #[error("length mismatch: input is {input} bytes, output is {output} bytes")]
    LengthMismatch {
        /// Length of the input buffer.
        input: usize,
        /// Length of the output buffer.
        output: usize,
    },

    /// The leading zero region of a padded plaintext contains non-zero bytes.
    #[error("padded plaintext must start with 32 zero bytes")]
    InvalidPadding,

    /// Tag verification failed; no plaintext was released.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The operating system random source could not produce key material.
    #[error("random source unavailable: {reason}")]
    RandomUnavailable {
        /// Description reported by the random source.
        reason: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CryptoError>;

pub(crate) fn copy_checked<const N: usize>(bytes: &[u8], what: &'static str) -> Result<[u8; N]> {
    if bytes.len() != N {
        return Err(CryptoError::InvalidLength {
            what,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut array = [0u8; N];
    array.copy_from_slice(bytes);
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_checked_accepts_exact_length() {
        let bytes = [7u8; 24];
        let array: [u8; 24] = copy_checked(&bytes, "nonce").unwrap();
        assert_eq!(array, bytes);
    }

    #[test]
    fn copy_checked_rejects_short_and_long_input() {
        let short = copy_checked::<32>(&[0u8; 31], "public key").unwrap_err();
        assert_eq!(
            short,
            CryptoError::InvalidLength {
                what: "public key",
                expected: 32,
                actual: 31,
            }
        );

        let long = copy_checked::<32>(&[0u8; 33], "secret key").unwrap_err();
        assert!(matches!(long, CryptoError::InvalidLength { actual: 33, .. }));
    }

    #[test]
    fn display_mentions_argument_name() {
        let err = CryptoError::InvalidLength {
            what: "nonce",
            expected: 24,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "invalid nonce length: expected 24 bytes, got 8"
        );
        assert_eq!(
            CryptoError::AuthenticationFailed.to_string(),
            "authentication failed"
        );
    }
}
