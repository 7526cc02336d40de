//! Process-wide selection between the pure primitives and an accelerated provider.
//!
//! The selection is made once, by probing the accelerated provider against
//! known answers, and is immutable afterwards. A provider that is missing,
//! panics, or disagrees with the reference output is treated as unavailable.

mod soft;

#[cfg(feature = "accelerated")]
mod accelerated;

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;

use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::primitives::{
    POLY1305_KEY_LEN, SIGMA, TAG_LEN, XNONCE_LEN, apply_salsa20, apply_xsalsa20, verify_16,
};

#[cfg(feature = "accelerated")]
pub use accelerated::AcceleratedPrimitives;
pub use soft::SoftPrimitives;

/// The three primitive entry points the box layer consumes, plus the bulk
/// operations built on them.
///
/// Implementations must be bit-exact with [`SoftPrimitives`]; the provided
/// methods may be overridden with faster equivalents.
pub trait Primitives: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// One 64-byte Salsa20 block.
    fn salsa20_core(&self, input: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 64];

    /// HSalsa20 subkey derivation.
    fn hsalsa20(&self, nonce: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 32];

    /// Poly1305 tag of `msg` under a one-time key.
    fn poly1305_tag(&self, msg: &[u8], key: &[u8; POLY1305_KEY_LEN]) -> [u8; TAG_LEN];

    /// Salsa20 applied from keystream byte `offset`.
    fn salsa20_xor_at(&self, data: &mut [u8], offset: u64, nonce: &[u8; 8], key: &[u8; 32]) {
        apply_salsa20(
            |input, key, constant| self.salsa20_core(input, key, constant),
            data,
            offset,
            nonce,
            key,
        );
    }

    /// XSalsa20 applied from keystream byte `offset`.
    fn xsalsa20_xor_at(
        &self,
        data: &mut [u8],
        offset: u64,
        nonce: &[u8; XNONCE_LEN],
        key: &[u8; 32],
    ) {
        apply_xsalsa20(
            |input, key, constant| self.salsa20_core(input, key, constant),
            |nonce, key, constant| self.hsalsa20(nonce, key, constant),
            data,
            offset,
            nonce,
            key,
        );
    }

    /// Constant-time tag check.
    fn poly1305_verify(&self, tag: &[u8; TAG_LEN], msg: &[u8], key: &[u8; POLY1305_KEY_LEN]) -> bool {
        let mut expected = self.poly1305_tag(msg, key);
        let ok = verify_16(tag, &expected);
        expected.zeroize();
        ok
    }
}

/// Which implementation ended up serving primitive calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The pure-Rust implementation in [`crate::primitives`].
    Soft,
    /// An externally supplied implementation that passed its probe.
    Accelerated,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soft => f.write_str("soft"),
            Self::Accelerated => f.write_str("accelerated"),
        }
    }
}

/// Caller preference for backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Use the accelerated provider when it is compiled in and passes its probe.
    #[default]
    Auto,
    /// Always use the pure implementation.
    Soft,
    /// Prefer the accelerated provider; falls back to soft (with a warning) if unusable.
    Accelerated,
}

/// Configuration consumed once by [`init_with`].
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Backend preference.
    pub preference: BackendPreference,
}

impl BackendConfig {
    /// Configuration that pins the pure implementation.
    #[must_use]
    pub fn soft() -> Self {
        Self {
            preference: BackendPreference::Soft,
        }
    }
}

struct Selected {
    backend: Backend,
    provider: &'static dyn Primitives,
}

static SOFT: SoftPrimitives = SoftPrimitives;
static SELECTED: OnceLock<Selected> = OnceLock::new();

/// Select the backend with the default configuration.
pub fn init() -> Backend {
    init_with(&BackendConfig::default())
}

/// Select the backend once. Later calls return the backend already committed,
/// whatever their configuration.
pub fn init_with(config: &BackendConfig) -> Backend {
    SELECTED.get_or_init(|| select(config)).backend
}

/// The committed provider, initialising with defaults on first use.
pub fn active() -> &'static dyn Primitives {
    SELECTED
        .get_or_init(|| select(&BackendConfig::default()))
        .provider
}

/// The committed backend, or `None` before initialisation.
#[must_use]
pub fn selected_backend() -> Option<Backend> {
    SELECTED.get().map(|selected| selected.backend)
}

/// The pure provider, independent of the process-wide selection.
#[must_use]
pub fn soft() -> &'static dyn Primitives {
    &SOFT
}

#[cfg(feature = "accelerated")]
fn accelerated_candidate() -> Option<&'static dyn Primitives> {
    static ACCELERATED: AcceleratedPrimitives = AcceleratedPrimitives;
    Some(&ACCELERATED)
}

#[cfg(not(feature = "accelerated"))]
fn accelerated_candidate() -> Option<&'static dyn Primitives> {
    None
}

fn select(config: &BackendConfig) -> Selected {
    let selected = match config.preference {
        BackendPreference::Soft => soft_selection(),
        BackendPreference::Auto | BackendPreference::Accelerated => {
            match accelerated_candidate() {
                Some(provider) if probe(provider) => Selected {
                    backend: Backend::Accelerated,
                    provider,
                },
                Some(provider) => {
                    warn!(
                        provider = provider.name(),
                        "accelerated primitives failed probe, using soft backend"
                    );
                    soft_selection()
                }
                None => {
                    if config.preference == BackendPreference::Accelerated {
                        warn!("accelerated primitives not compiled in, using soft backend");
                    }
                    soft_selection()
                }
            }
        }
    };

    info!(
        backend = %selected.backend,
        provider = selected.provider.name(),
        "primitive backend selected"
    );
    selected
}

fn soft_selection() -> Selected {
    Selected {
        backend: Backend::Soft,
        provider: &SOFT,
    }
}

/// Run `candidate` against known answers and the pure implementation.
///
/// A panic inside the candidate counts as failure.
pub(crate) fn probe(candidate: &dyn Primitives) -> bool {
    match catch_unwind(AssertUnwindSafe(|| known_answers_match(candidate))) {
        Ok(ok) => ok,
        Err(_) => {
            debug!(provider = candidate.name(), "probe panicked");
            false
        }
    }
}

fn known_answers_match(candidate: &dyn Primitives) -> bool {
    const ZERO_BLOCK_PREFIX: [u8; 8] = [0x9a, 0x97, 0xf6, 0x5b, 0x9b, 0x4c, 0x72, 0x1b];
    const RFC_TAG: [u8; 16] = [
        0xa8, 0x06, 0x1d, 0xc1, 0x30, 0x51, 0x36, 0xc6, 0xc2, 0x2b, 0x8b, 0xaf, 0x0c, 0x01, 0x27,
        0xa9,
    ];
    const RFC_KEY: [u8; 32] = [
        0x85, 0xd6, 0xbe, 0x78, 0x57, 0x55, 0x6d, 0x33, 0x7f, 0x44, 0x52, 0xfe, 0x42, 0xd5, 0x06,
        0xa8, 0x01, 0x03, 0x80, 0x8a, 0xfb, 0x0d, 0xb2, 0xfd, 0x4a, 0xbf, 0xf6, 0xaf, 0x41, 0x49,
        0xf5, 0x1b,
    ];

    let mut checks_passed = true;
    let mut check = |what: &'static str, ok: bool| {
        if !ok {
            debug!(provider = candidate.name(), check = what, "probe mismatch");
            checks_passed = false;
        }
    };

    let zero_block = candidate.salsa20_core(&[0u8; 16], &[0u8; 32], &SIGMA);
    check("salsa20 zero block", zero_block[..8] == ZERO_BLOCK_PREFIX);

    let mut key = [0u8; 32];
    let mut input = [0u8; 16];
    for (idx, byte) in key.iter_mut().enumerate() {
        *byte = idx as u8;
    }
    for (idx, byte) in input.iter_mut().enumerate() {
        *byte = 0xf0 ^ idx as u8;
    }
    input[8..].copy_from_slice(&[0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]);
    check(
        "salsa20 counter block",
        candidate.salsa20_core(&input, &key, &SIGMA) == SOFT.salsa20_core(&input, &key, &SIGMA),
    );
    check(
        "hsalsa20",
        candidate.hsalsa20(&input, &key, &SIGMA) == SOFT.hsalsa20(&input, &key, &SIGMA),
    );

    check(
        "poly1305",
        candidate.poly1305_tag(b"Cryptographic Forum Research Group", &RFC_KEY) == RFC_TAG,
    );

    let mut nonce = [0u8; XNONCE_LEN];
    nonce[..16].copy_from_slice(&input);
    let mut expected = [0x5au8; 150];
    let mut actual = expected;
    SOFT.xsalsa20_xor_at(&mut expected, 32, &nonce, &key);
    candidate.xsalsa20_xor_at(&mut actual, 32, &nonce, &key);
    check("xsalsa20 stream", expected == actual);

    let mut expected = [0xa5u8; 130];
    let mut actual = expected;
    SOFT.salsa20_xor_at(&mut expected, 64, &[0x42; 8], &key);
    candidate.salsa20_xor_at(&mut actual, 64, &[0x42; 8], &key);
    check("salsa20 stream", expected == actual);

    checks_passed
}
