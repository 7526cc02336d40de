//! Salsa20 core permutation and the HSalsa20 key-derivation variant.

use zeroize::Zeroize;

/// The NaCl constant `"expand 32-byte k"`.
pub const SIGMA: [u8; 16] = *b"expand 32-byte k";

/// Length of the core input block (nonce and counter).
pub const INPUT_LEN: usize = 16;
/// Length of the core constant.
pub const CONSTANT_LEN: usize = 16;
/// Length of one keystream block.
pub const BLOCK_LEN: usize = 64;
/// Length of the HSalsa20 output subkey.
pub const SUBKEY_LEN: usize = 32;

#[inline]
fn load_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[b] ^= state[a].wrapping_add(state[d]).rotate_left(7);
    state[c] ^= state[b].wrapping_add(state[a]).rotate_left(9);
    state[d] ^= state[c].wrapping_add(state[b]).rotate_left(13);
    state[a] ^= state[d].wrapping_add(state[c]).rotate_left(18);
}

fn salsa20_rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column round
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 5, 9, 13, 1);
        quarter_round(state, 10, 14, 2, 6);
        quarter_round(state, 15, 3, 7, 11);
        // Row round
        quarter_round(state, 0, 1, 2, 3);
        quarter_round(state, 5, 6, 7, 4);
        quarter_round(state, 10, 11, 8, 9);
        quarter_round(state, 15, 12, 13, 14);
    }
}

fn initialize_state(input: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u32; 16] {
    let mut state = [0u32; 16];
    for i in 0..4 {
        state[5 * i] = load_le(&constant[4 * i..]);
        state[1 + i] = load_le(&key[4 * i..]);
        state[6 + i] = load_le(&input[4 * i..]);
        state[11 + i] = load_le(&key[16 + 4 * i..]);
    }
    state
}

/// Run the 20-round Salsa20 core with feed-forward, producing one keystream block.
#[must_use]
pub fn salsa20_core(input: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 64] {
    let mut working_state = initialize_state(input, key, constant);
    let mut initial_state = working_state;
    salsa20_rounds(&mut working_state);

    let mut block = [0u8; 64];
    for (idx, chunk) in block.chunks_exact_mut(4).enumerate() {
        let word = working_state[idx].wrapping_add(initial_state[idx]);
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    working_state.zeroize();
    initial_state.zeroize();
    block
}

/// Derive a 32-byte subkey from `key` and a 16-byte nonce prefix.
///
/// Same permutation as [`salsa20_core`], without the feed-forward; the
/// diagonal words (0, 5, 10, 15) and the input words (6..10) form the output.
#[must_use]
pub fn hsalsa20(nonce: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 32] {
    const OUTPUT_WORDS: [usize; 8] = [0, 5, 10, 15, 6, 7, 8, 9];

    let mut state = initialize_state(nonce, key, constant);
    salsa20_rounds(&mut state);

    let mut subkey = [0u8; 32];
    for (chunk, &word) in subkey.chunks_exact_mut(4).zip(OUTPUT_WORDS.iter()) {
        chunk.copy_from_slice(&state[word].to_le_bytes());
    }

    state.zeroize();
    subkey
}
