//! SHA-1 block compression function

use super::{BLOCK_SIZE, DIGEST_WORDS};

const K_CHOOSE: u32 = 0x5A82_7999;
const K_PARITY_LOW: u32 = 0x6ED9_EBA1;
const K_MAJORITY: u32 = 0x8F1B_BCDC;
const K_PARITY_HIGH: u32 = 0xCA62_C1D6;

const SCHEDULE_WORDS: usize = 80;

#[inline(always)]
fn choose(b: u32, c: u32, d: u32) -> u32 {
    d ^ (b & (c ^ d))
}

#[inline(always)]
fn parity(b: u32, c: u32, d: u32) -> u32 {
    b ^ c ^ d
}

#[inline(always)]
fn majority(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (d & (b | c))
}

/// Expand a 64-byte block into the 80-word message schedule
fn schedule(block: &[u8; BLOCK_SIZE]) -> [u32; SCHEDULE_WORDS] {
    let mut w = [0u32; SCHEDULE_WORDS];

    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    for t in 16..SCHEDULE_WORDS {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }

    w
}

/// Fold one 64-byte block into the running digest words.
///
/// Pure transform: the only effect is on `state`, and the result depends on
/// nothing but `state` and `block`.
pub(crate) fn compress(state: &mut [u32; DIGEST_WORDS], block: &[u8; BLOCK_SIZE]) {
    let w = schedule(block);
    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for (t, &word) in w.iter().enumerate() {
        let (f, k) = match t {
            0..=19 => (choose(b, c, d), K_CHOOSE),
            20..=39 => (parity(b, c, d), K_PARITY_LOW),
            40..=59 => (majority(b, c, d), K_MAJORITY),
            _ => (parity(b, c, d), K_PARITY_HIGH),
        };

        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(word);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}
