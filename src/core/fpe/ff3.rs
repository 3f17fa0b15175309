//! FF3 tweakable format-preserving cipher over decimal digit strings
//!
//! Implements the NIST SP 800-38G FF3 construction for radix 10 with
//! AES-256 as the round function, an eight-round Feistel network over the
//! two halves of the digit string. The tweak is the 64-bit FF3 form.
//!
//! Only the digit-run layer lives here; extraction of digits from mixed
//! input and the short-run fallback are handled by the parent module.

use crate::domain::CipherError;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;

/// Minimum digit-run length in the FF3 radix-10 domain (10^6 >= 1_000_000)
pub const MIN_DIGITS: usize = 6;

/// Maximum digit-run length: 2 * floor(96 / log2(10))
pub const MAX_DIGITS: usize = 56;

const RADIX: u128 = 10;
const ROUNDS: u8 = 8;

/// FF3 cipher instance bound to one key and tweak
pub struct Ff3Cipher {
    cipher: Aes256,
    tweak: [u8; 8],
}

impl Ff3Cipher {
    /// Build from a 256-bit key and a 64-bit tweak.
    ///
    /// FF3 applies the block cipher with the byte-reversed key; the reversal
    /// happens once here.
    pub fn new(key: &[u8; 32], tweak: [u8; 8]) -> Self {
        let mut reversed = *key;
        reversed.reverse();
        let cipher = Aes256::new(GenericArray::from_slice(&reversed));
        Self { cipher, tweak }
    }

    /// Encrypt a run of decimal digit values (each `0..=9`), preserving length.
    pub fn encrypt_digits(&self, digits: &[u8]) -> Result<Vec<u8>, CipherError> {
        let n = digits.len();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&n) {
            return Err(CipherError::UnsupportedLength(n));
        }

        let u = n.div_ceil(2);
        let v = n - u;
        let mut a = digits[..u].to_vec();
        let mut b = digits[u..].to_vec();
        let (t_left, t_right) = self.tweak_halves();

        for i in 0..ROUNDS {
            let (m, w) = if i % 2 == 0 { (u, t_right) } else { (v, t_left) };
            let y = self.round_output(w, i, &b);
            let modulus = RADIX.pow(m as u32);
            let c = (num_of_reversed(&a) % modulus + y % modulus) % modulus;
            a = b;
            b = reversed_digits_of(c, m);
        }

        a.extend_from_slice(&b);
        Ok(a)
    }

    /// Invert [`encrypt_digits`](Self::encrypt_digits).
    pub fn decrypt_digits(&self, digits: &[u8]) -> Result<Vec<u8>, CipherError> {
        let n = digits.len();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&n) {
            return Err(CipherError::UnsupportedLength(n));
        }

        let u = n.div_ceil(2);
        let v = n - u;
        let mut a = digits[..u].to_vec();
        let mut b = digits[u..].to_vec();
        let (t_left, t_right) = self.tweak_halves();

        for i in (0..ROUNDS).rev() {
            let (m, w) = if i % 2 == 0 { (u, t_right) } else { (v, t_left) };
            let y = self.round_output(w, i, &a);
            let modulus = RADIX.pow(m as u32);
            let c = (num_of_reversed(&b) % modulus + modulus - y % modulus) % modulus;
            b = a;
            a = reversed_digits_of(c, m);
        }

        a.extend_from_slice(&b);
        Ok(a)
    }

    fn tweak_halves(&self) -> ([u8; 4], [u8; 4]) {
        let mut left = [0u8; 4];
        let mut right = [0u8; 4];
        left.copy_from_slice(&self.tweak[..4]);
        right.copy_from_slice(&self.tweak[4..]);
        (left, right)
    }

    /// One Feistel round: P = (W xor [i]) || NUM(REV(x)) as 12 bytes, then
    /// S = REVB(CIPH(REVB(P))), returned as an integer.
    fn round_output(&self, w: [u8; 4], i: u8, x: &[u8]) -> u128 {
        let mut p = [0u8; 16];
        p[..4].copy_from_slice(&w);
        p[3] ^= i;
        // NUM(REV(x)) < 2^96 for any run within MAX_DIGITS.
        p[4..].copy_from_slice(&num_of_reversed(x).to_be_bytes()[4..]);
        p.reverse();

        let mut block = GenericArray::clone_from_slice(&p);
        self.cipher.encrypt_block(&mut block);

        let mut s = [0u8; 16];
        s.copy_from_slice(&block);
        s.reverse();
        u128::from_be_bytes(s)
    }
}

/// NUM_radix(REV(X)): interpret the digit run back-to-front as an integer.
fn num_of_reversed(digits: &[u8]) -> u128 {
    digits
        .iter()
        .rev()
        .fold(0u128, |acc, &d| acc * RADIX + u128::from(d))
}

/// REV(STR_m(c)): render `c` as exactly `m` digits, least significant first.
fn reversed_digits_of(mut c: u128, m: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(m);
    for _ in 0..m {
        out.push((c % RADIX) as u8);
        c /= RADIX;
    }
    out
}
