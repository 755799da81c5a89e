//! Unsigned variable-length integers.
//!
//! Seven payload bits per byte, least significant group first. Every byte
//! except the last has its high bit set.

use super::error::MalformedVarint;

/// Returns the number of bytes `n` occupies once encoded.
#[must_use]
#[inline]
pub fn size(n: u64) -> usize {
    let bits = 64 - n.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Appends the encoding of `n` to `buf`.
#[inline]
pub fn write(mut n: u64, buf: &mut Vec<u8>) {
    while n >= 0x80 {
        buf.push((n as u8 & 0x7f) | 0x80);
        n >>= 7;
    }
    buf.push(n as u8);
}

/// Encodes `n` into a fresh buffer.
#[must_use]
pub fn encode(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(size(n));
    write(n, &mut buf);
    buf
}

/// Decodes a varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn read(bytes: &[u8]) -> Result<(u64, usize), MalformedVarint> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let shift = 7 * i as u32;
        let group = u64::from(byte & 0x7f);
        if shift >= 64 || (shift == 63 && group > 1) {
            return Err(MalformedVarint::Overflow);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(MalformedVarint::Truncated { read: bytes.len() })
}
