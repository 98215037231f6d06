//! Core protocol types.

use std::fmt;
use std::str::FromStr;

use crate::error::HashParseError;

/// A 32-byte hash value identifying a block.
///
/// Bytes are stored in display order: the first byte is the first two hex
/// digits of the canonical string form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a Hash256 from a byte array.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Decode a 64-digit hex literal, with or without a `0x` prefix.
    ///
    /// Intended for compiled-in tables: evaluated in a `const` or `static`
    /// initializer, a malformed literal is a build error. Use
    /// [`FromStr`] for runtime input.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not exactly 64 hex digits after the optional prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::types::Hash256;
    /// const H: Hash256 = Hash256::from_hex_const(
    ///     "0x00000000000000000000000000000000000000000000000000000000000000ff",
    /// );
    /// assert_eq!(H.0[31], 0xff);
    /// ```
    pub const fn from_hex_const(s: &str) -> Self {
        let bytes = s.as_bytes();
        let start = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X')
        {
            2
        } else {
            0
        };
        assert!(bytes.len() - start == 64, "hash literal must have 64 hex digits");

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            let hi = hex_nibble(bytes[start + 2 * i]);
            let lo = hex_nibble(bytes[start + 2 * i + 1]);
            out[i] = (hi << 4) | lo;
            i += 1;
        }
        Self(out)
    }
}

const fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in hash literal"),
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    /// Parse a 64-digit hex string, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let decoded = hex::decode(digits).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| HashParseError::InvalidLength(v.len()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
