use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A 32 byte digest, rendered as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash32([u8; 32]);

/// Block header hash.
pub type BlockHash = Hash32;

/// Transaction id.
pub type TxHash = Hash32;

impl Hash32 {
    /// Digest length in bytes.
    pub const LEN: usize = 32;

    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The raw digest as an owned vector, as the wire messages carry it.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Parses a wire byte field, mapping an empty field to `None`.
    pub(crate) fn from_optional_bytes(bytes: &[u8]) -> Result<Option<Self>, Error> {
        if bytes.is_empty() {
            Ok(None)
        } else {
            Self::try_from(bytes).map(Some)
        }
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Hash32 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 32]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidHashLength {
                expected: Self::LEN,
                actual: bytes.len(),
            })
    }
}

impl TryFrom<Vec<u8>> for Hash32 {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl FromStr for Hash32 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl AsRef<[u8]> for Hash32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use testvectors::blocks::REFERENCE_HASH;

    #[test]
    fn hex_round_trips_in_lowercase() {
        let hash: Hash32 = REFERENCE_HASH.to_uppercase().parse().unwrap();
        assert_eq!(hash.to_string(), REFERENCE_HASH);
        assert_eq!(hash.as_bytes()[0], 0x6d);
        assert_eq!(format!("{hash:?}"), format!("Hash32({REFERENCE_HASH})"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            Hash32::try_from(&[0u8; 28][..]),
            Err(Error::InvalidHashLength {
                expected: 32,
                actual: 28
            })
        ));
        assert!(matches!(
            "abcd".parse::<Hash32>(),
            Err(Error::InvalidHashLength { actual: 2, .. })
        ));
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!("zz".parse::<Hash32>(), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn empty_wire_field_is_absent() {
        assert_eq!(Hash32::from_optional_bytes(&[]).unwrap(), None);
        assert_eq!(
            Hash32::from_optional_bytes(&[7u8; 32]).unwrap(),
            Some(Hash32::new([7u8; 32]))
        );
    }
}
