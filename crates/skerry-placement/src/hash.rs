//! Identifier hashing onto the 32-bit ring.

use crate::error::HashError;

/// Maps an identifier to its position on the ring.
///
/// Implementations must be deterministic: the ring relies on a stored
/// entry's key never changing for as long as the ring lives. The return type
/// is fallible so that hash functions which validate their input fit the same
/// interface.
pub trait HashFunction: Send + Sync {
    /// Hash `identifier` to a ring key.
    fn hash(&self, identifier: &str) -> Result<u32, HashError>;
}

/// CRC32 with the Castagnoli polynomial. Accepts every input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc32c;

impl HashFunction for Crc32c {
    fn hash(&self, identifier: &str) -> Result<u32, HashError> {
        Ok(crc32c::crc32c(identifier.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32c_check_value() {
        // Standard CRC-32C check input.
        assert_eq!(Crc32c.hash("123456789").unwrap(), 0xE306_9283);
    }

    #[test]
    fn test_crc32c_empty_input_is_zero() {
        assert_eq!(Crc32c.hash("").unwrap(), 0);
    }

    #[test]
    fn test_crc32c_is_deterministic() {
        for id in ["node-a", "node-b", "10.0.0.7:6969"] {
            assert_eq!(Crc32c.hash(id).unwrap(), Crc32c.hash(id).unwrap());
        }
        assert_ne!(
            Crc32c.hash("node-a").unwrap(),
            Crc32c.hash("node-b").unwrap()
        );
    }
}
