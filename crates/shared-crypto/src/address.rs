//! Account address derivation.
//!
//! An address is the decimal rendering of the u64 read big-endian from the
//! byte-reversed first 8 bytes of SHA-256(public key), suffixed with the
//! network letter `F`. The construction mirrors block id derivation so the
//! whole identifier scheme rests on one primitive.

use crate::ecdsa::PublicKey;
use crate::hashing::sha256;

/// Network suffix appended to every address.
pub const ADDRESS_SUFFIX: char = 'F';

/// Derive the account address owned by `public_key`.
pub fn derive_address(public_key: &PublicKey) -> String {
    let hash = sha256(public_key.as_bytes());
    let mut temp = [0u8; 8];
    for (i, byte) in temp.iter_mut().enumerate() {
        *byte = hash[7 - i];
    }
    format!("{}{}", u64::from_be_bytes(temp), ADDRESS_SUFFIX)
}

/// Check the shape of an address: 1..=20 decimal digits plus the suffix.
///
/// Shape only; whether an account exists is a ledger question.
pub fn is_valid_address(address: &str) -> bool {
    let Some(digits) = address.strip_suffix(ADDRESS_SUFFIX) else {
        return false;
    };
    !digits.is_empty() && digits.len() <= 20 && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecdsa::KeyPair;

    #[test]
    fn test_derivation_is_stable() {
        let keypair = KeyPair::from_bytes([0x11u8; 32]).unwrap();
        let a1 = derive_address(&keypair.public_key());
        let a2 = derive_address(&keypair.public_key());
        assert_eq!(a1, a2);
    }

    #[test]
    fn test_derived_addresses_are_valid() {
        let keypair = KeyPair::generate();
        let address = derive_address(&keypair.public_key());
        assert!(is_valid_address(&address));
    }

    #[test]
    fn test_distinct_keys_distinct_addresses() {
        let a = derive_address(&KeyPair::from_bytes([0x01u8; 32]).unwrap().public_key());
        let b = derive_address(&KeyPair::from_bytes([0x02u8; 32]).unwrap().public_key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_shape_validation() {
        assert!(is_valid_address("18160565574430594874F"));
        assert!(is_valid_address("1F"));
        assert!(!is_valid_address("18160565574430594874"));
        assert!(!is_valid_address("F"));
        assert!(!is_valid_address("12ab34F"));
        assert!(!is_valid_address("123456789012345678901F"));
    }
}
