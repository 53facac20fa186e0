//! # ECDSA Signatures (secp256k1)
//!
//! Block and transaction signatures use the secp256k1 curve with
//! DER-encoded signatures and 33-byte compressed public keys.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - High-S signatures are normalized before verification
//! - Secret key material is zeroized on drop

use crate::CryptoError;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature as RawSignature, SigningKey, VerifyingKey,
};
use zeroize::Zeroize;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        // Validate it's a valid compressed point
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Create from a lowercase hex string (66 characters).
    pub fn from_hex(hex_key: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(hex_key).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        if raw.len() != 33 {
            return Err(CryptoError::InvalidKeyLength {
                expected: 33,
                actual: raw.len(),
            });
        }
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&raw);
        Self::from_bytes(bytes)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Hex encoding of the compressed key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify a DER signature over `message`.
    ///
    /// Fails with [`CryptoError::VerificationFailed`] when the signature
    /// does not match; malformed encodings fail with their own variants.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let parsed = RawSignature::from_der(signature.as_bytes())
            .map_err(|_| CryptoError::InvalidSignature)?;
        // Historical chain data carries high-S signatures; normalize first.
        let parsed = parsed.normalize_s().unwrap_or(parsed);

        verifying_key
            .verify(message, &parsed)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

/// DER-encoded ECDSA signature (variable length).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Create from DER bytes, validating the encoding.
    pub fn from_der_bytes(bytes: Vec<u8>) -> Result<Self, CryptoError> {
        RawSignature::from_der(&bytes).map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self(bytes))
    }

    /// Create from a hex string.
    pub fn from_hex(hex_sig: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(hex_sig).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_der_bytes(raw)
    }

    /// Get raw DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex encoding of the DER bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// secp256k1 keypair for forging and account operations.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Derive a keypair from a passphrase: the secret scalar is the SHA-256
    /// digest of the passphrase bytes.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(crate::hashing::sha256(passphrase.as_bytes()))
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> PublicKey {
        let verifying_key = self.signing_key.verifying_key();
        let sec1_bytes = verifying_key.to_sec1_bytes();
        // SEC1 compressed public key is always exactly 33 bytes
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&sec1_bytes[..33]);
        PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979), returning a DER signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig: RawSignature = self.signing_key.sign(message);
        Signature(sig.to_der().as_bytes().to_vec())
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        // Zeroize secret key material
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}
