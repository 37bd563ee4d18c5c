// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {
    crate::CmsError,
    bcder::{ConstOid, Oid},
    bytes::Bytes,
    ring::{
        digest::SHA256,
        signature::{EcdsaKeyPair, Ed25519KeyPair, RsaKeyPair, VerificationAlgorithm},
    },
    std::convert::TryFrom,
};

/// SHA-1 digest algorithm.
///
/// 1.3.14.3.2.26
const OID_SHA1: ConstOid = Oid(&[43, 14, 3, 2, 26]);

/// SHA-256 digest algorithm.
///
/// 2.16.840.1.101.3.4.2.1
const OID_SHA256: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 1]);

/// SHA-384 digest algorithm.
///
/// 2.16.840.1.101.3.4.2.2
const OID_SHA384: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 2]);

/// SHA-512 digest algorithm.
///
/// 2.16.840.1.101.3.4.2.3
const OID_SHA512: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 3]);

/// RSA+SHA-1 encryption.
///
/// 1.2.840.113549.1.1.5
const OID_SHA1_RSA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 5]);

/// RSA+SHA-256 encryption.
///
/// 1.2.840.113549.1.1.11
const OID_SHA256_RSA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 11]);

/// RSA+SHA-384 encryption.
///
/// 1.2.840.113549.1.1.12
const OID_SHA384_RSA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 12]);

/// RSA+SHA-512 encryption.
///
/// 1.2.840.113549.1.1.13
const OID_SHA512_RSA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 13]);

/// RSAES-PKCS1-v1_5
///
/// 1.2.840.113549.1.1.1
const OID_RSAES_PKCS_V15: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 1]);

/// RSA encryption.
///
/// 1.2.840.113549.1.1.1
const OID_RSA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 1]);

/// ECDSA with SHA-256.
///
/// 1.2.840.10045.4.3.2
const OID_ECDSA_SHA256: ConstOid = Oid(&[42, 134, 72, 206, 61, 4, 3, 2]);

/// ECDSA with SHA-384.
///
/// 1.2.840.10045.4.3.3
const OID_ECDSA_SHA384: ConstOid = Oid(&[42, 134, 72, 206, 61, 4, 3, 3]);

/// Ed25519.
///
/// 1.3.101.112
const OID_ED25519: ConstOid = Oid(&[43, 101, 112]);

/// Elliptic curve public key cryptography.
///
/// 1.2.840.10045.2.1
const OID_EC_PUBLIC_KEY: ConstOid = Oid(&[42, 134, 72, 206, 61, 2, 1]);

/// A hashing algorithm used for digesting data.
///
/// Covers every digest the PAdES algorithm registry recognizes: the
/// message-digest signed attribute, the ESSCertID(v2) hash, and the
/// RFC 3161 message imprint can each independently use any of these.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DigestAlgorithm {
    /// SHA-1. Only accepted where a spec explicitly permits it (ESSCertID).
    ///
    /// Corresponds to OID 1.3.14.3.2.26.
    Sha1,

    /// SHA-256.
    ///
    /// Corresponds to OID 2.16.840.1.101.3.4.2.1.
    Sha256,

    /// SHA-384.
    ///
    /// Corresponds to OID 2.16.840.1.101.3.4.2.2.
    Sha384,

    /// SHA-512.
    ///
    /// Corresponds to OID 2.16.840.1.101.3.4.2.3.
    Sha512,
}

impl TryFrom<&Oid> for DigestAlgorithm {
    type Error = CmsError;

    fn try_from(v: &Oid) -> Result<Self, Self::Error> {
        if v == &OID_SHA1 {
            Ok(Self::Sha1)
        } else if v == &OID_SHA256 {
            Ok(Self::Sha256)
        } else if v == &OID_SHA384 {
            Ok(Self::Sha384)
        } else if v == &OID_SHA512 {
            Ok(Self::Sha512)
        } else {
            Err(CmsError::UnknownDigestAlgorithm(v.clone()))
        }
    }
}

impl TryFrom<&crate::asn1::rfc5652::DigestAlgorithmIdentifier> for DigestAlgorithm {
    type Error = CmsError;

    fn try_from(v: &crate::asn1::rfc5652::DigestAlgorithmIdentifier) -> Result<Self, Self::Error> {
        Self::try_from(&v.algorithm)
    }
}

impl TryFrom<&crate::asn1::rfc5280::AlgorithmIdentifier> for DigestAlgorithm {
    type Error = CmsError;

    fn try_from(v: &crate::asn1::rfc5280::AlgorithmIdentifier) -> Result<Self, Self::Error> {
        Self::try_from(&v.algorithm)
    }
}

impl From<DigestAlgorithm> for Oid {
    fn from(alg: DigestAlgorithm) -> Self {
        let oid = match alg {
            DigestAlgorithm::Sha1 => OID_SHA1,
            DigestAlgorithm::Sha256 => OID_SHA256,
            DigestAlgorithm::Sha384 => OID_SHA384,
            DigestAlgorithm::Sha512 => OID_SHA512,
        };

        Oid(Bytes::copy_from_slice(oid.as_ref()))
    }
}

impl From<DigestAlgorithm> for crate::asn1::rfc5652::DigestAlgorithmIdentifier {
    fn from(alg: DigestAlgorithm) -> Self {
        Self {
            algorithm: alg.into(),
            parameters: None,
        }
    }
}

impl DigestAlgorithm {
    /// Create a new content hasher for this algorithm.
    pub fn as_hasher(&self) -> ring::digest::Context {
        match self {
            Self::Sha1 => ring::digest::Context::new(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY),
            Self::Sha256 => ring::digest::Context::new(&SHA256),
            Self::Sha384 => ring::digest::Context::new(&ring::digest::SHA384),
            Self::Sha512 => ring::digest::Context::new(&ring::digest::SHA512),
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// An algorithm used to digitally sign content.
///
/// Instances can be converted to/from the underlying ASN.1 type and
/// OIDs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SignatureAlgorithm {
    /// SHA-1 with RSA encryption.
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.5.
    Sha1Rsa,

    /// SHA-256 with RSA encryption.
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.11.
    Sha256Rsa,

    /// SHA-384 with RSA encryption.
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.12.
    Sha384Rsa,

    /// SHA-512 with RSA encryption.
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.13.
    Sha512Rsa,

    /// RSAES-PKCS1-v1_5 encryption scheme.
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.1.
    RsaesPkcsV15,

    /// ECDSA with SHA-256.
    ///
    /// Corresponds to OID 1.2.840.10045.4.3.2.
    EcdsaSha256,

    /// ECDSA with SHA-384.
    ///
    /// Corresponds to OID 1.2.840.10045.4.3.3.
    EcdsaSha384,

    /// Ed25519.
    ///
    /// Corresponds to OID 1.3.101.112.
    Ed25519,
}

impl SignatureAlgorithm {
    /// Convert this algorithm into a verification algorithm.
    ///
    /// This enables you to easily obtain a ring signature verified based on
    /// the type of algorithm.
    pub fn as_verification_algorithm(&self) -> &'static dyn VerificationAlgorithm {
        match self {
            SignatureAlgorithm::Sha1Rsa => {
                &ring::signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY
            }
            SignatureAlgorithm::Sha256Rsa => &ring::signature::RSA_PKCS1_2048_8192_SHA256,
            SignatureAlgorithm::Sha384Rsa => &ring::signature::RSA_PKCS1_2048_8192_SHA384,
            SignatureAlgorithm::Sha512Rsa => &ring::signature::RSA_PKCS1_2048_8192_SHA512,
            SignatureAlgorithm::RsaesPkcsV15 => {
                &ring::signature::RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY
            }
            SignatureAlgorithm::EcdsaSha256 => &ring::signature::ECDSA_P256_SHA256_ASN1,
            SignatureAlgorithm::EcdsaSha384 => &ring::signature::ECDSA_P384_SHA384_ASN1,
            SignatureAlgorithm::Ed25519 => &ring::signature::ED25519,
        }
    }

    /// The digest algorithm this signature algorithm implies, when it binds
    /// one directly (RSA PKCS#1 and ECDSA variants do; Ed25519 and the
    /// generic RSA encryption OID don't, since they hash internally or are
    /// hash-agnostic).
    pub fn digest_algorithm(&self) -> Option<DigestAlgorithm> {
        match self {
            Self::Sha1Rsa => Some(DigestAlgorithm::Sha1),
            Self::Sha256Rsa | Self::EcdsaSha256 => Some(DigestAlgorithm::Sha256),
            Self::Sha384Rsa | Self::EcdsaSha384 => Some(DigestAlgorithm::Sha384),
            Self::Sha512Rsa => Some(DigestAlgorithm::Sha512),
            Self::RsaesPkcsV15 | Self::Ed25519 => None,
        }
    }
}

impl TryFrom<&Oid> for SignatureAlgorithm {
    type Error = CmsError;

    fn try_from(v: &Oid) -> Result<Self, Self::Error> {
        if v == &OID_SHA1_RSA {
            Ok(Self::Sha1Rsa)
        } else if v == &OID_SHA256_RSA {
            Ok(Self::Sha256Rsa)
        } else if v == &OID_SHA384_RSA {
            Ok(Self::Sha384Rsa)
        } else if v == &OID_SHA512_RSA {
            Ok(Self::Sha512Rsa)
        } else if v == &OID_RSAES_PKCS_V15 {
            Ok(Self::RsaesPkcsV15)
        } else if v == &OID_ECDSA_SHA256 {
            Ok(Self::EcdsaSha256)
        } else if v == &OID_ECDSA_SHA384 {
            Ok(Self::EcdsaSha384)
        } else if v == &OID_ED25519 {
            Ok(Self::Ed25519)
        } else {
            Err(CmsError::UnknownSignatureAlgorithm(v.clone()))
        }
    }
}

impl TryFrom<&crate::asn1::rfc5652::SignatureAlgorithmIdentifier> for SignatureAlgorithm {
    type Error = CmsError;

    fn try_from(
        v: &crate::asn1::rfc5652::SignatureAlgorithmIdentifier,
    ) -> Result<Self, Self::Error> {
        Self::try_from(&v.algorithm)
    }
}

impl From<SignatureAlgorithm> for Oid {
    fn from(v: SignatureAlgorithm) -> Self {
        let oid = match v {
            SignatureAlgorithm::Sha1Rsa => OID_SHA1_RSA,
            SignatureAlgorithm::Sha256Rsa => OID_SHA256_RSA,
            SignatureAlgorithm::Sha384Rsa => OID_SHA384_RSA,
            SignatureAlgorithm::Sha512Rsa => OID_SHA512_RSA,
            SignatureAlgorithm::RsaesPkcsV15 => OID_RSAES_PKCS_V15,
            SignatureAlgorithm::EcdsaSha256 => OID_ECDSA_SHA256,
            SignatureAlgorithm::EcdsaSha384 => OID_ECDSA_SHA384,
            SignatureAlgorithm::Ed25519 => OID_ED25519,
        };

        Oid(Bytes::copy_from_slice(oid.as_ref()))
    }
}

impl From<SignatureAlgorithm> for crate::asn1::rfc5652::SignatureAlgorithmIdentifier {
    fn from(alg: SignatureAlgorithm) -> Self {
        Self {
            algorithm: alg.into(),
            parameters: None,
        }
    }
}

/// An algorithm used to digitally sign content.
///
/// Instances can be converted to/from the underlying ASN.1 type and
/// OIDs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CertificateKeyAlgorithm {
    /// RSA
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.1.
    Rsa,

    /// Corresponds to OID 1.2.840.10045.2.1
    Ec,

    /// Ed25519
    ///
    /// Corresponds to OID 1.3.101.112.
    Ed25519,
}

impl TryFrom<&Oid> for CertificateKeyAlgorithm {
    type Error = CmsError;

    fn try_from(v: &Oid) -> Result<Self, Self::Error> {
        if v == &OID_RSA {
            Ok(Self::Rsa)
        } else if v == &OID_EC_PUBLIC_KEY {
            Ok(Self::Ec)
        } else if v == &OID_ED25519 {
            Ok(Self::Ed25519)
        } else {
            Err(CmsError::UnknownSignatureAlgorithm(v.clone()))
        }
    }
}

impl TryFrom<&crate::asn1::rfc5280::AlgorithmIdentifier> for CertificateKeyAlgorithm {
    type Error = CmsError;

    fn try_from(v: &crate::asn1::rfc5280::AlgorithmIdentifier) -> Result<Self, Self::Error> {
        Self::try_from(&v.algorithm)
    }
}

impl From<CertificateKeyAlgorithm> for Oid {
    fn from(v: CertificateKeyAlgorithm) -> Self {
        match v {
            CertificateKeyAlgorithm::Rsa => Oid(Bytes::copy_from_slice(OID_RSA.as_ref())),
            CertificateKeyAlgorithm::Ec => Oid(Bytes::copy_from_slice(OID_EC_PUBLIC_KEY.as_ref())),
            CertificateKeyAlgorithm::Ed25519 => Oid(Bytes::copy_from_slice(OID_ED25519.as_ref())),
        }
    }
}

/// secp256r1 (NIST P-256).
///
/// 1.2.840.10045.3.1.7
const OID_EC_SECP256R1: ConstOid = Oid(&[42, 134, 72, 206, 61, 3, 1, 7]);

/// secp384r1 (NIST P-384).
///
/// 1.3.132.0.34
const OID_EC_SECP384R1: ConstOid = Oid(&[43, 129, 4, 0, 34]);

/// A named elliptic curve, as identified by the `namedCurve` OID inside an
/// EC `SubjectPublicKeyInfo`'s algorithm parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EllipticCurve {
    Secp256r1,
    Secp384r1,
}

impl EllipticCurve {
    /// The curve's conventional name and field size in bits, for reporting
    /// in certificate metadata.
    pub fn name_and_key_length_bits(&self) -> (&'static str, u32) {
        match self {
            Self::Secp256r1 => ("secp256r1", 256),
            Self::Secp384r1 => ("secp384r1", 384),
        }
    }
}

impl TryFrom<&Oid> for EllipticCurve {
    type Error = CmsError;

    fn try_from(v: &Oid) -> Result<Self, Self::Error> {
        if v == &OID_EC_SECP256R1 {
            Ok(Self::Secp256r1)
        } else if v == &OID_EC_SECP384R1 {
            Ok(Self::Secp384r1)
        } else {
            Err(CmsError::UnknownSignatureAlgorithm(v.clone()))
        }
    }
}

/// Represents a key used for signing content.
///
/// This is a wrapper around ring's key types supporting signing. We only
/// care about the private key as this type should only be used for signing.
#[derive(Debug)]
pub enum SigningKey {
    /// ECDSA key pair.
    Ecdsa(EcdsaKeyPair),

    /// ED25519 key pair.
    Ed25519(Ed25519KeyPair),

    /// RSA key pair.
    Rsa(RsaKeyPair),
}

impl SigningKey {
    /// Sign a message using this signing key.
    ///
    /// Returns the raw bytes constituting the signature.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CmsError> {
        match self {
            Self::Rsa(key) => {
                let mut signature = vec![0; key.public_modulus_len()];

                key.sign(
                    &ring::signature::RSA_PKCS1_SHA256,
                    &ring::rand::SystemRandom::new(),
                    message,
                    &mut signature,
                )
                .map_err(|_| CmsError::SignatureCreation)?;

                Ok(signature)
            }
            Self::Ecdsa(key) => {
                let signature = key
                    .sign(&ring::rand::SystemRandom::new(), message)
                    .map_err(|_| CmsError::SignatureCreation)?;

                Ok(signature.as_ref().to_vec())
            }
            Self::Ed25519(key) => {
                let signature = key.sign(message);

                Ok(signature.as_ref().to_vec())
            }
        }
    }
}

impl From<EcdsaKeyPair> for SigningKey {
    fn from(key: EcdsaKeyPair) -> Self {
        Self::Ecdsa(key)
    }
}

impl From<Ed25519KeyPair> for SigningKey {
    fn from(key: Ed25519KeyPair) -> Self {
        Self::Ed25519(key)
    }
}

impl From<RsaKeyPair> for SigningKey {
    fn from(key: RsaKeyPair) -> Self {
        Self::Rsa(key)
    }
}

impl From<&SigningKey> for SignatureAlgorithm {
    fn from(key: &SigningKey) -> Self {
        match key {
            SigningKey::Rsa(_) => SignatureAlgorithm::Sha256Rsa,
            SigningKey::Ecdsa(_) => SignatureAlgorithm::EcdsaSha256,
            SigningKey::Ed25519(_) => SignatureAlgorithm::Ed25519,
        }
    }
}

/// A JWS `alg` header value, per RFC 7518.
///
/// The PAdES algorithm registry (C1) uses this to name the algorithm an
/// SVT's JWS envelope was signed with, and to map a PDF signature's CMS
/// digest/signature algorithm pair onto the equivalent JWS name when
/// producing an SVT claim set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum JwsAlgorithm {
    Rs256,
    Rs384,
    Rs512,
    Es256,
    Es384,
    EdDsa,
}

impl JwsAlgorithm {
    /// The `alg` string as it appears in a JOSE header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
            Self::Es256 => "ES256",
            Self::Es384 => "ES384",
            Self::EdDsa => "EdDSA",
        }
    }

    /// The digest algorithm this JWS algorithm implies, per the algorithm
    /// registry's `URI → JWS algorithm identifier` lookup run in reverse:
    /// every claim-set hash inside an SVT signed with this `alg` uses this
    /// digest.
    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        match self {
            Self::Rs256 | Self::Es256 => DigestAlgorithm::Sha256,
            Self::Rs384 | Self::Es384 => DigestAlgorithm::Sha384,
            Self::Rs512 => DigestAlgorithm::Sha512,
            // Ed25519 signs over an unhashed message internally (RFC 8032);
            // SHA-512 is the conventional digest for SVT claim hashing.
            Self::EdDsa => DigestAlgorithm::Sha512,
        }
    }
}

impl std::str::FromStr for JwsAlgorithm {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RS256" => Ok(Self::Rs256),
            "RS384" => Ok(Self::Rs384),
            "RS512" => Ok(Self::Rs512),
            "ES256" => Ok(Self::Es256),
            "ES384" => Ok(Self::Es384),
            "EdDSA" => Ok(Self::EdDsa),
            _ => Err(CmsError::UnknownSignatureAlgorithm(Oid(Bytes::new()))),
        }
    }
}

impl TryFrom<SignatureAlgorithm> for JwsAlgorithm {
    type Error = CmsError;

    /// Maps a CMS signature algorithm onto its JWS equivalent. Fails for
    /// algorithms JWS has no registered name for (the generic RSA
    /// encryption OID, used only for key-wrap, never for signing).
    fn try_from(v: SignatureAlgorithm) -> Result<Self, Self::Error> {
        match v {
            SignatureAlgorithm::Sha256Rsa => Ok(Self::Rs256),
            SignatureAlgorithm::Sha384Rsa => Ok(Self::Rs384),
            SignatureAlgorithm::Sha512Rsa => Ok(Self::Rs512),
            SignatureAlgorithm::EcdsaSha256 => Ok(Self::Es256),
            SignatureAlgorithm::EcdsaSha384 => Ok(Self::Es384),
            SignatureAlgorithm::Ed25519 => Ok(Self::EdDsa),
            SignatureAlgorithm::Sha1Rsa | SignatureAlgorithm::RsaesPkcsV15 => {
                Err(CmsError::UnknownSignatureAlgorithm(v.into()))
            }
        }
    }
}

#[cfg(test)]
mod algorithm_tests {
    use super::*;

    #[test]
    fn jws_algorithm_round_trips() {
        for alg in [
            JwsAlgorithm::Rs256,
            JwsAlgorithm::Rs384,
            JwsAlgorithm::Rs512,
            JwsAlgorithm::Es256,
            JwsAlgorithm::Es384,
            JwsAlgorithm::EdDsa,
        ] {
            assert_eq!(alg.as_str().parse::<JwsAlgorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn signature_algorithm_maps_to_jws() {
        assert_eq!(
            JwsAlgorithm::try_from(SignatureAlgorithm::Sha256Rsa).unwrap(),
            JwsAlgorithm::Rs256
        );
        assert!(JwsAlgorithm::try_from(SignatureAlgorithm::Sha1Rsa).is_err());
    }

    #[test]
    fn elliptic_curve_oids_resolve_to_key_length() {
        let p256 = EllipticCurve::try_from(&Oid(Bytes::copy_from_slice(
            OID_EC_SECP256R1.as_ref(),
        )))
        .unwrap();
        assert_eq!(p256.name_and_key_length_bits(), ("secp256r1", 256));

        let p384 = EllipticCurve::try_from(&Oid(Bytes::copy_from_slice(
            OID_EC_SECP384R1.as_ref(),
        )))
        .unwrap();
        assert_eq!(p384.name_and_key_length_bits(), ("secp384r1", 384));
    }
}
