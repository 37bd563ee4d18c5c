// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! ASN.1 type definitions from RFC 2634 and RFC 5035 (ESS signing-certificate
attributes).

`IssuerSerial` is captured but not decoded further: the PAdES binding check
only needs the certificate hash, not the issuer/serial cross-reference. */

use {
    crate::asn1::rfc5280::AlgorithmIdentifier,
    bcder::{
        decode::{Constructed, Source},
        Captured, OctetString,
    },
};

/// `id-aa-signingCertificate`, RFC 2634 §5.4: 1.2.840.113549.1.9.16.2.12
pub const OID_SIGNING_CERTIFICATE: bcder::ConstOid =
    bcder::Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 12]);

/// `id-aa-signingCertificateV2`, RFC 5035 §3: 1.2.840.113549.1.9.16.2.47
pub const OID_SIGNING_CERTIFICATE_V2: bcder::ConstOid =
    bcder::Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 47]);

/// ```ASN.1
/// ESSCertID ::= SEQUENCE {
///   certHash      Hash,      -- SHA-1 hash of entire certificate
///   issuerSerial  IssuerSerial OPTIONAL }
/// ```
#[derive(Clone, Debug)]
pub struct EssCertId {
    pub cert_hash: OctetString,
    pub issuer_serial: Option<Captured>,
}

impl EssCertId {
    pub fn take_from<S: Source>(cons: &mut Constructed<S>) -> Result<Self, S::Err> {
        cons.take_sequence(Self::take_sequence)
    }

    pub fn take_opt_from<S: Source>(cons: &mut Constructed<S>) -> Result<Option<Self>, S::Err> {
        cons.take_opt_sequence(Self::take_sequence)
    }

    fn take_sequence<S: Source>(cons: &mut Constructed<S>) -> Result<Self, S::Err> {
        let cert_hash = OctetString::take_from(cons)?;
        let issuer_serial = cons.capture_all()?;
        let issuer_serial = if issuer_serial.is_empty() {
            None
        } else {
            Some(issuer_serial)
        };

        Ok(Self {
            cert_hash,
            issuer_serial,
        })
    }
}

/// ```ASN.1
/// SigningCertificate ::= SEQUENCE {
///   certs     SEQUENCE OF ESSCertID,
///   policies  SEQUENCE OF PolicyInformation OPTIONAL }
/// ```
#[derive(Clone, Debug)]
pub struct SigningCertificate {
    pub certs: Vec<EssCertId>,
}

impl SigningCertificate {
    pub fn take_from<S: Source>(cons: &mut Constructed<S>) -> Result<Self, S::Err> {
        cons.take_sequence(|cons| {
            let certs = cons.take_sequence(|cons| {
                let mut certs = Vec::new();
                while let Some(cert) = EssCertId::take_opt_from(cons)? {
                    certs.push(cert);
                }
                Ok(certs)
            })?;

            // `policies`, if present, isn't consulted by PAdES binding.
            cons.capture_all()?;

            Ok(Self { certs })
        })
    }
}

/// ```ASN.1
/// ESSCertIDv2 ::= SEQUENCE {
///   hashAlgorithm  AlgorithmIdentifier DEFAULT { algorithm id-sha256 },
///   certHash       Hash,
///   issuerSerial   IssuerSerial OPTIONAL }
/// ```
#[derive(Clone, Debug)]
pub struct EssCertIdV2 {
    /// Absent means the default, SHA-256.
    pub hash_algorithm: Option<AlgorithmIdentifier>,
    pub cert_hash: OctetString,
    pub issuer_serial: Option<Captured>,
}

impl EssCertIdV2 {
    pub fn take_from<S: Source>(cons: &mut Constructed<S>) -> Result<Self, S::Err> {
        cons.take_sequence(Self::take_sequence)
    }

    pub fn take_opt_from<S: Source>(cons: &mut Constructed<S>) -> Result<Option<Self>, S::Err> {
        cons.take_opt_sequence(Self::take_sequence)
    }

    fn take_sequence<S: Source>(cons: &mut Constructed<S>) -> Result<Self, S::Err> {
        // The tricky bit: the optional `hashAlgorithm` is itself a SEQUENCE
        // (an AlgorithmIdentifier), while `certHash` is a primitive OCTET
        // STRING. `take_opt_from` on AlgorithmIdentifier only succeeds if
        // the next TLV is a constructed SEQUENCE, so it correctly returns
        // `None` and leaves the cursor untouched when the encoder omitted
        // the default and went straight to the hash.
        let hash_algorithm = AlgorithmIdentifier::take_opt_from(cons)?;
        let cert_hash = OctetString::take_from(cons)?;
        let issuer_serial = cons.capture_all()?;
        let issuer_serial = if issuer_serial.is_empty() {
            None
        } else {
            Some(issuer_serial)
        };

        Ok(Self {
            hash_algorithm,
            cert_hash,
            issuer_serial,
        })
    }
}

/// ```ASN.1
/// SigningCertificateV2 ::= SEQUENCE {
///   certs     SEQUENCE OF ESSCertIDv2,
///   policies  SEQUENCE OF PolicyInformation OPTIONAL }
/// ```
#[derive(Clone, Debug)]
pub struct SigningCertificateV2 {
    pub certs: Vec<EssCertIdV2>,
}

impl SigningCertificateV2 {
    pub fn take_from<S: Source>(cons: &mut Constructed<S>) -> Result<Self, S::Err> {
        cons.take_sequence(|cons| {
            let certs = cons.take_sequence(|cons| {
                let mut certs = Vec::new();
                while let Some(cert) = EssCertIdV2::take_opt_from(cons)? {
                    certs.push(cert);
                }
                Ok(certs)
            })?;

            cons.capture_all()?;

            Ok(Self { certs })
        })
    }
}
