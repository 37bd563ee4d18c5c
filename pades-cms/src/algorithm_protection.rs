// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The CMS algorithm-protection signed attribute (RFC 6211).
//!
//! This attribute lets a signer assert, inside the signed data itself,
//! which digest and signature algorithms it used — closing a gap where an
//! attacker could otherwise swap the outer `SignerInfo` algorithm
//! identifiers for weaker ones without invalidating the signature. When
//! present, it must agree with what the `SignerInfo` actually used.

use {
    crate::{asn1::rfc5280::AlgorithmIdentifier, CmsError, DigestAlgorithm, SignatureAlgorithm},
    bcder::Tag,
    std::ops::Deref,
};

/// `id-aa-cmsAlgorithmProtection`, RFC 6211 §3: 1.2.840.113549.1.9.16.2.70
pub const OID_CMS_ALGORITHM_PROTECTION: bcder::ConstOid =
    bcder::Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 16, 2, 70]);

/// The decoded `CMSAlgorithmProtection` attribute value.
#[derive(Clone, Debug)]
pub struct AlgorithmProtection {
    pub digest_algorithm: DigestAlgorithm,
    pub signature_algorithm: Option<SignatureAlgorithm>,
}

/// Extract the CMS algorithm-protection attribute from a signer's signed
/// attributes, if present.
pub fn extract_algorithm_protection(
    signed_attributes: &crate::asn1::rfc5652::SignedAttributes,
) -> Result<Option<AlgorithmProtection>, CmsError> {
    let attr = match signed_attributes
        .iter()
        .find(|attr| attr.typ == OID_CMS_ALGORITHM_PROTECTION)
    {
        Some(attr) => attr,
        None => return Ok(None),
    };

    let value = attr
        .values
        .get(0)
        .ok_or(CmsError::MalformedSignedAttributeAlgorithmProtection)?
        .deref()
        .clone();

    let (digest, signature) = value
        .decode(|cons| {
            cons.take_sequence(|cons| {
                let digest_algorithm = AlgorithmIdentifier::take_from(cons)?;
                let signature_algorithm =
                    cons.take_opt_constructed_if(Tag::CTX_1, AlgorithmIdentifier::take_from)?;
                let _mac_algorithm =
                    cons.take_opt_constructed_if(Tag::CTX_2, AlgorithmIdentifier::take_from)?;

                Ok((digest_algorithm, signature_algorithm))
            })
        })
        .map_err(|_| CmsError::MalformedSignedAttributeAlgorithmProtection)?;

    let digest_algorithm = DigestAlgorithm::try_from(&digest)?;
    let signature_algorithm = signature
        .as_ref()
        .map(SignatureAlgorithm::try_from)
        .transpose()?;

    Ok(Some(AlgorithmProtection {
        digest_algorithm,
        signature_algorithm,
    }))
}

/// Cross-check a decoded algorithm-protection attribute against the
/// algorithms the `SignerInfo` actually used.
///
/// Per RFC 6211 §4, a mismatch on either algorithm is a verification
/// failure, not merely a warning.
pub fn check_algorithm_protection(
    protection: &AlgorithmProtection,
    digest_algorithm: DigestAlgorithm,
    signature_algorithm: SignatureAlgorithm,
) -> Result<(), CmsError> {
    if protection.digest_algorithm != digest_algorithm {
        return Err(CmsError::AlgorithmProtectionMismatch);
    }

    if let Some(protected_sig) = protection.signature_algorithm {
        if protected_sig != signature_algorithm {
            return Err(CmsError::AlgorithmProtectionMismatch);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_digest_is_rejected() {
        let protection = AlgorithmProtection {
            digest_algorithm: DigestAlgorithm::Sha256,
            signature_algorithm: None,
        };

        assert!(check_algorithm_protection(
            &protection,
            DigestAlgorithm::Sha1,
            SignatureAlgorithm::Sha256Rsa
        )
        .is_err());
    }

    #[test]
    fn matching_algorithms_are_accepted() {
        let protection = AlgorithmProtection {
            digest_algorithm: DigestAlgorithm::Sha256,
            signature_algorithm: Some(SignatureAlgorithm::Sha256Rsa),
        };

        assert!(check_algorithm_protection(
            &protection,
            DigestAlgorithm::Sha256,
            SignatureAlgorithm::Sha256Rsa
        )
        .is_ok());
    }
}
