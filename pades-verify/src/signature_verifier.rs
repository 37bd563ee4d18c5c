// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PDF signature verifier (§4.5, C5): classifies a signature dictionary by
//! `/SubFilter`, recovers the bytes it actually signed from the revision
//! model (C4), and drives the CMS verifier (C3/`pades_cms`) and the
//! injected certificate path validator over it.

use chrono::{DateTime, TimeZone, Utc};
use pades_cms::{verify_embedded_timestamp, Certificate, CertificateKeyAlgorithm, PadesBinding, SignedData};

use crate::{
    cert_path::CertificatePathValidator,
    error::PadesError,
    pdf::{parser::SignatureDictionary, revisions::RevisionRecord},
    types::{
        PolicyValidationResult, PublicKeyType, SignatureResult, SignatureStatus,
        SignatureTimestamp, TimeValidationResult, TimeValidationType,
    },
};

/// Verify one content signature (not a document timestamp) found at
/// `signature_index` among `records`, recovering the bytes it actually
/// covers from `pdf_bytes` via C4 (§4.5 step 2). Never fails: a
/// structural/parse failure is captured into the returned result per §7's
/// propagation policy.
pub fn verify_signature(
    dict: &SignatureDictionary,
    pdf_bytes: &[u8],
    records: &[RevisionRecord],
    signature_index: usize,
    path_validator: &dyn CertificatePathValidator,
    reference_time: DateTime<Utc>,
) -> SignatureResult {
    match verify_signature_inner(
        dict,
        pdf_bytes,
        records,
        signature_index,
        path_validator,
        reference_time,
    ) {
        Ok(result) => result,
        Err(err) => bad_format_result(err),
    }
}

fn verify_signature_inner(
    dict: &SignatureDictionary,
    pdf_bytes: &[u8],
    records: &[RevisionRecord],
    signature_index: usize,
    path_validator: &dyn CertificatePathValidator,
    reference_time: DateTime<Utc>,
) -> Result<SignatureResult, PadesError> {
    let signed_bytes = crate::pdf::revisions::signed_document(pdf_bytes, records, signature_index)?;

    let signed_data = SignedData::parse_ber(&dict.contents).map_err(PadesError::CmsParse)?;

    let signer = signed_data
        .signers()
        .next()
        .ok_or_else(|| PadesError::CmsParse(pades_cms::CmsError::NoSignedAttributes))?;

    let (issuer, serial) = signer
        .certificate_issuer_and_serial()
        .ok_or(PadesError::NoSigningCertificate)?;

    let signer_certificate = signed_data
        .certificates()
        .find(|c| c.issuer() == issuer && c.serial_number() == serial)
        .cloned()
        .ok_or(PadesError::NoSigningCertificate)?;

    let chain: Vec<Certificate> = signed_data.certificates().cloned().collect();

    let mut policy_validation_results = Vec::new();
    // Tracks crypto/digest/algorithm/path failures, distinct from the
    // PAdES-binding-specific `invalid_sign_cert` flag (§3).
    let mut other_failure = false;

    let signed_content = signer.signed_content(Some(signed_bytes));
    let verifier = signer
        .signature_verifier(signed_data.certificates())
        .map_err(PadesError::CmsVerify)?;

    let signature_ok = verifier.verify(&signed_content, signer.signature()).is_ok();

    policy_validation_results.push(if signature_ok {
        PolicyValidationResult::passed("cms-signature")
    } else {
        other_failure = true;
        PolicyValidationResult::failed("cms-signature")
    });

    if let Some(attrs) = signer.signed_attributes() {
        let got_digest = signer.compute_digest(Some(signed_bytes));
        let digest_ok = attrs.message_digest() == got_digest.as_ref();
        policy_validation_results.push(if digest_ok {
            PolicyValidationResult::passed("message-digest")
        } else {
            other_failure = true;
            PolicyValidationResult::failed("message-digest")
        });
    }

    // §4.3 step 3: this flag reflects the PAdES ESS-binding check only,
    // not any other failure mode.
    let pades_binding = signer
        .verify_pades_binding(&signer_certificate)
        .map_err(PadesError::CmsVerify)?;
    let is_pades = pades_binding == PadesBinding::Valid;
    let invalid_sign_cert = pades_binding == PadesBinding::Invalid;
    if invalid_sign_cert {
        policy_validation_results.push(PolicyValidationResult::failed("pades-binding"));
    } else if is_pades {
        policy_validation_results.push(PolicyValidationResult::passed("pades-binding"));
    }

    if signer.verify_algorithm_protection().is_err() {
        other_failure = true;
        policy_validation_results.push(PolicyValidationResult::failed("algorithm-protection"));
    }

    // §4.5 step 5: recursively verify any embedded signature-timestamp
    // attesting to when this signature value was created. Its `genTime`,
    // when present, is a stronger reference time for path validation than
    // the caller-supplied/current wall clock (step 4).
    let mut signature_timestamp_list = Vec::new();
    let mut time_validation_results = Vec::new();
    let mut effective_reference_time = reference_time;

    if let Some(token) = signer
        .unsigned_attributes()
        .and_then(|attrs| attrs.time_stamp_token())
    {
        match verify_embedded_timestamp(token, signer.signature()) {
            Ok(verified) => {
                effective_reference_time = verified.gen_time;
                signature_timestamp_list.push(SignatureTimestamp {
                    genuine_time: verified.gen_time.timestamp(),
                    serial_number: format!("{:?}", verified.signer_certificate.serial_number()),
                });
                time_validation_results.push(TimeValidationResult {
                    iss: format!("{:?}", verified.signer_certificate.issuer()),
                    time: verified.gen_time.timestamp(),
                    kind: TimeValidationType::Tsa,
                    id: format!("{:?}", verified.signer_certificate.serial_number()),
                    policy_results: vec![PolicyValidationResult::passed("tsa-signature")],
                });
            }
            Err(err) => {
                other_failure = true;
                time_validation_results.push(TimeValidationResult {
                    iss: String::new(),
                    time: Utc.timestamp_opt(0, 0).single().unwrap_or(reference_time).timestamp(),
                    kind: TimeValidationType::Tsa,
                    id: String::new(),
                    policy_results: vec![PolicyValidationResult::failed("tsa-signature")],
                });
                log::debug!("embedded signature timestamp failed verification: {err}");
            }
        }
    }

    let validated_path = path_validator
        .validate(&signer_certificate, &chain, effective_reference_time)
        .map(|p| p.path)
        .unwrap_or_default();

    policy_validation_results.push(if validated_path.is_empty() {
        other_failure = true;
        PolicyValidationResult::failed("pkix-validation")
    } else {
        PolicyValidationResult::passed("pkix-validation")
    });

    let (public_key_type, key_length, named_curve) =
        describe_public_key(&signer_certificate);

    let covers_document = crate::pdf::revisions::covers_document(records, signature_index);

    let success = !invalid_sign_cert && !other_failure;

    let status = if success {
        SignatureStatus::Success
    } else if invalid_sign_cert {
        SignatureStatus::ErrorSignerInvalid
    } else {
        SignatureStatus::ErrorInvalidSignature
    };

    let serial_hex = format!("{:x?}", serial);
    let issuer_display = format!("{:?}", issuer);

    Ok(SignatureResult {
        success,
        status,
        signer_certificate: Some(signer_certificate),
        signature_certificate_chain: chain,
        validated_certificate_path: validated_path,
        covers_document,
        invalid_sign_cert,
        is_pades,
        public_key_type,
        key_length,
        named_curve,
        signature_algorithm_uri: format!("{:?}", signer.signature_algorithm()),
        cms_digest_alg: format!("{:?}", signer.digest_algorithm()),
        cms_sig_alg: format!("{:?}", signer.signature_algorithm()),
        cms_algo_protection_digest_alg: None,
        cms_algo_protection_sig_alg: None,
        claimed_signing_time: signer.signed_attributes().and_then(|a| a.signing_time()).map(|t| t.timestamp()),
        signature_timestamp_list,
        time_validation_results: {
            time_validation_results.push(TimeValidationResult {
                iss: issuer_display,
                time: reference_time.timestamp(),
                kind: TimeValidationType::Tsa,
                id: serial_hex,
                policy_results: policy_validation_results.clone(),
            });
            time_validation_results
        },
        policy_validation_results,
        svt_claims: None,
        svt_jwt: None,
    })
}

/// Public-key family, bit length, and (for EC) curve name for reporting.
/// `CertificatePublicKey` surfaces only the family, not the curve OID, so
/// EC key length/curve are read directly off the raw SPKI.
fn describe_public_key(certificate: &Certificate) -> (PublicKeyType, u32, Option<String>) {
    let public_key = certificate.public_key();

    match public_key.algorithm {
        CertificateKeyAlgorithm::Rsa => {
            (PublicKeyType::Rsa, (public_key.key.len() as u32) * 8, None)
        }
        CertificateKeyAlgorithm::Ec => {
            // An uncompressed SEC1 point is 2*field_bytes + 1 (leading 0x04).
            let bits = ((public_key.key.len().saturating_sub(1)) / 2) as u32 * 8;
            let name = match bits {
                256 => Some("secp256r1".to_string()),
                384 => Some("secp384r1".to_string()),
                _ => None,
            };
            (PublicKeyType::Ec, bits, name)
        }
        CertificateKeyAlgorithm::Ed25519 => {
            (PublicKeyType::EdDsa, (public_key.key.len() as u32) * 8, None)
        }
    }
}

fn bad_format_result(err: PadesError) -> SignatureResult {
    log::warn!("signature verification failed before a result could be built: {err}");

    SignatureResult {
        success: false,
        status: SignatureStatus::ErrorBadFormat,
        signer_certificate: None,
        signature_certificate_chain: Vec::new(),
        validated_certificate_path: Vec::new(),
        covers_document: false,
        invalid_sign_cert: false,
        is_pades: false,
        public_key_type: PublicKeyType::Other,
        key_length: 0,
        named_curve: None,
        signature_algorithm_uri: String::new(),
        cms_digest_alg: String::new(),
        cms_sig_alg: String::new(),
        cms_algo_protection_digest_alg: None,
        cms_algo_protection_sig_alg: None,
        claimed_signing_time: None,
        signature_timestamp_list: Vec::new(),
        time_validation_results: Vec::new(),
        policy_validation_results: vec![PolicyValidationResult::failed("bad-format")],
        svt_claims: None,
        svt_jwt: None,
    }
}
