// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVT matcher & consumer (§4.6, C6). Verifies each candidate SVT's JWS,
//! then binds it to the first content signature whose signature-value
//! digest matches the SVT's `sig_ref.sig_hash`.

use base64::{decode as base64_decode, encode as base64_encode};
use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::warn;
use pades_cms::{Certificate, CertificateKeyAlgorithm};

use crate::{
    cert_path::CertificatePathValidator,
    error::PadesError,
    svt::claims::{ClaimConclusion, SvtClaimSet, TimeValType},
    types::{
        PolicyConclusion, PolicyValidationResult, PublicKeyType, SignatureResult,
        TimeValidationResult, TimeValidationType,
    },
};

fn jws_algorithm_for(alg: pades_cms::JwsAlgorithm) -> Algorithm {
    match alg {
        pades_cms::JwsAlgorithm::Rs256 => Algorithm::RS256,
        pades_cms::JwsAlgorithm::Rs384 => Algorithm::RS384,
        pades_cms::JwsAlgorithm::Rs512 => Algorithm::RS512,
        pades_cms::JwsAlgorithm::Es256 => Algorithm::ES256,
        pades_cms::JwsAlgorithm::Es384 => Algorithm::ES384,
        pades_cms::JwsAlgorithm::EdDsa => Algorithm::EdDSA,
    }
}

fn decoding_key_for(certificate: &Certificate) -> Result<DecodingKey, PadesError> {
    let public_key = certificate.public_key();

    match public_key.algorithm {
        CertificateKeyAlgorithm::Rsa => Ok(DecodingKey::from_rsa_der(&public_key.key)),
        CertificateKeyAlgorithm::Ec => Ok(DecodingKey::from_ec_der(&public_key.key)),
        CertificateKeyAlgorithm::Ed25519 => Ok(DecodingKey::from_ed_der(&public_key.key)),
    }
}

/// A verified SVT: its claims, the issuer certificate chain from `x5c`,
/// and the JWS algorithm it was signed with.
pub struct VerifiedSvt {
    pub claims: SvtClaimSet,
    pub jws: String,
    pub jws_algorithm: pades_cms::JwsAlgorithm,
    pub issuer_chain: Vec<Certificate>,
}

/// Verify one candidate SVT JWS: its header names a registry-recognized
/// algorithm, its `x5c` chain validates via the external path validator,
/// and its signature verifies against the leaf certificate in that chain.
pub fn verify_svt_jws(
    jws: &str,
    path_validator: &dyn CertificatePathValidator,
) -> Result<VerifiedSvt, PadesError> {
    let header = decode_header(jws).map_err(|e| PadesError::SvtParse(e.to_string()))?;

    let jws_algorithm: pades_cms::JwsAlgorithm = header
        .alg
        .to_string()
        .parse()
        .map_err(|_| PadesError::UnsupportedAlgorithm(format!("{:?}", header.alg)))?;

    let x5c = header
        .x5c
        .ok_or_else(|| PadesError::SvtParse("missing x5c header".into()))?;

    let chain_certs = x5c
        .iter()
        .map(|entry| {
            let der = base64_decode(entry)?;
            Certificate::from_der(&der).map_err(|e| PadesError::SvtParse(e.to_string()))
        })
        .collect::<Result<Vec<_>, PadesError>>()?;

    let issuer = chain_certs
        .first()
        .ok_or_else(|| PadesError::SvtParse("empty x5c chain".into()))?;

    path_validator
        .validate(issuer, &chain_certs[1..], Utc::now())
        .map_err(|e| PadesError::CertPathFailure(e.to_string()))?;

    let decoding_key = decoding_key_for(issuer)?;

    let mut validation = Validation::new(jws_algorithm_for(jws_algorithm));
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<SvtClaimSet>(jws, &decoding_key, &validation)
        .map_err(|e| PadesError::SvtVerify(e.to_string()))?;

    Ok(VerifiedSvt {
        claims: token_data.claims,
        jws: jws.to_string(),
        jws_algorithm,
        issuer_chain: chain_certs,
    })
}

/// §4.6 step 2: bind a verified SVT to the first content signature whose
/// signature-value digest matches `sig_ref.sig_hash`. Returns the index
/// into `signature_values`, if any.
pub fn bind_svt_to_signature(svt: &VerifiedSvt, signature_values: &[&[u8]]) -> Option<usize> {
    let digest_algorithm = svt.jws_algorithm.digest_algorithm();

    signature_values.iter().position(|sig_value| {
        let mut hasher = digest_algorithm.as_hasher();
        hasher.update(sig_value);
        let computed = base64_encode(hasher.finish().as_ref());
        computed == svt.claims.sig_ref.sig_hash
    })
}

/// Apply a bound SVT to produce the signature's final result (§4.6).
pub fn apply_svt(svt: &VerifiedSvt, base: SignatureResult) -> SignatureResult {
    let mut policy_validation_results: Vec<PolicyValidationResult> = svt
        .claims
        .sig_val
        .iter()
        .map(|p| PolicyValidationResult {
            policy_id: p.pol.clone(),
            conclusion: match p.res {
                ClaimConclusion::Passed => PolicyConclusion::Passed,
                ClaimConclusion::Failed => PolicyConclusion::Failed,
                ClaimConclusion::Indeterminate => PolicyConclusion::Indeterminate,
            },
        })
        .collect();

    let mut time_validation_results: Vec<TimeValidationResult> = svt
        .claims
        .time_val
        .iter()
        .map(|t| TimeValidationResult {
            iss: t.iss.clone(),
            time: t.time,
            kind: match t.kind {
                TimeValType::Tsa => TimeValidationType::Tsa,
                TimeValType::Svt => TimeValidationType::Svt,
            },
            id: t.id.clone(),
            policy_results: t
                .val
                .iter()
                .map(|p| PolicyValidationResult {
                    policy_id: p.pol.clone(),
                    conclusion: p.res.into(),
                })
                .collect(),
        })
        .collect();

    // The doc-timestamp transporting this SVT is itself a verified point
    // in time; chained SVTs need this entry to carry forward.
    time_validation_results.push(TimeValidationResult {
        iss: svt.claims.iss.clone(),
        time: svt.claims.iat,
        kind: TimeValidationType::Svt,
        id: svt.claims.jti.clone(),
        policy_results: vec![PolicyValidationResult::passed("pkix-validation")],
    });

    let success = policy_validation_results
        .iter()
        .all(|p| p.conclusion == PolicyConclusion::Passed);

    let (public_key_type, key_length, named_curve) = match svt.issuer_chain.first() {
        Some(cert) => match cert.public_key().algorithm {
            CertificateKeyAlgorithm::Rsa => (PublicKeyType::Rsa, base.key_length, None),
            CertificateKeyAlgorithm::Ec => (PublicKeyType::Ec, base.key_length, base.named_curve),
            CertificateKeyAlgorithm::Ed25519 => (PublicKeyType::EdDsa, base.key_length, None),
        },
        None => (base.public_key_type, base.key_length, base.named_curve),
    };

    if policy_validation_results.is_empty() {
        policy_validation_results = base.policy_validation_results;
    }

    if svt.claims.iat <= 0 {
        warn!("SVT {} has a non-positive issuance time", svt.claims.jti);
    }
    let _ = Utc.timestamp_opt(svt.claims.iat, 0);

    SignatureResult {
        success,
        status: if success {
            crate::types::SignatureStatus::Success
        } else {
            crate::types::SignatureStatus::ErrorInvalidSignature
        },
        signature_algorithm_uri: svt.jws_algorithm.as_str().to_string(),
        public_key_type,
        key_length,
        named_curve,
        signature_timestamp_list: Vec::new(),
        time_validation_results,
        policy_validation_results,
        svt_claims: Some(svt.claims.clone()),
        svt_jwt: Some(svt.jws.clone()),
        ..base
    }
}
