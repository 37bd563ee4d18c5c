// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVT issuer (§4.7, C7): turns an already-validated [`SignatureResult`]
//! into a signed SVT claim set, the way `ConnectTokenEncoder` in
//! `app_store_connect::api_token` turns API key metadata into a signed
//! App Store Connect JWT.

use jsonwebtoken::{encode, EncodingKey, Header};
use pades_cms::{Certificate, CertificateKeyAlgorithm, DigestAlgorithm, JwsAlgorithm};

use crate::{
    cert_ref::encode_cert_ref,
    error::PadesError,
    svt::claims::{ClaimPolicyResult, SigRef, SvtClaimSet, TimeVal, TimeValType},
    types::SignatureResult,
};

/// Signing key bound to the issuer's own certificate, used to mint SVTs.
pub struct SvtIssuerKey {
    pub certificate: Certificate,
    pub chain: Vec<Certificate>,
    pub encoding_key: EncodingKey,
    pub jws_algorithm: JwsAlgorithm,
}

impl SvtIssuerKey {
    /// Build an issuer key from a DER-encoded private key and its
    /// certificate chain (leaf first).
    pub fn from_der(
        private_key_der: &[u8],
        certificate: Certificate,
        chain: Vec<Certificate>,
    ) -> Result<Self, PadesError> {
        let jws_algorithm = match certificate.public_key().algorithm {
            CertificateKeyAlgorithm::Rsa => JwsAlgorithm::Rs256,
            CertificateKeyAlgorithm::Ec => JwsAlgorithm::Es256,
            CertificateKeyAlgorithm::Ed25519 => JwsAlgorithm::EdDsa,
        };

        let encoding_key = match certificate.public_key().algorithm {
            CertificateKeyAlgorithm::Rsa => EncodingKey::from_rsa_der(private_key_der),
            CertificateKeyAlgorithm::Ec => EncodingKey::from_ec_der(private_key_der),
            CertificateKeyAlgorithm::Ed25519 => EncodingKey::from_ed_der(private_key_der),
        };

        Ok(Self {
            certificate,
            chain,
            encoding_key,
            jws_algorithm,
        })
    }
}

/// Configuration governing SVT issuance: whether a `basic-validation`
/// policy entry is synthesized when the signature's own
/// `policy_validation_results` would otherwise leave `sig_val` empty.
#[derive(Clone, Debug)]
pub struct IssuerPolicy {
    pub default_basic_validation: bool,
    pub issuer_name: String,
}

fn x5c_header(issuer: &SvtIssuerKey) -> Result<Vec<String>, PadesError> {
    std::iter::once(&issuer.certificate)
        .chain(issuer.chain.iter())
        .map(|c| c.as_der().map(base64::encode).map_err(PadesError::from))
        .collect()
}

/// Issue an SVT for an already-validated signature (§4.7).
///
/// `now` and `jti` are supplied by the caller since this crate must not
/// call `SystemTime::now()`/generate UUIDs internally when driven from a
/// workflow that needs reproducible output; the CLI binary is the usual
/// caller and supplies fresh values each time.
pub fn issue_svt(
    result: &SignatureResult,
    signature_value: &[u8],
    signed_bytes: &[u8],
    issuer: &SvtIssuerKey,
    policy: &IssuerPolicy,
    now: i64,
    jti: String,
) -> Result<(SvtClaimSet, String), PadesError> {
    let digest_algorithm = issuer.jws_algorithm.digest_algorithm();

    let sig_ref = SigRef {
        sig_hash: digest_base64(digest_algorithm, signature_value),
        sb_hash: digest_base64(digest_algorithm, signed_bytes),
    };

    let mut sig_val: Vec<ClaimPolicyResult> = result
        .policy_validation_results
        .iter()
        .map(ClaimPolicyResult::from)
        .collect();

    if sig_val.is_empty() && policy.default_basic_validation {
        sig_val.push(ClaimPolicyResult {
            pol: "basic-validation".to_string(),
            res: if result.success {
                crate::svt::claims::ClaimConclusion::Passed
            } else {
                crate::svt::claims::ClaimConclusion::Failed
            },
        });
    }

    let time_val: Vec<TimeVal> = result
        .time_validation_results
        .iter()
        .filter(|t| t.has_passed_policy())
        .map(|t| TimeVal {
            iss: t.iss.clone(),
            time: t.time,
            kind: match t.kind {
                crate::types::TimeValidationType::Tsa => TimeValType::Tsa,
                crate::types::TimeValidationType::Svt => TimeValType::Svt,
            },
            id: t.id.clone(),
            val: t.policy_results.iter().map(ClaimPolicyResult::from).collect(),
        })
        .collect();

    let signer_certificate = result
        .signer_certificate
        .as_ref()
        .ok_or(PadesError::NoSigningCertificate)?;

    let cert_ref = encode_cert_ref(
        signer_certificate,
        &result.signature_certificate_chain,
        &result.validated_certificate_path,
        digest_algorithm,
    )?;

    let claims = SvtClaimSet {
        iss: policy.issuer_name.clone(),
        iat: now,
        jti,
        sig_ref,
        sig_val,
        time_val,
        cert_ref,
        ext: Default::default(),
    };

    let header = Header {
        alg: algorithm_for(issuer.jws_algorithm),
        x5c: Some(x5c_header(issuer)?),
        ..Default::default()
    };

    let jws = encode(&header, &claims, &issuer.encoding_key)?;

    Ok((claims, jws))
}

fn digest_base64(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    let mut hasher = algorithm.as_hasher();
    hasher.update(data);
    base64::encode(hasher.finish().as_ref())
}

fn algorithm_for(alg: JwsAlgorithm) -> jsonwebtoken::Algorithm {
    match alg {
        JwsAlgorithm::Rs256 => jsonwebtoken::Algorithm::RS256,
        JwsAlgorithm::Rs384 => jsonwebtoken::Algorithm::RS384,
        JwsAlgorithm::Rs512 => jsonwebtoken::Algorithm::RS512,
        JwsAlgorithm::Es256 => jsonwebtoken::Algorithm::ES256,
        JwsAlgorithm::Es384 => jsonwebtoken::Algorithm::ES384,
        JwsAlgorithm::EdDsa => jsonwebtoken::Algorithm::EdDSA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_base64_is_deterministic() {
        let a = digest_base64(DigestAlgorithm::Sha256, b"hello world");
        let b = digest_base64(DigestAlgorithm::Sha256, b"hello world");
        assert_eq!(a, b);
        let c = digest_base64(DigestAlgorithm::Sha256, b"goodbye world");
        assert_ne!(a, c);
    }
}
