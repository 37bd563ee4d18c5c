// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core result, claim, and time-validation value types shared by every
//! component: the CMS verifier, the PDF signature verifier, the SVT
//! matcher, and the SVT issuer all read and write these types rather than
//! passing ad hoc tuples between each other.

use {pades_cms::Certificate, serde::Serialize};

/// Overall outcome of verifying a single signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    Success,
    ErrorBadFormat,
    ErrorSignerInvalid,
    ErrorInvalidSignature,
}

/// The public key family reported for a signer certificate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicKeyType {
    Rsa,
    Ec,
    EdDsa,
    Other,
}

/// One entry of `policy_validation_results`: an application of a named
/// policy (PKIX path validation, PAdES binding, basic SVT validation, ...)
/// and its conclusion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PolicyValidationResult {
    pub policy_id: String,
    pub conclusion: PolicyConclusion,
}

impl PolicyValidationResult {
    pub fn passed(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            conclusion: PolicyConclusion::Passed,
        }
    }

    pub fn failed(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            conclusion: PolicyConclusion::Failed,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyConclusion {
    Passed,
    Failed,
    Indeterminate,
}

/// The provenance of a verified time: either an RFC 3161 timestamp
/// authority or an SVT's own issuance time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeValidationType {
    Tsa,
    Svt,
}

/// One verified point in time, with the policy outcomes that were true at
/// that time. §3's `time_validation_results`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeValidationResult {
    /// Issuer identity: the TSA's signer certificate subject, or the SVT's
    /// `iss` claim.
    pub iss: String,
    /// Epoch seconds.
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: TimeValidationType,
    /// TSA serial number or SVT `jti`, for correlation.
    pub id: String,
    pub policy_results: Vec<PolicyValidationResult>,
}

impl TimeValidationResult {
    pub fn has_passed_policy(&self) -> bool {
        self.policy_results
            .iter()
            .any(|r| r.conclusion == PolicyConclusion::Passed)
    }
}

/// A verified RFC 3161 timestamp attached directly to a signature (not
/// via an SVT). Cleared when an SVT supersedes the signature's own
/// timestamps.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignatureTimestamp {
    pub genuine_time: i64,
    pub serial_number: String,
}

/// The result of validating one signature found in a PDF document. The
/// fields PDF-specific verification populates (`covers_document`,
/// `signature_timestamp_list`) are plain optional fields rather than a
/// separate subtype: every signature this crate reports on came from a
/// PDF, so there is no collaborator that only ever sees the non-PDF
/// subset of this shape.
#[derive(Clone, Debug, Serialize)]
pub struct SignatureResult {
    pub success: bool,
    pub status: SignatureStatus,
    /// Absent only for `status = error_bad_format`, where the CMS structure
    /// could not be parsed far enough to recover a signer certificate.
    pub signer_certificate: Option<Certificate>,
    pub signature_certificate_chain: Vec<Certificate>,
    pub validated_certificate_path: Vec<Certificate>,
    pub covers_document: bool,
    pub invalid_sign_cert: bool,
    pub is_pades: bool,
    pub public_key_type: PublicKeyType,
    pub key_length: u32,
    pub named_curve: Option<String>,
    pub signature_algorithm_uri: String,
    pub cms_digest_alg: String,
    pub cms_sig_alg: String,
    pub cms_algo_protection_digest_alg: Option<String>,
    pub cms_algo_protection_sig_alg: Option<String>,
    pub claimed_signing_time: Option<i64>,
    pub signature_timestamp_list: Vec<SignatureTimestamp>,
    pub time_validation_results: Vec<TimeValidationResult>,
    pub policy_validation_results: Vec<PolicyValidationResult>,
    pub svt_claims: Option<crate::svt::claims::SvtClaimSet>,
    pub svt_jwt: Option<String>,
}

impl SignatureResult {
    /// §3 invariant: `success` implies `status = success`, and a
    /// successful result can never simultaneously claim PAdES and a
    /// failed binding.
    pub fn invariants_hold(&self) -> bool {
        if self.success && self.status != SignatureStatus::Success {
            return false;
        }
        if self.is_pades && self.invalid_sign_cert {
            return false;
        }
        if self.svt_claims.is_some()
            && !self
                .time_validation_results
                .iter()
                .any(|r| r.kind == TimeValidationType::Svt)
        {
            return false;
        }
        true
    }
}
