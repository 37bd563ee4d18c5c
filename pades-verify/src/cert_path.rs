// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The certificate path validator: an external collaborator. This crate
//! does not build certificate chains, fetch CRLs/OCSP, or hold a trust
//! anchor configuration — callers inject an implementation of
//! [`CertificatePathValidator`] at construction, matching `apple-codesign`'s
//! own split between embedded-signature parsing (this crate's concern) and
//! keychain/trust evaluation (the caller's).

use {chrono::{DateTime, Utc}, pades_cms::Certificate, thiserror::Error};

#[derive(Debug, Error)]
pub enum PathValidationError {
    #[error("path could not be built to a trust anchor")]
    NoPathFound,

    #[error("a certificate in the path is expired or not yet valid at the reference time")]
    Expired,

    #[error("a certificate in the path is revoked")]
    Revoked,

    #[error("revocation status could not be determined")]
    RevocationUnknown,

    #[error("{0}")]
    Other(String),
}

/// A validated certificate path, leaf to anchor, and the outcome of
/// validating it.
#[derive(Clone, Debug)]
pub struct ValidatedPath {
    pub path: Vec<Certificate>,
    pub revocation_checked: bool,
}

/// Builds and validates a certificate path to a trusted anchor at a given
/// point in time. Implementations typically perform CRL/OCSP fetches and
/// consult a configured trust store; neither is this crate's concern.
pub trait CertificatePathValidator {
    fn validate(
        &self,
        signer: &Certificate,
        chain: &[Certificate],
        at_time: DateTime<Utc>,
    ) -> Result<ValidatedPath, PathValidationError>;
}
