// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {pades_cms::CmsError, thiserror::Error};

/// Unified error type for PAdES/SVT validation and issuance.
#[derive(Debug, Error)]
pub enum PadesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed PDF: {0}")]
    BadPdf(String),

    #[error("document contains no signatures")]
    NoSignatures,

    #[error("CMS parse error: {0}")]
    CmsParse(CmsError),

    #[error("CMS verification error: {0}")]
    CmsVerify(CmsError),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("certificate path validation failure: {0}")]
    CertPathFailure(String),

    #[error("SVT parse error: {0}")]
    SvtParse(String),

    #[error("SVT verification error: {0}")]
    SvtVerify(String),

    #[error("byte range read beyond end of buffer")]
    ByteRangeOutOfBounds,

    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(&'static str),

    #[error("X.509 certificate error: {0}")]
    X509(#[from] x509_certificate::X509CertificateError),

    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PEM error: {0}")]
    Pem(#[from] pem::PemError),

    #[error("no signing certificate provided")]
    NoSigningCertificate,
}
