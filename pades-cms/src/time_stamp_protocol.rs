// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RFC 3161 Time-Stamp Protocol: verification of embedded tokens.
//!
//! This module only verifies time-stamp tokens that are already embedded in
//! a CMS signature (the `signature-time-stamp` unsigned attribute, or a
//! PDF document-timestamp signature). It does not issue new requests to a
//! TSA over the network — that collaborator sits above this crate.

use {
    crate::{
        asn1::rfc3161::{OID_CONTENT_TYPE_TST_INFO, TstInfo},
        certificate::Certificate,
        CmsError, DigestAlgorithm, SignedData,
    },
    bcder::decode::Constructed,
    std::convert::TryFrom,
};

#[derive(Debug)]
pub enum TimeStampError {
    /// The token's `ContentInfo` does not carry a `TSTInfo`.
    NotATimestampToken,

    /// Failed decoding the embedded `TSTInfo`.
    Asn1Decode(bcder::decode::Error),

    /// The message imprint's digest algorithm is not supported.
    UnknownDigestAlgorithm(bcder::Oid),

    /// The message imprint does not match the hash of the data that was
    /// supposedly time-stamped.
    MessageImprintMismatch,

    /// The token's own CMS signature failed to verify.
    Cms(CmsError),
}

impl std::fmt::Display for TimeStampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotATimestampToken => f.write_str("ContentInfo does not contain a TSTInfo"),
            Self::Asn1Decode(e) => write!(f, "error decoding TSTInfo: {}", e),
            Self::UnknownDigestAlgorithm(oid) => {
                write!(f, "unsupported message imprint digest algorithm: {}", oid)
            }
            Self::MessageImprintMismatch => {
                f.write_str("message imprint does not match the time-stamped data")
            }
            Self::Cms(e) => write!(f, "CMS error verifying time-stamp token: {}", e),
        }
    }
}

impl std::error::Error for TimeStampError {}

impl From<bcder::decode::Error> for TimeStampError {
    fn from(e: bcder::decode::Error) -> Self {
        Self::Asn1Decode(e)
    }
}

impl From<CmsError> for TimeStampError {
    fn from(e: CmsError) -> Self {
        Self::Cms(e)
    }
}

/// The outcome of verifying an embedded RFC 3161 time-stamp token.
pub struct VerifiedTimestamp {
    /// The time asserted by the TSA, per the token's `genTime` field.
    pub gen_time: chrono::DateTime<chrono::Utc>,

    /// The certificate of the TSA that issued the token.
    pub signer_certificate: Certificate,

    /// The full certificate chain as carried in the token.
    pub chain: Vec<Certificate>,
}

/// Verify an embedded time-stamp token attests to `imprinted_data`.
///
/// `token` is the `SignedData` carried in a `signature-time-stamp` unsigned
/// attribute (or a PDF document-timestamp signature's `Contents`).
/// `imprinted_data` is the data the token is expected to cover — for a
/// signature timestamp this is the raw bytes of the enclosing signature
/// value.
///
/// This verifies the message imprint and the token's own CMS signature. It
/// does NOT validate the TSA's certificate chain; that is the caller's job
/// via the injected certificate-path validator, using [VerifiedTimestamp]'s
/// `signer_certificate`/`chain` and `gen_time` as the reference time.
pub fn verify_embedded_timestamp(
    token: &crate::asn1::rfc5652::SignedData,
    imprinted_data: &[u8],
) -> Result<VerifiedTimestamp, TimeStampError> {
    let tst_info = tst_info_from_raw_signed_data(token)?;

    let digest_algorithm = DigestAlgorithm::try_from(&tst_info.message_imprint.hash_algorithm)
        .map_err(|_| {
            TimeStampError::UnknownDigestAlgorithm(
                tst_info.message_imprint.hash_algorithm.algorithm.clone(),
            )
        })?;

    let mut hasher = digest_algorithm.as_hasher();
    hasher.update(imprinted_data);
    let digest = hasher.finish();

    if digest.as_ref() != tst_info.message_imprint.hashed_message.to_bytes().as_ref() {
        return Err(TimeStampError::MessageImprintMismatch);
    }

    let signed_data = SignedData::try_from(token)?;

    for signer in signed_data.signers() {
        signer.verify_signature_with_signed_data(&signed_data)?;
    }

    let mut certs = signed_data.certificates();
    let signer_certificate = certs.next().cloned().ok_or(CmsError::CertificateNotFound)?;
    let chain = std::iter::once(signer_certificate.clone())
        .chain(certs.cloned())
        .collect();

    Ok(VerifiedTimestamp {
        gen_time: *tst_info.gen_time,
        signer_certificate,
        chain,
    })
}

fn tst_info_from_raw_signed_data(
    token: &crate::asn1::rfc5652::SignedData,
) -> Result<TstInfo, TimeStampError> {
    if token.content_info.content_type != OID_CONTENT_TYPE_TST_INFO {
        return Err(TimeStampError::NotATimestampToken);
    }

    let content = token
        .content_info
        .content
        .as_ref()
        .ok_or(TimeStampError::NotATimestampToken)?;

    Ok(Constructed::decode(
        content.to_bytes(),
        bcder::Mode::Der,
        |cons| TstInfo::take_from(cons),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_data_content_type_oid_matches_tst_info() {
        // id-ct-TSTInfo, RFC 3161 §2.4.2.
        assert_eq!(
            OID_CONTENT_TYPE_TST_INFO.0,
            [42, 134, 72, 134, 247, 13, 1, 9, 16, 1, 4]
        );
    }
}
