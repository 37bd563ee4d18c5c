// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level verifier API (§6): wires C4 (revision analysis) into C5 (CMS
//! signature verification) and C6 (SVT matching), then reduces the
//! per-signature results with C8. The PDF object-stream parser and the
//! certificate path validator are injected at construction, per spec.

use log::warn;
use pades_cms::{CmsError, SignedData};

use crate::{
    aggregator::{aggregate, DocumentResult},
    cert_path::CertificatePathValidator,
    config::VerifierConfig,
    error::PadesError,
    pdf::{
        parser::{PdfDocumentParser, SignatureDictionary},
        revisions::{analyze_document, signed_document},
    },
    signature_verifier::verify_signature,
    svt::{
        issuer::{issue_svt, IssuerPolicy, SvtIssuerKey},
        claims::SvtClaimSet,
        matcher::{apply_svt, bind_svt_to_signature, verify_svt_jws, VerifiedSvt},
    },
    types::SignatureResult,
};

/// Validates the signatures in a PDF document. Holds no document state of
/// its own — every method takes the document bytes fresh, mirroring
/// `apple-codesign`'s stateless verifier entry points.
pub struct Verifier<'a> {
    parser: &'a dyn PdfDocumentParser,
    path_validator: &'a dyn CertificatePathValidator,
    config: VerifierConfig,
}

impl<'a> Verifier<'a> {
    pub fn new(
        parser: &'a dyn PdfDocumentParser,
        path_validator: &'a dyn CertificatePathValidator,
        config: VerifierConfig,
    ) -> Self {
        Self {
            parser,
            path_validator,
            config,
        }
    }

    /// Whether `pdf_bytes` carries at least one content signature.
    pub fn is_signed(&self, pdf_bytes: &[u8]) -> Result<bool, PadesError> {
        let (_, dicts) = analyze_document(pdf_bytes, self.parser)?;
        Ok(dicts.iter().any(|d| !d.is_document_timestamp()))
    }

    /// Validate every content signature in `pdf_bytes` (§4.5/§4.6).
    ///
    /// Document-level failures (the PDF cannot be parsed at all) surface
    /// directly; a failure scoped to one signature is captured into that
    /// signature's own result instead of aborting its siblings.
    pub fn validate(&self, pdf_bytes: &[u8]) -> Result<Vec<SignatureResult>, PadesError> {
        Ok(self
            .validate_with_material(pdf_bytes)?
            .into_iter()
            .map(|(result, ..)| result)
            .collect())
    }

    /// Validate and reduce to a single document-level outcome.
    pub fn validate_and_aggregate(&self, pdf_bytes: &[u8]) -> Result<DocumentResult, PadesError> {
        Ok(aggregate(self.validate(pdf_bytes)?))
    }

    /// Issue an SVT over the `signature_index`-th content signature found
    /// in `pdf_bytes` (document order), carrying forward its own
    /// already-validated result (§4.7). `signature_index` indexes into the
    /// same ordering [`validate`] returns.
    pub fn issue_svt_for_signature(
        &self,
        pdf_bytes: &[u8],
        signature_index: usize,
        issuer: &SvtIssuerKey,
        policy: &IssuerPolicy,
        now: i64,
        jti: String,
    ) -> Result<(SvtClaimSet, String), PadesError> {
        let material = self.validate_with_material(pdf_bytes)?;
        let (result, signature_value, signed_bytes) = material
            .into_iter()
            .nth(signature_index)
            .ok_or(PadesError::NoSignatures)?;

        issue_svt(&result, &signature_value, &signed_bytes, issuer, policy, now, jti)
    }

    /// [`validate`] plus, for each result, the raw signature-value octets
    /// and the bytes it covers — the material [`issue_svt_for_signature`]
    /// needs but [`SignatureResult`] itself doesn't carry, since no field
    /// in §3's result shape is a copy of the signed bytes.
    fn validate_with_material(
        &self,
        pdf_bytes: &[u8],
    ) -> Result<Vec<(SignatureResult, Vec<u8>, Vec<u8>)>, PadesError> {
        let (records, dicts) = analyze_document(pdf_bytes, self.parser)?;

        let content_signatures: Vec<&SignatureDictionary> =
            dicts.iter().filter(|d| !d.is_document_timestamp()).collect();

        let signature_values: Vec<Vec<u8>> = content_signatures
            .iter()
            .map(|dict| signature_value(dict))
            .collect::<Result<_, _>>()?;
        let signature_value_refs: Vec<&[u8]> =
            signature_values.iter().map(Vec::as_slice).collect();

        let verified_svts = collect_verified_svts(&dicts, self.path_validator);

        let reference_time = self.config.reference_time();

        let mut results = Vec::with_capacity(content_signatures.len());

        for (index, dict) in content_signatures.iter().enumerate() {
            let signature_index = records
                .iter()
                .position(|r| r.length == dict.byte_range.total_length())
                .ok_or(PadesError::InternalInvariantViolation(
                    "signature dictionary has no matching revision record",
                ))?;

            let base = verify_signature(
                dict,
                pdf_bytes,
                &records,
                signature_index,
                self.path_validator,
                reference_time,
            );

            // §4.6: the first verified SVT (in document order) that binds
            // to this signature supersedes C5's own result.
            let bound = verified_svts
                .iter()
                .find(|svt| bind_svt_to_signature(svt, &signature_value_refs) == Some(index));

            let result = match bound {
                Some(svt) => apply_svt(svt, base),
                None => base,
            };

            let signed_bytes = signed_document(pdf_bytes, &records, signature_index)
                .unwrap_or_default()
                .to_vec();

            results.push((result, signature_values[index].clone(), signed_bytes));
        }

        Ok(results)
    }
}

/// Extract the raw signature-value octets from a signature dictionary's
/// CMS `Contents`, for SVT sig-hash binding (§4.6 step 2).
fn signature_value(dict: &SignatureDictionary) -> Result<Vec<u8>, PadesError> {
    let signed_data = SignedData::parse_ber(&dict.contents).map_err(PadesError::CmsParse)?;
    let signer = signed_data
        .signers()
        .next()
        .ok_or(PadesError::CmsParse(CmsError::NoSignedAttributes))?;
    Ok(signer.signature().to_vec())
}

/// Find every SVT JWS carried in a document-timestamp's unsigned
/// attributes, in document order, and verify each one. A candidate that
/// fails to parse or to verify is discarded with a diagnostic rather than
/// silently dropped, so an SVT that should have matched isn't masked by a
/// quiet skip.
fn collect_verified_svts(
    dicts: &[SignatureDictionary],
    path_validator: &dyn CertificatePathValidator,
) -> Vec<VerifiedSvt> {
    dicts
        .iter()
        .filter(|d| d.is_document_timestamp())
        .filter_map(|dict| match SignedData::parse_ber(&dict.contents) {
            Ok(signed_data) => signed_data
                .signers()
                .next()
                .and_then(|signer| signer.unsigned_attributes())
                .and_then(|attrs| attrs.svt_jws())
                .map(str::to_string),
            Err(err) => {
                warn!("discarding unparseable document-timestamp token: {err}");
                None
            }
        })
        .filter_map(|jws| match verify_svt_jws(&jws, path_validator) {
            Ok(svt) => Some(svt),
            Err(err) => {
                warn!("discarding SVT candidate that failed verification: {err}");
                None
            }
        })
        .collect()
}
