// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document-level result aggregator (§4.8, C8): a pure reducer over the
//! per-signature results C5/C6 produce.

use serde::Serialize;

use crate::types::SignatureResult;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStatus {
    NoSignatures,
    Ok,
    SomeInvalid,
    NoneValid,
}

#[derive(Clone, Debug, Serialize)]
pub struct DocumentResult {
    pub status: DocumentStatus,
    pub signature_count: usize,
    pub valid_signature_count: usize,
    pub signatures: Vec<SignatureResult>,
}

/// Reduce a document's per-signature results into an overall status.
pub fn aggregate(signatures: Vec<SignatureResult>) -> DocumentResult {
    let signature_count = signatures.len();
    let valid_signature_count = signatures.iter().filter(|s| s.success).count();

    let status = if signature_count == 0 {
        DocumentStatus::NoSignatures
    } else if valid_signature_count == signature_count {
        DocumentStatus::Ok
    } else if valid_signature_count == 0 {
        DocumentStatus::NoneValid
    } else {
        DocumentStatus::SomeInvalid
    };

    DocumentResult {
        status,
        signature_count,
        valid_signature_count,
        signatures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_reports_no_signatures() {
        let result = aggregate(Vec::new());
        assert_eq!(result.status, DocumentStatus::NoSignatures);
        assert_eq!(result.signature_count, 0);
    }
}
