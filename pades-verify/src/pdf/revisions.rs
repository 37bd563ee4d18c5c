// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Incremental-update revision analysis (§4.4). PDF's incremental-update
//! model means a document is a sequence of appended revisions, each ending
//! in an `%%EOF` marker; this module reconstructs that sequence, diffs
//! each revision's cross-reference table and catalog against the one
//! before it, and classifies each update as safe or unsafe for the
//! purpose of deciding whether an earlier signature still covers the
//! visible document.

use std::collections::BTreeSet;

use log::debug;

use crate::{
    error::PadesError,
    pdf::parser::{ObjectKey, ParsedRevision, PdfDocumentParser, PdfValue, SignatureDictionary},
};

const EOF_MARKER: &[u8] = b"%%EOF";

/// One incremental-update segment of a PDF document.
#[derive(Clone, Debug)]
pub struct RevisionRecord {
    pub length: u64,
    pub is_signature: bool,
    pub is_doc_timestamp: bool,
    pub xref_table: std::collections::BTreeMap<ObjectKey, u64>,
    pub root_object_id: Option<ObjectKey>,
    pub root_object: Option<std::collections::BTreeMap<String, PdfValue>>,
    pub changed_xref: BTreeSet<ObjectKey>,
    pub added_xref: BTreeSet<ObjectKey>,
    pub root_update: bool,
    pub non_root_update: bool,
    pub legal_root_object: bool,
    pub changed_root_items: BTreeSet<String>,
    pub added_root_items: BTreeSet<String>,
    pub valid_dss: bool,
    pub safe_update: bool,
}

impl RevisionRecord {
    fn first(length: u64, parsed: &ParsedRevision) -> Self {
        Self {
            length,
            is_signature: false,
            is_doc_timestamp: false,
            xref_table: parsed.xref_table.clone(),
            root_object_id: parsed.root_object_id,
            root_object: parsed.root.clone(),
            changed_xref: BTreeSet::new(),
            added_xref: BTreeSet::new(),
            root_update: false,
            non_root_update: false,
            legal_root_object: true,
            changed_root_items: BTreeSet::new(),
            added_root_items: BTreeSet::new(),
            valid_dss: false,
            safe_update: false,
        }
    }
}

/// Scan `bytes` backwards for `%%EOF` markers, returning the end offset
/// (exclusive, including the marker's own trailing EOL) of each revision
/// in ascending order. Iteration stops once no earlier marker is found —
/// the first revision found scanning backwards is the whole document.
fn discover_revision_lengths(bytes: &[u8]) -> Vec<u64> {
    let mut lengths = Vec::new();
    let mut scan_end = bytes.len();

    while let Some(marker_start) = rfind(&bytes[..scan_end], EOF_MARKER) {
        let mut end = marker_start + EOF_MARKER.len();
        if end < bytes.len() && bytes[end] == b'\r' {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'\n' {
            end += 1;
        }
        lengths.push(end as u64);
        scan_end = marker_start;
    }

    lengths.reverse();
    lengths
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).rev().find(|&i| &haystack[i..i + needle.len()] == needle)
}

/// Reconstruct every revision of `bytes`, diff each against its
/// predecessor, and classify it. Returns the revision records (oldest
/// first) alongside the full set of signature dictionaries found in the
/// final, complete parse of the document.
pub fn analyze_document(
    bytes: &[u8],
    parser: &dyn PdfDocumentParser,
) -> Result<(Vec<RevisionRecord>, Vec<SignatureDictionary>), PadesError> {
    let lengths = discover_revision_lengths(bytes);
    if lengths.is_empty() {
        return Err(PadesError::BadPdf("no %%EOF marker found".into()));
    }

    let mut parsed_revisions = Vec::new();
    for length in &lengths {
        match parser.parse_revision(&bytes[..*length as usize]) {
            Ok(parsed) => parsed_revisions.push((*length, parsed)),
            Err(err) => {
                debug!("discarding unparseable revision prefix of length {length}: {err}");
            }
        }
    }

    parsed_revisions.sort_by_key(|(length, _)| *length);

    let mut records = Vec::with_capacity(parsed_revisions.len());
    for (i, (length, parsed)) in parsed_revisions.iter().enumerate() {
        if i == 0 {
            records.push(RevisionRecord::first(*length, parsed));
            continue;
        }

        let prior = &parsed_revisions[i - 1].1;
        records.push(classify_revision(*length, parsed, prior));
    }

    let signature_dictionaries = parsed_revisions
        .last()
        .map(|(_, parsed)| parsed.signature_dictionaries.clone())
        .unwrap_or_default();

    for dict in &signature_dictionaries {
        let total_length = dict.byte_range.total_length();
        if let Some(record) = records.iter_mut().find(|r| r.length == total_length) {
            record.is_signature = true;
            record.is_doc_timestamp = dict.is_document_timestamp();
        }
    }

    finalize_safe_updates(&mut records);

    Ok((records, signature_dictionaries))
}

fn classify_revision(
    length: u64,
    parsed: &ParsedRevision,
    prior: &ParsedRevision,
) -> RevisionRecord {
    let mut changed_xref = BTreeSet::new();
    let mut added_xref = BTreeSet::new();

    for (key, offset) in &parsed.xref_table {
        match prior.xref_table.get(key) {
            Some(prior_offset) if prior_offset != offset => {
                changed_xref.insert(*key);
            }
            None => {
                added_xref.insert(*key);
            }
            _ => {}
        }
    }

    let root_update = parsed
        .root_object_id
        .map(|root_id| changed_xref.contains(&root_id))
        .unwrap_or(false);
    let non_root_update = parsed
        .root_object_id
        .map(|root_id| changed_xref.iter().any(|k| *k != root_id))
        .unwrap_or_else(|| !changed_xref.is_empty());

    let mut legal_root_object = true;
    let mut changed_root_items = BTreeSet::new();
    let mut added_root_items = BTreeSet::new();

    if root_update {
        if let (Some(new_root), Some(old_root)) = (&parsed.root, &prior.root) {
            for (name, new_value) in new_root {
                match old_root.get(name) {
                    None => {
                        added_root_items.insert(name.clone());
                        if new_value.is_other() {
                            legal_root_object = false;
                        }
                    }
                    Some(old_value) => {
                        if new_value.is_other() || old_value.is_other() {
                            legal_root_object = false;
                        } else if !new_value.pades_eq(old_value) {
                            changed_root_items.insert(name.clone());
                        }
                    }
                }
            }
        } else {
            legal_root_object = false;
        }
    }

    let valid_dss = root_update
        && !non_root_update
        && legal_root_object
        && changed_root_items.is_empty()
        && added_root_items.len() == 1
        && added_root_items.contains("DSS");

    // Signature/doc-timestamp classification happens after all records
    // exist (it needs the full-document signature dictionary list), so
    // `safe_update` is finalized by `finalize_safe_update` once those
    // flags are set.
    RevisionRecord {
        length,
        is_signature: false,
        is_doc_timestamp: false,
        xref_table: parsed.xref_table.clone(),
        root_object_id: parsed.root_object_id,
        root_object: parsed.root.clone(),
        changed_xref,
        added_xref,
        root_update,
        non_root_update,
        legal_root_object,
        changed_root_items,
        added_root_items,
        valid_dss,
        safe_update: false,
    }
}

/// Finalize `safe_update` for every record once `is_signature` /
/// `is_doc_timestamp` have been set by [`analyze_document`]. Split out
/// from [`classify_revision`] because `safe_update` depends on those
/// flags, which in turn depend on the complete signature-dictionary list.
pub fn finalize_safe_updates(records: &mut [RevisionRecord]) {
    for record in records.iter_mut() {
        let non_dss_or_acroform = record
            .added_root_items
            .iter()
            .any(|item| item != "DSS" && item != "AcroForm");

        record.safe_update = !record.non_root_update
            && record.legal_root_object
            && record.changed_root_items.is_empty()
            && (record.is_signature || record.is_doc_timestamp || record.valid_dss)
            && !non_dss_or_acroform;
    }
}

/// §4.4 coverage: a signature at revision index `signature_index` covers
/// the document iff every later revision is `safe_update`.
pub fn covers_document(records: &[RevisionRecord], signature_index: usize) -> bool {
    records[signature_index + 1..]
        .iter()
        .all(|r| r.safe_update)
}

/// The byte prefix whose length equals the revision immediately preceding
/// `signature_index` — the document exactly as it stood before that
/// signature was applied. Fails if the signature is the very first
/// revision, since there is no prior document to extract.
pub fn signed_document<'a>(
    bytes: &'a [u8],
    records: &[RevisionRecord],
    signature_index: usize,
) -> Result<&'a [u8], PadesError> {
    if signature_index == 0 {
        return Err(PadesError::InternalInvariantViolation(
            "signature has no prior revision",
        ));
    }

    let prior_length = records[signature_index - 1].length as usize;
    bytes
        .get(..prior_length)
        .ok_or(PadesError::ByteRangeOutOfBounds)
}
