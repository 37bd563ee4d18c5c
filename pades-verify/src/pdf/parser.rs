// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The PDF object-stream collaborator. Low-level COS (Carousel Object
//! System) decoding — tokenizing, xref stream / object stream decoding,
//! filter decompression — is explicitly out of scope (spec.md §1): this
//! module only defines the shape a parser must hand back, and the typed
//! value abstraction [`PdfValue`] revision diffing is built on.

use std::collections::BTreeMap;

use crate::error::PadesError;

/// `(object number, generation number)`, the identity of an indirect PDF
/// object.
pub type ObjectKey = (u32, u16);

/// A typed COS value, reduced to what revision diffing (§4.4) needs to
/// distinguish. Anything the parser can't classify into one of the other
/// variants is `Other` — and per §4.4, the presence of an `Other` value in
/// a root-dictionary comparison makes that root illegitimate for `safe_update`
/// purposes, since this crate cannot reason about what changed.
#[derive(Clone, Debug, PartialEq)]
pub enum PdfValue {
    IndirectReference(ObjectKey),
    Dictionary(BTreeMap<String, PdfValue>),
    Name(String),
    String(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// §4.4's lenient equality: nested dictionaries compare equal by mere
    /// presence (not content), strings compare case-insensitively, arrays
    /// compare element-wise, and an `Other` value never compares equal to
    /// anything (forcing callers to treat it as a change).
    pub fn pades_eq(&self, other: &PdfValue) -> bool {
        match (self, other) {
            (PdfValue::IndirectReference(a), PdfValue::IndirectReference(b)) => a == b,
            (PdfValue::Dictionary(_), PdfValue::Dictionary(_)) => true,
            (PdfValue::Name(a), PdfValue::Name(b)) => a == b,
            (PdfValue::String(a), PdfValue::String(b)) => {
                a.to_ascii_lowercase() == b.to_ascii_lowercase()
            }
            (PdfValue::Array(a), PdfValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.pades_eq(y))
            }
            _ => false,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, PdfValue::Other)
    }
}

/// A `ByteRange` as found in a signature dictionary: two spans,
/// `[first_start..first_start+first_len]` and `[second_start..second_start+second_len]`,
/// covering every byte of the document except the hex-encoded `/Contents`
/// placeholder itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    pub first_start: u64,
    pub first_len: u64,
    pub second_start: u64,
    pub second_len: u64,
}

impl ByteRange {
    /// The total length of the document as covered by this byte range —
    /// the revision in which the signature using it was applied.
    pub fn total_length(&self) -> u64 {
        self.second_start + self.second_len
    }
}

/// A signature dictionary found while parsing a PDF revision.
#[derive(Clone, Debug)]
pub struct SignatureDictionary {
    pub byte_range: ByteRange,
    /// The DER-encoded CMS `SignedData` carried in `/Contents`.
    pub contents: Vec<u8>,
    /// The `/SubFilter` name, e.g. `ETSI.CAdES.detached`, `adbe.pkcs7.detached`,
    /// or `ETSI.RFC3161` for a document timestamp.
    pub sub_filter: String,
}

impl SignatureDictionary {
    pub fn is_document_timestamp(&self) -> bool {
        self.sub_filter == "ETSI.RFC3161"
    }
}

/// The result of parsing one revision prefix of a PDF as a complete
/// document: its trailer, cross-reference table, root (catalog)
/// dictionary, and the signature dictionaries reachable from it.
pub struct ParsedRevision {
    pub trailer: BTreeMap<String, PdfValue>,
    pub xref_table: BTreeMap<ObjectKey, u64>,
    pub root_object_id: Option<ObjectKey>,
    pub root: Option<BTreeMap<String, PdfValue>>,
    pub signature_dictionaries: Vec<SignatureDictionary>,
}

/// The external PDF object-stream collaborator (spec.md §1). Given the
/// bytes of one revision prefix, parses it as a standalone PDF document.
/// Implementations own tokenizing, xref/object-stream decoding, and filter
/// decompression; this crate only consumes the typed result.
pub trait PdfDocumentParser {
    fn parse_revision(&self, bytes: &[u8]) -> Result<ParsedRevision, PadesError>;
}
