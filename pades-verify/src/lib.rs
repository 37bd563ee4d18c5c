// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PAdES/SVT PDF signature validation.
//!
//! This crate validates digital signatures embedded in PDF documents
//! according to the PAdES family of profiles, augmented by Signature
//! Validation Tokens (SVT): signed attestations from a trusted party that
//! record the outcome of a prior full validation, letting a verifier that
//! trusts the SVT issuer confirm a signature's validity without repeating
//! certificate path construction, revocation checks, or crypto checks
//! against keys that may since have expired.
//!
//! # Architecture
//!
//! * [`pdf::parser`] and [`pdf::revisions`] reconstruct a PDF's sequence of
//!   incremental updates and classify each one safe or unsafe, to decide
//!   whether an earlier signature still covers the visible document.
//! * [`signature_verifier`] drives `pades_cms`'s CMS/PAdES verification
//!   and an injected [`cert_path::CertificatePathValidator`] over the
//!   bytes the revision analyzer recovers.
//! * [`svt`] matches SVT JWS tokens to the signatures they reference,
//!   verifies and applies them (`svt::matcher`), and mints new ones from
//!   already-validated results (`svt::issuer`).
//! * [`aggregator`] reduces per-signature results to one document-level
//!   outcome.
//! * [`verifier::Verifier`] wires all of the above behind the public
//!   `validate`/`is_signed`/`aggregate` surface; [`config`] holds its
//!   settings.
//!
//! This crate does not parse PDF's low-level object syntax (COS tokenizing,
//! xref streams, filter decompression) or build/validate certificate
//! chains against a trust store — both are external collaborators injected
//! by the caller, via [`pdf::parser::PdfDocumentParser`] and
//! [`cert_path::CertificatePathValidator`] respectively.

pub mod aggregator;
pub mod cert_path;
pub mod cert_ref;
pub mod config;
pub mod error;
pub mod pdf;
pub mod signature_verifier;
pub mod svt;
pub mod types;
pub mod verifier;

pub use {
    aggregator::{aggregate, DocumentResult, DocumentStatus},
    config::{IssuerConfig, VerifierConfig},
    error::PadesError,
    verifier::Verifier,
};
