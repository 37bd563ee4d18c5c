// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Certificate reference encoder (§4.2, C2): produces the compact
//! `cert_ref` SVT claim from a signer certificate, the signature's own
//! certificate chain, and the path the external path validator actually
//! used.

use std::collections::BTreeSet;

use pades_cms::{Certificate, DigestAlgorithm};
use serde::{Deserialize, Serialize};

use crate::error::PadesError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertRefType {
    Chain,
    ChainHash,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CertRef {
    #[serde(rename = "type")]
    pub kind: CertRefType,
    #[serde(rename = "ref")]
    pub entries: Vec<String>,
}

/// True iff every certificate in `path` (by DER bytes) also appears in
/// `chain`.
fn is_subset(path: &[Certificate], chain: &[Certificate]) -> Result<bool, PadesError> {
    let chain_ders: Result<BTreeSet<Vec<u8>>, PadesError> =
        chain.iter().map(|c| c.as_der().map_err(PadesError::from)).collect();
    let chain_ders = chain_ders?;

    for cert in path {
        if !chain_ders.contains(&cert.as_der()?) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Encode the `cert_ref` claim per §4.2.
pub fn encode_cert_ref(
    signer: &Certificate,
    chain: &[Certificate],
    validated_path: &[Certificate],
    digest_algorithm: DigestAlgorithm,
) -> Result<CertRef, PadesError> {
    if !validated_path.is_empty() && !is_subset(validated_path, chain)? {
        let entries = validated_path
            .iter()
            .map(|c| c.as_der().map(|der| base64::encode(der)))
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(CertRef {
            kind: CertRefType::Chain,
            entries,
        });
    }

    let mut hasher = digest_algorithm.as_hasher();
    hasher.update(&signer.as_der()?);
    let signer_hash = base64::encode(hasher.finish().as_ref());

    if chain.len() < 2 {
        return Ok(CertRef {
            kind: CertRefType::ChainHash,
            entries: vec![signer_hash],
        });
    }

    let mut chain_hasher = digest_algorithm.as_hasher();
    for cert in chain {
        chain_hasher.update(&cert.as_der()?);
    }
    let chain_hash = base64::encode(chain_hasher.finish().as_ref());

    Ok(CertRef {
        kind: CertRefType::ChainHash,
        entries: vec![signer_hash, chain_hash],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cert_ref_type_roundtrips_through_json() {
        let encoded = serde_json::to_string(&CertRefType::ChainHash).unwrap();
        assert_eq!(encoded, "\"chain_hash\"");
        let decoded: CertRefType = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, CertRefType::ChainHash);
    }
}
