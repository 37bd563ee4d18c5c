// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Verifier and issuer configuration, analogous to
//! `apple-codesign::signing_settings::SigningSettings`: serde structs
//! loadable from JSON or built programmatically, with no bespoke config
//! DSL of their own.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

fn default_basic_validation() -> bool {
    true
}

/// Settings governing signature verification (§4.5/§4.7).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VerifierConfig {
    /// Reference time for certificate path validation, as epoch seconds.
    /// Overrides the embedded signature-timestamp/wall-clock precedence of
    /// §4.5 steps 4-5 when present; absent means "use that precedence".
    #[serde(default)]
    pub reference_time: Option<i64>,
    /// Whether SVT issuance synthesizes a `basic-validation` policy entry
    /// when a signature's own `policy_validation_results` would otherwise
    /// leave `sig_val` empty (§4.7 step 3).
    #[serde(default = "default_basic_validation")]
    pub default_basic_validation: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            reference_time: None,
            default_basic_validation: default_basic_validation(),
        }
    }
}

impl VerifierConfig {
    /// The caller-supplied reference time, or now if none was configured.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now)
    }
}

fn default_claim_ttl_seconds() -> i64 {
    60 * 60 * 24 * 365
}

/// Settings governing SVT issuance (§4.7): the issuer's own identity and
/// the default lifetime it claims for an SVT it mints.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IssuerConfig {
    /// Value placed in every minted SVT's `iss` claim.
    pub issuer_name: String,
    #[serde(default = "default_claim_ttl_seconds")]
    pub claim_ttl_seconds: i64,
    #[serde(default = "default_basic_validation")]
    pub default_basic_validation: bool,
}

impl IssuerConfig {
    pub fn policy(&self) -> crate::svt::issuer::IssuerPolicy {
        crate::svt::issuer::IssuerPolicy {
            default_basic_validation: self.default_basic_validation,
            issuer_name: self.issuer_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_config_defaults_from_empty_json() {
        let config: VerifierConfig = serde_json::from_str("{}").unwrap();
        assert!(config.default_basic_validation);
        assert!(config.reference_time.is_none());
    }

    #[test]
    fn verifier_config_reference_time_round_trips() {
        let config = VerifierConfig {
            reference_time: Some(1_700_000_000),
            ..VerifierConfig::default()
        };
        assert_eq!(config.reference_time().timestamp(), 1_700_000_000);
    }

    #[test]
    fn issuer_config_requires_issuer_name() {
        let config: IssuerConfig =
            serde_json::from_str(r#"{"issuer_name":"example-tsa"}"#).unwrap();
        assert_eq!(config.issuer_name, "example-tsa");
        assert_eq!(config.claim_ttl_seconds, default_claim_ttl_seconds());
    }
}
