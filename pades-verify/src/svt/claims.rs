// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Signature Validation Token claim set (§3, §6): the JSON payload
//! carried inside the SVT's JWS.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    cert_ref::CertRef,
    types::{PolicyConclusion, PolicyValidationResult},
};

/// `sig_ref`: identifies the signature this claim set attests to, by the
/// digest of its signature value and the digest of the bytes it signed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SigRef {
    pub sig_hash: String,
    pub sb_hash: String,
}

/// One policy outcome as carried in a claim set (`sig_val`, or nested
/// inside a `time_val` entry's `val`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaimPolicyResult {
    pub pol: String,
    pub res: ClaimConclusion,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimConclusion {
    Passed,
    Failed,
    Indeterminate,
}

impl From<PolicyConclusion> for ClaimConclusion {
    fn from(c: PolicyConclusion) -> Self {
        match c {
            PolicyConclusion::Passed => Self::Passed,
            PolicyConclusion::Failed => Self::Failed,
            PolicyConclusion::Indeterminate => Self::Indeterminate,
        }
    }
}

impl From<ClaimConclusion> for PolicyConclusion {
    fn from(c: ClaimConclusion) -> Self {
        match c {
            ClaimConclusion::Passed => Self::Passed,
            ClaimConclusion::Failed => Self::Failed,
            ClaimConclusion::Indeterminate => Self::Indeterminate,
        }
    }
}

impl From<&PolicyValidationResult> for ClaimPolicyResult {
    fn from(r: &PolicyValidationResult) -> Self {
        Self {
            pol: r.policy_id.clone(),
            res: r.conclusion.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeValType {
    Tsa,
    Svt,
}

/// One `time_val` entry: a verified point in time plus the policy
/// outcomes true at that time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeVal {
    pub iss: String,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: TimeValType,
    pub id: String,
    pub val: Vec<ClaimPolicyResult>,
}

/// The full SVT claim set (§3), the JWS payload. `iss`/`iat`/`jti` are the
/// standard JWT registered claims (§4.7 step 5): issuer identity,
/// issuance time, and a fresh unique id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SvtClaimSet {
    pub iss: String,
    pub iat: i64,
    pub jti: String,
    pub sig_ref: SigRef,
    pub sig_val: Vec<ClaimPolicyResult>,
    pub time_val: Vec<TimeVal>,
    pub cert_ref: CertRef,
    #[serde(default)]
    pub ext: HashMap<String, Value>,
}
