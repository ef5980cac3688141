use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    // Identifier grammars of the three supported structure namespaces, and
    // the same grammars with a chain suffix attached. AlphaFold is tried
    // before ESM Atlas, ESM Atlas before PDB.
    static ref AF_RE: Regex = Regex::new(r"AF-[A-Za-z0-9]{3,}-F[0-9]+-model_v4").unwrap();
    static ref ESM_RE: Regex = Regex::new(r"MGYP[0-9]{12}").unwrap();
    static ref PDB_RE: Regex = Regex::new(r"[A-Za-z0-9]{4}").unwrap();
    static ref AF_CHAIN_RE: Regex =
        Regex::new(r"AF-[A-Za-z0-9]{3,}-F[0-9]+-model_v4_[A-Za-z0-9]").unwrap();
    static ref ESM_CHAIN_RE: Regex = Regex::new(r"MGYP[0-9]{12}_[A-Za-z0-9]").unwrap();
    static ref PDB_CHAIN_RE: Regex = Regex::new(r"[A-Za-z0-9]{4}_[A-Za-z0-9]").unwrap();
}

/// A normalized structure identifier from one of the supported namespaces:
/// PDB (`6VXX`), AlphaFold (`AF-Q9BYF1-F1-model_v4`) or ESM Atlas
/// (`MGYP000740062793`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureId(String);

impl StructureId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A structure identifier with a chain suffix, joined by `_` (e.g. `6VXX_A`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeId {
    structure: StructureId,
    chain: String,
}

impl CompositeId {
    pub fn structure(&self) -> &StructureId {
        &self.structure
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.structure, self.chain)
    }
}

/// Filter a structure identifier out of user input. The input must already be
/// trimmed by the caller. Succeeds only when the first pattern match, taken as
/// a standalone string, reproduces the entire input; a sub-token embedded in
/// garbage is rejected.
pub fn extract_structure_id(raw: &str) -> Option<StructureId> {
    let matched = AF_RE
        .find(raw)
        .or_else(|| ESM_RE.find(raw))
        .or_else(|| PDB_RE.find(raw))?;
    let candidate = matched.as_str();
    // The four-character class can be satisfied by a shorter accidental match
    if candidate.len() <= 3 {
        return None;
    }
    if candidate != raw {
        return None;
    }
    Some(StructureId(candidate.to_string()))
}

/// Filter a composite `id_chain` identifier out of user input. Same precedence
/// and round-trip rule as [`extract_structure_id`], applied to the combined
/// string.
pub fn extract_composite_id(raw: &str) -> Option<CompositeId> {
    let matched = AF_CHAIN_RE
        .find(raw)
        .or_else(|| ESM_CHAIN_RE.find(raw))
        .or_else(|| PDB_CHAIN_RE.find(raw))?;
    let parts: Vec<&str> = matched.as_str().split('_').collect();
    if parts.len() < 2 || parts[0].len() <= 3 {
        return None;
    }
    if parts.iter().join("_") != raw {
        return None;
    }
    let (structure, chain) = matched.as_str().rsplit_once('_')?;
    Some(CompositeId {
        structure: StructureId(structure.to_string()),
        chain: chain.to_string(),
    })
}
