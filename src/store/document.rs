use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::account::{LegacyAccount, UserAccount};

pub const SCHEMA_VERSION: u32 = 2;

/// The whole persisted state: one JSON document, all accounts keyed by
/// username. Version 1 was a bare `username -> record` map with
/// optional fields; version 2 wraps it and requires the full shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDocument {
    pub schema_version: u32,
    pub accounts: BTreeMap<String, UserAccount>,
}

impl BankDocument {
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            accounts: BTreeMap::new(),
        }
    }

    /// Load the document, migrating a legacy flat map in the process.
    /// Returns the document and whether a migration ran (the caller
    /// persists immediately so the upgrade happens exactly once).
    /// A missing or malformed file fails the load outright.
    pub fn load(path: &Path) -> Result<(Self, bool)> {
        let raw = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        if value.get("schema_version").is_some() {
            let document: BankDocument = serde_json::from_value(value)?;
            return Ok((document, false));
        }

        // Legacy layout: upgrade every record in one pass.
        let legacy: BTreeMap<String, LegacyAccount> = serde_json::from_value(value)?;
        let accounts = legacy
            .into_iter()
            .map(|(username, record)| {
                let account = UserAccount::from_legacy(&username, record);
                (username, account)
            })
            .collect();

        Ok((
            Self {
                schema_version: SCHEMA_VERSION,
                accounts,
            },
            true,
        ))
    }

    /// Rewrite the whole document. Writes to a sibling temp file and
    /// renames it over the target so a crash never leaves a torn file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
