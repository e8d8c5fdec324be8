use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::TransactionKind;

pub const ACCOUNT_TYPE: &str = "Savings";
pub const BRANCH: &str = "CloudBankX Main Branch";
pub const IFSC: &str = "CBX0001234";

/// Opening balance credited to every new account: 1000.00.
pub fn opening_balance() -> Decimal {
    Decimal::new(100_000, 2)
}

/// 12-digit account number. Random, not guaranteed globally unique.
pub fn generate_account_number() -> u64 {
    rand::rng().random_range(100_000_000_000u64..=999_999_999_999)
}

/// Immutable log entry for one deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Balance after applying this transaction, frozen at write time.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl TransactionRecord {
    pub fn new(kind: TransactionKind, amount: Decimal, balance: Decimal) -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            kind,
            amount,
            balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub name: String,
    pub account_number: u64,
    pub account_type: String,
    pub branch: String,
    pub ifsc: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub transactions: Vec<TransactionRecord>,
}

impl UserAccount {
    /// Fresh account as created at signup.
    pub fn new(username: &str) -> Self {
        Self {
            name: username.to_string(),
            account_number: generate_account_number(),
            account_type: ACCOUNT_TYPE.to_string(),
            branch: BRANCH.to_string(),
            ifsc: IFSC.to_string(),
            balance: opening_balance(),
            transactions: Vec::new(),
        }
    }
}

/// Pre-migration record shape: only `balance` and `transactions` may be
/// present, everything else was added later.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyAccount {
    pub name: Option<String>,
    pub account_number: Option<u64>,
    pub account_type: Option<String>,
    pub branch: Option<String>,
    pub ifsc: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance: Option<Decimal>,
    pub transactions: Option<Vec<TransactionRecord>>,
}

impl UserAccount {
    /// Upgrade a legacy record, keeping whatever it already had. The
    /// account number is randomized only when missing, so a record is
    /// never re-numbered by a second migration pass.
    pub fn from_legacy(username: &str, legacy: LegacyAccount) -> Self {
        Self {
            name: legacy.name.unwrap_or_else(|| username.to_string()),
            account_number: legacy.account_number.unwrap_or_else(generate_account_number),
            account_type: legacy.account_type.unwrap_or_else(|| ACCOUNT_TYPE.to_string()),
            branch: legacy.branch.unwrap_or_else(|| BRANCH.to_string()),
            ifsc: legacy.ifsc.unwrap_or_else(|| IFSC.to_string()),
            balance: legacy.balance.unwrap_or_else(opening_balance),
            transactions: legacy.transactions.unwrap_or_default(),
        }
    }
}
