use std::sync::Arc;

use rust_decimal::Decimal;

use crate::enums::TransactionKind;
use crate::error::{AppError, Result};
use crate::store::{AccountStore, TransactionRecord, UserAccount};

/// Parse a user-supplied amount: must be numeric and positive, rounded
/// half-even to two decimal places.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let amount: Decimal = raw.trim().parse().map_err(|_| AppError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidAmount);
    }
    Ok(amount.round_dp(2))
}

pub struct BankingService {
    store: Arc<AccountStore>,
}

impl BankingService {
    pub fn new(store: Arc<AccountStore>) -> Self {
        Self { store }
    }

    /// Credit the account and append a Deposit record stamped with the
    /// current time and the resulting balance. An amount that would
    /// overflow the balance is rejected like any other bad amount.
    pub async fn deposit(&self, username: &str, amount: Decimal) -> Result<UserAccount> {
        let account = self
            .store
            .with_account_mut(username, |account| {
                account.balance = account
                    .balance
                    .checked_add(amount)
                    .ok_or(AppError::InvalidAmount)?;
                account.transactions.push(TransactionRecord::new(
                    TransactionKind::Deposit,
                    amount,
                    account.balance,
                ));
                Ok(account.clone())
            })
            .await?;

        tracing::info!(user = username, %amount, balance = %account.balance, "deposit booked");
        Ok(account)
    }

    /// Debit the account. A withdrawal exceeding the balance is
    /// rejected and the record is left untouched; the balance never
    /// goes negative.
    pub async fn withdraw(&self, username: &str, amount: Decimal) -> Result<UserAccount> {
        let account = self
            .store
            .with_account_mut(username, |account| {
                if account.balance < amount {
                    return Err(AppError::InsufficientFunds);
                }
                account.balance = account
                    .balance
                    .checked_sub(amount)
                    .ok_or(AppError::InvalidAmount)?;
                account.transactions.push(TransactionRecord::new(
                    TransactionKind::Withdraw,
                    amount,
                    account.balance,
                ));
                Ok(account.clone())
            })
            .await?;

        tracing::info!(user = username, %amount, balance = %account.balance, "withdrawal booked");
        Ok(account)
    }
}
