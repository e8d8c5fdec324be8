use rust_decimal::Decimal;
use serde::Serialize;

use crate::enums::TransactionKind;
use crate::store::TransactionRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub total_deposit: Decimal,
    pub total_withdraw: Decimal,
    pub net_change: Decimal,
}

/// Totals over the transaction log: deposits, withdrawals, and their
/// difference. Pure, single pass.
pub fn summarize(transactions: &[TransactionRecord]) -> TransactionSummary {
    let mut total_deposit = Decimal::ZERO;
    let mut total_withdraw = Decimal::ZERO;

    for record in transactions {
        match record.kind {
            TransactionKind::Deposit => total_deposit += record.amount,
            TransactionKind::Withdraw => total_withdraw += record.amount,
        }
    }

    TransactionSummary {
        total_deposit,
        total_withdraw,
        net_change: total_deposit - total_withdraw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: TransactionKind, amount: i64) -> TransactionRecord {
        TransactionRecord {
            date: "2026-01-01 10:00:00".to_string(),
            kind,
            amount: Decimal::from(amount),
            balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_empty_log() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_deposit, Decimal::ZERO);
        assert_eq!(summary.total_withdraw, Decimal::ZERO);
        assert_eq!(summary.net_change, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_log() {
        let summary = summarize(&[
            record(TransactionKind::Deposit, 100),
            record(TransactionKind::Withdraw, 30),
        ]);
        assert_eq!(summary.total_deposit, Decimal::from(100));
        assert_eq!(summary.total_withdraw, Decimal::from(30));
        assert_eq!(summary.net_change, Decimal::from(70));
    }

    #[test]
    fn test_net_change_can_go_negative() {
        let summary = summarize(&[
            record(TransactionKind::Deposit, 10),
            record(TransactionKind::Withdraw, 25),
        ]);
        assert_eq!(summary.net_change, Decimal::from(-15));
    }
}
