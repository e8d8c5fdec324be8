pub mod analytics;
pub mod banking;

pub use analytics::{summarize, TransactionSummary};
pub use banking::{parse_amount, BankingService};
