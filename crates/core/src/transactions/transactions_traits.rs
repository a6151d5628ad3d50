use chrono::NaiveDate;

use super::Transaction;
use crate::errors::Result;

/// Read-only access to the transaction ledger.
///
/// The ledger is owned and mutated by the (out-of-scope) CRUD layer; this
/// engine only ever reads it.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// All portfolio ids known to the ledger.
    fn list_portfolio_ids(&self) -> Result<Vec<String>>;

    /// Every transaction of a portfolio, unordered.
    fn get_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<Transaction>>;

    /// Transactions of a portfolio dated on or before `date`, unordered.
    fn get_for_portfolio_until(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Transaction>>;

    /// Date of the portfolio's first transaction, if any exist.
    fn first_transaction_date(&self, portfolio_id: &str) -> Result<Option<NaiveDate>>;
}
