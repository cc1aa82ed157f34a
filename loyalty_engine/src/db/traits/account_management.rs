use std::future::Future;

use crate::{
    db_types::{Balance, NewWithdrawal, Withdrawal},
    AccountApiError,
};

/// The `AccountManagement` trait defines balance bookkeeping for users.
///
/// Balances are only ever credited by [`crate::OrderManagement::apply_verdict`]; this trait covers reads and debits.
pub trait AccountManagement {
    /// The user's current balance. A user that has never been credited or debited has a zero balance.
    fn fetch_balance(&self, user_id: i64) -> impl Future<Output = Result<Balance, AccountApiError>> + Send;

    /// Debits the balance and records the withdrawal atomically. Fails with [`AccountApiError::InsufficientFunds`]
    /// (leaving everything untouched) if the current balance is smaller than the withdrawal.
    fn withdraw(&self, withdrawal: NewWithdrawal) -> impl Future<Output = Result<Withdrawal, AccountApiError>> + Send;

    /// All withdrawals made by the user, oldest first.
    fn fetch_withdrawals(&self, user_id: i64) -> impl Future<Output = Result<Vec<Withdrawal>, AccountApiError>> + Send;
}
