//! Unifies API for accessing user accounts.

use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Balance, Cents, NewWithdrawal, Order, OrderNumber, Withdrawal},
    helpers::is_valid_luhn,
    AccountApiError,
    AccountManagement,
    OrderManagement,
};

/// The `AccountApi` provides a unified API for accessing user balances, orders and withdrawals.
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement + OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn balance(&self, user_id: i64) -> Result<Balance, AccountApiError> {
        self.db.fetch_balance(user_id).await
    }

    /// All orders uploaded by the user, oldest first.
    pub async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, AccountApiError> {
        let orders = self.db.fetch_orders_for_user(user_id).await?;
        trace!("User #{user_id} has {} orders", orders.len());
        Ok(orders)
    }

    pub async fn withdrawals_for_user(&self, user_id: i64) -> Result<Vec<Withdrawal>, AccountApiError> {
        self.db.fetch_withdrawals(user_id).await
    }

    /// Spends `sum` of the user's points against a (new) order number.
    pub async fn withdraw(&self, user_id: i64, order_number: &str, sum: Cents) -> Result<Withdrawal, AccountApiError> {
        let order_number = order_number.trim();
        if !is_valid_luhn(order_number) {
            return Err(AccountApiError::InvalidOrderNumber(order_number.to_string()));
        }
        if !sum.is_positive() {
            return Err(AccountApiError::InvalidAmount(sum.to_string()));
        }
        let withdrawal = NewWithdrawal::new(user_id, OrderNumber::from(order_number), sum);
        let result = self.db.withdraw(withdrawal).await?;
        info!("💰️ User #{user_id} withdrew {sum} for order {}", result.order_number);
        Ok(result)
    }
}
