use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::{balances, db_url, new_pool, orders, users, withdrawals, SqliteDatabaseError};
use crate::{
    db::traits::{AccountManagement, AuthManagement, InsertOrderResult, OrderManagement},
    db_types::{
        Balance,
        Cents,
        NewOrder,
        NewWithdrawal,
        Order,
        OrderNumber,
        OrderStatusType,
        PendingOrder,
        User,
        Withdrawal,
    },
    AccountApiError,
    AuthApiError,
    OrderLedgerError,
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using the `DATABASE_URI` environment variable (or the default URL).
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Migrations are embedded in the binary.
    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(&mut self) {
        self.pool.close().await;
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, OrderLedgerError> {
        let mut conn = self.pool.acquire().await?;
        orders::idempotent_insert(order, &mut conn).await
    }

    async fn fetch_order_by_number(&self, order_number: &OrderNumber) -> Result<Option<Order>, OrderLedgerError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_number(order_number, &mut conn).await
    }

    async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderLedgerError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders_for_user(user_id, &mut conn).await
    }

    async fn fetch_pending_orders(&self) -> Result<Vec<PendingOrder>, OrderLedgerError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_pending_orders(&mut conn).await
    }

    /// In a single atomic transaction,
    /// * overwrites the order's status and accrual,
    /// * if the verdict is `PROCESSED` with a positive accrual, and the order's accrual has never been credited before,
    ///   flags the order as credited and adds the accrual to the user's current balance.
    ///
    /// The first statement is the order update, so the transaction holds the write lock from the start and concurrent
    /// verdicts queue up behind each other instead of failing.
    async fn apply_verdict(
        &self,
        user_id: i64,
        order_number: &OrderNumber,
        status: OrderStatusType,
        accrual: Cents,
    ) -> Result<Order, OrderLedgerError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::update_verdict(user_id, order_number, status, accrual, &mut tx)
            .await?
            .ok_or_else(|| OrderLedgerError::OrderNotFound(order_number.clone()))?;
        let creditable = status == OrderStatusType::Processed && accrual.is_positive();
        if creditable && orders::mark_credited(order_number, &mut tx).await? {
            let balance = balances::credit(user_id, accrual, &mut tx).await?;
            debug!("🗃️ Order {order_number} credited {accrual} to user #{user_id}. Balance is now {}", balance.current);
        }
        tx.commit().await?;
        trace!("🗃️ Order {order_number} is now {status}");
        Ok(order)
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_balance(&self, user_id: i64) -> Result<Balance, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let balance = balances::fetch_balance(user_id, &mut conn).await?;
        Ok(balance)
    }

    /// Takes a new withdrawal, and in a single atomic transaction,
    /// * debits the user's current balance and adds the sum to the withdrawn total. If the balance is insufficient,
    ///   nothing further is done.
    /// * stores the withdrawal record.
    async fn withdraw(&self, withdrawal: NewWithdrawal) -> Result<Withdrawal, AccountApiError> {
        let mut tx = self.pool.begin().await?;
        let user_id = withdrawal.user_id;
        let sum = withdrawal.sum;
        if balances::debit(user_id, sum, &mut tx).await?.is_none() {
            debug!("🗃️ User #{user_id} cannot withdraw {sum}. Insufficient funds.");
            tx.rollback().await?;
            return Err(AccountApiError::InsufficientFunds);
        }
        let withdrawal = withdrawals::insert_withdrawal(withdrawal, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ User #{user_id} withdrew {sum} against order {}", withdrawal.order_number);
        Ok(withdrawal)
    }

    async fn fetch_withdrawals(&self, user_id: i64) -> Result<Vec<Withdrawal>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = withdrawals::fetch_withdrawals(user_id, &mut conn).await?;
        Ok(result)
    }
}

impl AuthManagement for SqliteDatabase {
    async fn create_user(&self, login: &str, password_hash: &str) -> Result<User, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::create_user(login, password_hash, &mut conn).await
    }

    async fn fetch_user_by_login(&self, login: &str) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_login(login, &mut conn).await
    }
}
