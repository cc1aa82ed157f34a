use std::future::Future;

use accrual_client::{AccrualApi, AccrualApiError, AccrualResponse};

/// Anything the poller can ask for an accrual verdict. [`AccrualApi`] is the production implementation.
pub trait AccrualOracle {
    fn get_order(&self, order_number: &str) -> impl Future<Output = Result<AccrualResponse, AccrualApiError>> + Send;
}

impl AccrualOracle for AccrualApi {
    async fn get_order(&self, order_number: &str) -> Result<AccrualResponse, AccrualApiError> {
        AccrualApi::get_order(self, order_number).await
    }
}
