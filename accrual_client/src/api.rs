use std::sync::Arc;

use log::*;
use reqwest::{Client, StatusCode};

use crate::{config::AccrualConfig, AccrualApiError, AccrualOrder, AccrualResponse};

#[derive(Clone)]
pub struct AccrualApi {
    config: AccrualConfig,
    client: Arc<Client>,
}

impl AccrualApi {
    pub fn new(config: AccrualConfig) -> Result<Self, AccrualApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AccrualApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Asks the accrual service for its verdict on the given order.
    ///
    /// A `200` carries a verdict, a `204` means the service has never heard of the order. Failures to get a complete
    /// response (including a body cut short or stalled) are reported as [`AccrualApiError::Transport`]; every other
    /// status code is [`AccrualApiError::UnexpectedStatus`].
    pub async fn get_order(&self, order_number: &str) -> Result<AccrualResponse, AccrualApiError> {
        let url = self.url(&format!("/api/orders/{order_number}"));
        trace!("🧮 Sending accrual query: {url}");
        let response = self.client.get(url).send().await.map_err(|e| AccrualApiError::Transport(e.to_string()))?;
        match response.status() {
            StatusCode::OK => {
                // a body that never fully arrives is a transport failure, only a complete but undecodable one is not
                let body = response.bytes().await.map_err(|e| AccrualApiError::Transport(e.to_string()))?;
                let order = serde_json::from_slice::<AccrualOrder>(&body)
                    .map_err(|e| AccrualApiError::InvalidResponse(e.to_string()))?;
                debug!("🧮 Order {order_number} is {} with accrual {:?}", order.status, order.accrual);
                Ok(AccrualResponse::Verdict(order))
            },
            StatusCode::NO_CONTENT => {
                debug!("🧮 Order {order_number} is not registered with the accrual service");
                Ok(AccrualResponse::NotRegistered)
            },
            status => {
                let status = status.as_u16();
                let message = response.text().await.unwrap_or_default();
                warn!("🧮 Accrual query for order {order_number} failed with status {status}. {message}");
                Err(AccrualApiError::UnexpectedStatus { status, message })
            },
        }
    }
}
